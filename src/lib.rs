// ==========================================
// 饲料配方优化系统 - 核心库
// ==========================================
// 技术栈: Rust + minilp（线性规划）
// 系统定位: 最低成本日粮配方（决策支持,人工最终确认）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 原料目录层 - 校验与去重
pub mod catalog;

// 引擎层 - LP 建模与求解
pub mod engine;

// 导入层 - 外部表格
pub mod importer;

// 配置层 - 配方方案
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Category, Nutrient, NutrientProfile};

// 领域实体
pub use domain::{
    ConfigurationError, Eligibility, InfeasibleReason, InfeasibleReport, Ingredient,
    IngredientRow, NutrientTargets, OptimizationOutcome, Ration, RationLine, RationPolicy,
    ValidationError,
};

// 原料目录
pub use catalog::{Catalog, MergeReport};

// 引擎
pub use engine::{
    FormulationHistory, FormulationRecord, LpSolver, MinilpSolver, OptimizerSettings,
    RationOptimizer,
};

// 配置
pub use config::{ConfigManager, FormulationProfile, Species};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "饲料配方优化系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
