// ==========================================
// 饲料配方优化系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、错误
// 红线: 不含文件读写,不含求解逻辑
// ==========================================

pub mod error;
pub mod ingredient;
pub mod policy;
pub mod ration;
pub mod targets;
pub mod types;

// 重导出核心类型
pub use error::{ConfigurationError, IssueLevel, RowIssue, RowIssueKind, ValidationError};
pub use ingredient::{Ingredient, IngredientRow};
pub use policy::{Eligibility, RationPolicy};
pub use ration::{
    InfeasibleReason, InfeasibleReport, NutrientShortfall, OptimizationOutcome, Ration,
    RationLine,
};
pub use targets::NutrientTargets;
pub use types::{Category, Nutrient, NutrientProfile};
