// ==========================================
// 饲料配方优化系统 - 配置层
// ==========================================
// 职责: 配方方案（畜种 + 营养目标 + 策略 + 引擎参数）
// 存储: JSON 文件
// ==========================================

pub mod config_manager;
pub mod formulation_profile;

// 重导出核心配置管理器
pub use config_manager::{ConfigError, ConfigManager, ProfileSource, PROFILE_ENV_VAR};
pub use formulation_profile::{FormulationProfile, Species};
