// ==========================================
// 饲料配方优化系统 - 引擎层
// ==========================================
// 职责: LP 建模、求解、配方提取、配方历史
// 红线: 引擎只读原料目录,不做文件读写
// 红线: 无可行解作为结果值返回,不抛错误
// ==========================================

pub mod history;
pub mod lp_model;
pub mod optimizer;
pub mod solver;

// 重导出核心引擎
pub use history::{FormulationHistory, FormulationRecord, DEFAULT_HISTORY_CAPACITY};
pub use lp_model::{effective_max, ConstraintKind, ConstraintRow, LpModel, RowSense};
pub use optimizer::{OptimizerSettings, RationOptimizer};
pub use solver::{LpSolver, MinilpSolver, SolveStatus};
