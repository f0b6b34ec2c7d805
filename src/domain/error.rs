// ==========================================
// 饲料配方优化系统 - 领域错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 所有错误必须可归因到输入（行号/字段/取值）
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==========================================
// IssueLevel - 行级问题级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueLevel {
    Error,   // 阻断合并
    Warning, // 仅提示（例如类别无法识别 → Unclassified）
}

// ==========================================
// RowIssueKind - 行级问题类型
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RowIssueKind {
    /// 必填字段缺失（列不存在或单元格为空）
    MissingColumns { columns: Vec<String> },
    /// 数值列包含非数值内容
    NonNumericField { field: String, value: String },
    /// 数值为负
    NegativeValue { field: String, value: f64 },
    /// 原料名称为空
    EmptyName,
    /// 同批次内名称重复
    DuplicateName { first_row: usize },
    /// 类别文本无法识别（按 Unclassified 处理）
    UnknownCategory { value: String },
}

impl fmt::Display for RowIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowIssueKind::MissingColumns { columns } => {
                write!(f, "缺少必填字段: {}", columns.join(", "))
            }
            RowIssueKind::NonNumericField { field, value } => {
                write!(f, "字段 {} 不是数值: '{}'", field, value)
            }
            RowIssueKind::NegativeValue { field, value } => {
                write!(f, "字段 {} 为负数: {}", field, value)
            }
            RowIssueKind::EmptyName => write!(f, "原料名称为空"),
            RowIssueKind::DuplicateName { first_row } => {
                write!(f, "原料名称重复（首次出现于第 {} 行）", first_row)
            }
            RowIssueKind::UnknownCategory { value } => {
                write!(f, "无法识别的类别 '{}'，按 Unclassified 处理", value)
            }
        }
    }
}

// ==========================================
// RowIssue - 行级问题记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowIssue {
    pub row_number: usize,    // 原始行号
    pub name: Option<String>, // 原料名称（如果可解析）
    pub level: IssueLevel,
    pub kind: RowIssueKind,
}

impl fmt::Display for RowIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "第 {} 行 ({}): {}", self.row_number, name, self.kind),
            None => write!(f, "第 {} 行: {}", self.row_number, self.kind),
        }
    }
}

// ==========================================
// ValidationError - 原料/目录输入校验错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("原料名称为空")]
    EmptyName,

    #[error("原料 {name} 的字段 {field} 取值非法: {value}（必须为有限非负数）")]
    InvalidValue {
        name: String,
        field: String,
        value: f64,
    },

    #[error("批量合并被拒绝: {} 行存在错误", count_error_rows(.0))]
    Rejected(Vec<RowIssue>),
}

impl ValidationError {
    /// 返回阻断合并的行级问题（非 Rejected 时为空）
    pub fn issues(&self) -> &[RowIssue] {
        match self {
            ValidationError::Rejected(issues) => issues,
            _ => &[],
        }
    }

    /// 出错的行号列表（去重、升序）
    pub fn offending_rows(&self) -> Vec<usize> {
        let mut rows: Vec<usize> = self.issues().iter().map(|i| i.row_number).collect();
        rows.sort_unstable();
        rows.dedup();
        rows
    }
}

fn count_error_rows(issues: &[RowIssue]) -> usize {
    let mut rows: Vec<usize> = issues
        .iter()
        .filter(|i| i.level == IssueLevel::Error)
        .map(|i| i.row_number)
        .collect();
    rows.sort_unstable();
    rows.dedup();
    rows.len()
}

// ==========================================
// ConfigurationError - 目标/策略配置错误
// ==========================================
// 在构建线性规划之前拒绝
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("营养目标 {field} 取值非法: {value}（必须为有限非负数）")]
    InvalidTarget { field: String, value: f64 },

    #[error("营养目标 {field} 上限 {max} 小于下限 {min}")]
    MaxBelowMin { field: String, min: f64, max: f64 },

    #[error("类别 {category} 的添加上限非法: {value}（必须位于 [0, 1]）")]
    InvalidCap { category: String, value: f64 },

    #[error("{field} 松弛量非法: {value}（必须为有限非负数）")]
    InvalidSlack { field: String, value: f64 },

    #[error("可选类别集合为空")]
    EmptyCategorySet,

    #[error("显示阈值非法: {0}（必须位于 (0, 1)）")]
    InvalidEpsilon(f64),

    #[error("可选原料数量 {count} 超过上限 {max}")]
    TooManyIngredients { count: usize, max: usize },
}
