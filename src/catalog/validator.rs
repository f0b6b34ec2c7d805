// ==========================================
// 饲料配方优化系统 - 原料行校验器
// ==========================================
// 职责: 必填字段 / 数值类型 / 非负 / 名称非空且批内唯一
// 红线: 校验只产出问题清单,不修改目录
// ==========================================

use crate::domain::error::{IssueLevel, RowIssue, RowIssueKind};
use crate::domain::ingredient::{Ingredient, IngredientRow};
use crate::domain::types::{Category, Nutrient, NutrientProfile};
use std::collections::HashMap;

/// 批量校验结果
#[derive(Debug, Clone, Default)]
pub struct RowValidation {
    pub accepted: Vec<Ingredient>, // 通过校验的原料（保持输入顺序）
    pub issues: Vec<RowIssue>,     // ERROR + WARNING
}

impl RowValidation {
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(|i| i.level == IssueLevel::Error)
    }

    /// 拆分为 (错误, 警告)
    pub fn split_issues(self) -> (Vec<RowIssue>, Vec<RowIssue>) {
        self.issues
            .into_iter()
            .partition(|i| i.level == IssueLevel::Error)
    }
}

pub struct RowValidator;

impl RowValidator {
    /// 校验整批表格行
    ///
    /// # 规则
    /// 1. name 列存在且非空,批内唯一（区分大小写）
    /// 2. category 列存在; 空白 → Unclassified; 无法识别 → Unclassified + WARNING
    /// 3. 四项营养与 cost 存在、为有限数值、非负
    pub fn validate(rows: &[IngredientRow]) -> RowValidation {
        let mut result = RowValidation::default();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for row in rows {
            let name = row.name.as_deref().map(str::trim).filter(|n| !n.is_empty());
            let mut row_issues = Vec::new();
            let mut missing = Vec::new();

            // ===== 主键: name =====
            match &row.name {
                None => missing.push("name".to_string()),
                Some(text) if text.trim().is_empty() => {
                    row_issues.push(RowIssueKind::EmptyName);
                }
                Some(_) => {}
            }

            if let Some(n) = name {
                if let Some(first_row) = first_seen.get(n) {
                    row_issues.push(RowIssueKind::DuplicateName {
                        first_row: *first_row,
                    });
                } else {
                    first_seen.insert(n.to_string(), row.row_number);
                }
            }

            // ===== 类别 =====
            let category = match &row.category {
                None => {
                    missing.push("category".to_string());
                    Category::Unclassified
                }
                Some(text) => match Category::parse(text) {
                    Some(category) => category,
                    None => {
                        result.issues.push(RowIssue {
                            row_number: row.row_number,
                            name: name.map(str::to_string),
                            level: IssueLevel::Warning,
                            kind: RowIssueKind::UnknownCategory {
                                value: text.trim().to_string(),
                            },
                        });
                        Category::Unclassified
                    }
                },
            };

            // ===== 数值字段 =====
            let mut values = [0.0_f64; 4];
            for nutrient in Nutrient::ALL {
                if let Some(v) = parse_numeric(
                    nutrient.field_name(),
                    row.nutrient_cell(nutrient),
                    &mut missing,
                    &mut row_issues,
                ) {
                    values[nutrient.index()] = v;
                }
            }
            let cost = parse_numeric("cost", row.cost.as_deref(), &mut missing, &mut row_issues)
                .unwrap_or(0.0);

            if !missing.is_empty() {
                row_issues.insert(0, RowIssueKind::MissingColumns { columns: missing });
            }

            if row_issues.is_empty() {
                // 行内字段已全部通过,构造不会失败
                match Ingredient::new(
                    name.unwrap_or_default(),
                    category,
                    NutrientProfile::from_array(values),
                    cost,
                ) {
                    Ok(ingredient) => result.accepted.push(ingredient),
                    Err(_) => row_issues.push(RowIssueKind::EmptyName),
                }
            }

            for kind in row_issues {
                result.issues.push(RowIssue {
                    row_number: row.row_number,
                    name: name.map(str::to_string),
                    level: IssueLevel::Error,
                    kind,
                });
            }
        }

        result
    }
}

/// 解析数值单元格
///
/// # 返回
/// - Some(f64): 有限非负数
/// - None: 缺失/非数值/负数（问题已记录）
fn parse_numeric(
    field: &str,
    cell: Option<&str>,
    missing: &mut Vec<String>,
    issues: &mut Vec<RowIssueKind>,
) -> Option<f64> {
    let text = match cell.map(str::trim) {
        None | Some("") => {
            missing.push(field.to_string());
            return None;
        }
        Some(text) => text,
    };

    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        Ok(value) if value.is_finite() => {
            issues.push(RowIssueKind::NegativeValue {
                field: field.to_string(),
                value,
            });
            None
        }
        _ => {
            issues.push(RowIssueKind::NonNumericField {
                field: field.to_string(),
                value: text.to_string(),
            });
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_row(row_number: usize, name: &str, cost: &str) -> IngredientRow {
        IngredientRow {
            row_number,
            name: Some(name.to_string()),
            category: Some("Concentrate".to_string()),
            crude_protein: Some("44".to_string()),
            energy: Some("3200".to_string()),
            fibre: Some("7".to_string()),
            calcium: Some("0.3".to_string()),
            cost: Some(cost.to_string()),
        }
    }

    #[test]
    fn test_validate_all_valid() {
        let rows = vec![
            create_test_row(2, "Soybean Meal", "150"),
            create_test_row(3, "Groundnut Cake", "130"),
        ];
        let result = RowValidator::validate(&rows);
        assert!(!result.has_errors());
        assert_eq!(result.accepted.len(), 2);
        assert_eq!(result.accepted[1].name(), "Groundnut Cake");
    }

    #[test]
    fn test_validate_non_numeric_cost() {
        let rows = vec![
            create_test_row(2, "Soybean Meal", "150"),
            create_test_row(3, "Maize", "cheap"),
        ];
        let result = RowValidator::validate(&rows);
        assert!(result.has_errors());
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].row_number, 3);
        assert_eq!(
            result.issues[0].kind,
            RowIssueKind::NonNumericField {
                field: "cost".to_string(),
                value: "cheap".to_string()
            }
        );
    }

    #[test]
    fn test_validate_missing_columns_collected() {
        let mut row = create_test_row(2, "Maize", "120");
        row.energy = None;
        row.calcium = Some("  ".to_string());
        row.category = None;

        let result = RowValidator::validate(&[row]);
        assert_eq!(result.issues.len(), 1);
        assert_eq!(
            result.issues[0].kind,
            RowIssueKind::MissingColumns {
                columns: vec![
                    "category".to_string(),
                    "energy".to_string(),
                    "calcium".to_string()
                ]
            }
        );
    }

    #[test]
    fn test_validate_duplicate_and_empty_name() {
        let rows = vec![
            create_test_row(2, "Maize", "120"),
            create_test_row(3, "Maize", "125"),
            create_test_row(4, "  ", "10"),
        ];
        let result = RowValidator::validate(&rows);
        let (errors, warnings) = result.split_issues();
        assert!(warnings.is_empty());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, RowIssueKind::DuplicateName { first_row: 2 });
        assert_eq!(errors[1].kind, RowIssueKind::EmptyName);
    }

    #[test]
    fn test_validate_negative_and_nan() {
        let mut row = create_test_row(2, "Maize", "120");
        row.fibre = Some("-2".to_string());
        row.crude_protein = Some("NaN".to_string());

        let result = RowValidator::validate(&[row]);
        let kinds: Vec<RowIssueKind> = result.issues.into_iter().map(|i| i.kind).collect();
        assert!(kinds.contains(&RowIssueKind::NegativeValue {
            field: "fibre".to_string(),
            value: -2.0
        }));
        assert!(kinds.contains(&RowIssueKind::NonNumericField {
            field: "crude_protein".to_string(),
            value: "NaN".to_string()
        }));
    }

    #[test]
    fn test_validate_unknown_category_is_warning() {
        let mut row = create_test_row(2, "Bone Meal", "60");
        row.category = Some("Supplement".to_string());

        let result = RowValidator::validate(&[row]);
        assert!(!result.has_errors());
        assert_eq!(result.accepted[0].category(), Category::Unclassified);
        assert_eq!(result.issues[0].level, IssueLevel::Warning);
    }
}
