// ==========================================
// 饲料配方优化系统 - 线性规划模型构建
// ==========================================
// 职责: 目录 + 目标 + 策略 → 与求解器无关的 LP 模型
// 存储: 系数矩阵按行连续存放（行 × 可选原料）,只构建一次,按下标访问
// ==========================================
// 变量: 每个可选原料一个质量分数 p_i, 下界 0, 上界 = 类别上限（无则 +∞）
// 目标: min Σ p_i × cost_i
// 约束:
//   1) Σ p_i == 1（始终存在）
//   2) Σ p_i × n_i >= 下限（下限为 0 时省略）
//   3) Σ p_i × n_i <= 上限（仅粗蛋白/粗纤维,配置时）
// ==========================================

use crate::catalog::Catalog;
use crate::domain::policy::RationPolicy;
use crate::domain::targets::NutrientTargets;
use crate::domain::types::Nutrient;
use std::fmt;

/// 矩阵第 0 行为质量平衡（全 1）,其后按 Nutrient::ALL 顺序
const MASS_ROW: usize = 0;
const MATRIX_ROWS: usize = 1 + Nutrient::ALL.len();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSense {
    Eq,
    Ge,
    Le,
}

/// 约束来源（用于日志与诊断）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    MassBalance,
    NutrientMin(Nutrient),
    NutrientMax(Nutrient),
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::MassBalance => write!(f, "mass_balance"),
            ConstraintKind::NutrientMin(n) => write!(f, "min_{}", n.field_name()),
            ConstraintKind::NutrientMax(n) => write!(f, "max_{}", n.field_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintRow {
    pub kind: ConstraintKind,
    pub matrix_row: usize, // 系数所在矩阵行
    pub sense: RowSense,
    pub rhs: f64,
}

// ==========================================
// LpModel - 线性规划模型
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct LpModel {
    costs: Vec<f64>,
    upper_bounds: Vec<f64>,
    matrix: Vec<f64>, // MATRIX_ROWS × n, 行优先
    rows: Vec<ConstraintRow>,
}

impl LpModel {
    /// 构建模型
    ///
    /// # 参数
    /// - eligible: 已按策略筛选的可选原料目录
    /// - targets: 营养目标（已校验）
    /// - policy: 配方策略（已校验）
    pub fn build(eligible: &Catalog, targets: &NutrientTargets, policy: &RationPolicy) -> Self {
        let n = eligible.size();
        let mut costs = Vec::with_capacity(n);
        let mut upper_bounds = Vec::with_capacity(n);
        let mut matrix = vec![0.0; MATRIX_ROWS * n];

        for (col, ingredient) in eligible.iter().enumerate() {
            costs.push(ingredient.cost());
            upper_bounds.push(policy.cap_for(ingredient.category()).unwrap_or(f64::INFINITY));

            matrix[MASS_ROW * n + col] = 1.0;
            for nutrient in Nutrient::ALL {
                matrix[nutrient_row(nutrient) * n + col] = ingredient.nutrient(nutrient);
            }
        }

        let mut rows = vec![ConstraintRow {
            kind: ConstraintKind::MassBalance,
            matrix_row: MASS_ROW,
            sense: RowSense::Eq,
            rhs: 1.0,
        }];

        for nutrient in Nutrient::ALL {
            let min = targets.min(nutrient);
            if min > 0.0 {
                rows.push(ConstraintRow {
                    kind: ConstraintKind::NutrientMin(nutrient),
                    matrix_row: nutrient_row(nutrient),
                    sense: RowSense::Ge,
                    rhs: min,
                });
            }

            if let Some(max) = effective_max(targets, policy, nutrient) {
                rows.push(ConstraintRow {
                    kind: ConstraintKind::NutrientMax(nutrient),
                    matrix_row: nutrient_row(nutrient),
                    sense: RowSense::Le,
                    rhs: max,
                });
            }
        }

        Self {
            costs,
            upper_bounds,
            matrix,
            rows,
        }
    }

    pub fn num_vars(&self) -> usize {
        self.costs.len()
    }

    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// 变量上界（+∞ 表示无上限）
    pub fn upper_bounds(&self) -> &[f64] {
        &self.upper_bounds
    }

    pub fn rows(&self) -> &[ConstraintRow] {
        &self.rows
    }

    /// 约束行系数
    pub fn coefficients(&self, row: &ConstraintRow) -> &[f64] {
        self.matrix_row(row.matrix_row)
    }

    /// 某营养指标在各可选原料中的含量
    pub fn nutrient_coefficients(&self, nutrient: Nutrient) -> &[f64] {
        self.matrix_row(nutrient_row(nutrient))
    }

    fn matrix_row(&self, index: usize) -> &[f64] {
        let n = self.num_vars();
        &self.matrix[index * n..(index + 1) * n]
    }
}

fn nutrient_row(nutrient: Nutrient) -> usize {
    1 + nutrient.index()
}

/// 有效上限 = min(显式上限, 下限 + 松弛量)，两者皆无则不设上限
pub fn effective_max(
    targets: &NutrientTargets,
    policy: &RationPolicy,
    nutrient: Nutrient,
) -> Option<f64> {
    let from_slack = policy
        .slack_for(nutrient)
        .map(|slack| targets.min(nutrient) + slack);

    match (targets.explicit_max(nutrient), from_slack) {
        (Some(explicit), Some(slack)) => Some(explicit.min(slack)),
        (explicit, slack) => explicit.or(slack),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient::Ingredient;
    use crate::domain::types::{Category, NutrientProfile};

    fn two_ingredient_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog
            .add_or_replace(
                Ingredient::new(
                    "Grass",
                    Category::Fodder,
                    NutrientProfile::new(8.0, 2300.0, 35.0, 0.7),
                    35.0,
                )
                .unwrap(),
            )
            .unwrap();
        catalog
            .add_or_replace(
                Ingredient::new(
                    "Premix",
                    Category::Mineral,
                    NutrientProfile::new(0.0, 0.0, 0.0, 30.0),
                    200.0,
                )
                .unwrap(),
            )
            .unwrap();
        catalog
    }

    #[test]
    fn test_build_layout() {
        let targets = NutrientTargets::new(8.0, 0.0, 0.0, 0.5);
        let model = LpModel::build(&two_ingredient_catalog(), &targets, &RationPolicy::default());

        assert_eq!(model.num_vars(), 2);
        assert_eq!(model.costs(), &[35.0, 200.0]);
        assert_eq!(model.upper_bounds()[0], f64::INFINITY);
        assert_eq!(model.upper_bounds()[1], 0.05);
        assert_eq!(model.nutrient_coefficients(Nutrient::Calcium), &[0.7, 30.0]);

        // 质量平衡 + 粗蛋白下限 + 钙下限（能量/纤维目标为 0 被省略）
        let kinds: Vec<ConstraintKind> = model.rows().iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ConstraintKind::MassBalance,
                ConstraintKind::NutrientMin(Nutrient::CrudeProtein),
                ConstraintKind::NutrientMin(Nutrient::Calcium),
            ]
        );
        assert_eq!(model.coefficients(&model.rows()[0]), &[1.0, 1.0]);
    }

    #[test]
    fn test_build_adds_max_rows() {
        let targets = NutrientTargets::new(16.0, 0.0, 10.0, 0.0).with_max_crude_protein(19.0);
        let policy = RationPolicy::default()
            .with_protein_slack(4.0)
            .with_fibre_slack(8.0);
        let model = LpModel::build(&two_ingredient_catalog(), &targets, &policy);

        let max_rows: Vec<&ConstraintRow> = model
            .rows()
            .iter()
            .filter(|r| r.sense == RowSense::Le)
            .collect();
        assert_eq!(max_rows.len(), 2);
        assert_eq!(max_rows[0].kind, ConstraintKind::NutrientMax(Nutrient::CrudeProtein));
        assert_eq!(max_rows[0].rhs, 19.0);
        assert_eq!(max_rows[1].kind, ConstraintKind::NutrientMax(Nutrient::Fibre));
        assert_eq!(max_rows[1].rhs, 18.0);
    }

    #[test]
    fn test_effective_max_combinations() {
        let targets = NutrientTargets::new(16.0, 0.0, 10.0, 0.0);
        let policy = RationPolicy::default();
        assert_eq!(effective_max(&targets, &policy, Nutrient::CrudeProtein), None);

        let with_slack = policy.clone().with_protein_slack(4.0);
        assert_eq!(
            effective_max(&targets, &with_slack, Nutrient::CrudeProtein),
            Some(20.0)
        );

        let explicit = targets.clone().with_max_crude_protein(22.0);
        assert_eq!(
            effective_max(&explicit, &with_slack, Nutrient::CrudeProtein),
            Some(20.0)
        );
        assert_eq!(effective_max(&explicit, &with_slack, Nutrient::Energy), None);
    }
}
