// ==========================================
// 饲料配方优化系统 - 配方优化引擎
// ==========================================
// 职责: 校验配置 → 筛选可选原料 → 构建 LP → 求解 → 提取配方
// 输入: 原料目录快照 + 营养目标 + 配方策略（可选）
// 输出: OptimizationOutcome（最优配方 / 无可行解报告）
// ==========================================
// 红线: 无可行解是正常结果值,不抛错误
// 红线: 营养合计由比例重新计算,不读取求解器松弛量
// 红线: 不重试（同一输入求解结果确定）
// ==========================================

use crate::catalog::Catalog;
use crate::domain::error::ConfigurationError;
use crate::domain::policy::RationPolicy;
use crate::domain::ration::{
    InfeasibleReason, InfeasibleReport, NutrientShortfall, OptimizationOutcome, Ration, RationLine,
};
use crate::domain::targets::NutrientTargets;
use crate::domain::types::{Nutrient, NutrientProfile};
use crate::engine::lp_model::LpModel;
use crate::engine::solver::{LpSolver, MinilpSolver, SolveStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// 可达性诊断容差
const SHORTFALL_TOLERANCE: f64 = 1e-9;

// ==========================================
// OptimizerSettings - 引擎参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSettings {
    /// 显示阈值: 低于此比例的原料不在明细中显示
    #[serde(default = "default_display_epsilon")]
    pub display_epsilon: f64,

    /// 可选原料数量上限（限制单次求解规模）
    #[serde(default = "default_max_ingredients")]
    pub max_ingredients: usize,
}

fn default_display_epsilon() -> f64 {
    1e-4
}

fn default_max_ingredients() -> usize {
    500
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            display_epsilon: default_display_epsilon(),
            max_ingredients: default_max_ingredients(),
        }
    }
}

impl OptimizerSettings {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !(self.display_epsilon > 0.0 && self.display_epsilon < 1.0) {
            return Err(ConfigurationError::InvalidEpsilon(self.display_epsilon));
        }
        Ok(())
    }
}

// ==========================================
// RationOptimizer - 配方优化引擎
// ==========================================
pub struct RationOptimizer<S = MinilpSolver> {
    solver: S,
    settings: OptimizerSettings,
}

impl RationOptimizer<MinilpSolver> {
    /// 默认后端 + 默认参数
    pub fn new() -> Self {
        Self::with_settings(OptimizerSettings::default())
    }

    pub fn with_settings(settings: OptimizerSettings) -> Self {
        Self {
            solver: MinilpSolver,
            settings,
        }
    }
}

impl Default for RationOptimizer<MinilpSolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: LpSolver> RationOptimizer<S> {
    /// 指定求解后端
    pub fn with_solver(solver: S, settings: OptimizerSettings) -> Self {
        Self { solver, settings }
    }

    pub fn settings(&self) -> &OptimizerSettings {
        &self.settings
    }

    /// 求解最低成本配方
    ///
    /// # 参数
    /// - catalog: 原料目录（只读快照）
    /// - targets: 营养目标
    /// - policy: 配方策略（None 使用默认策略）
    ///
    /// # 返回
    /// - Ok(OptimizationOutcome::Optimal): 最优配方
    /// - Ok(OptimizationOutcome::Infeasible): 无可行解（正常结果）
    /// - Err(ConfigurationError): 目标/策略/参数非法,未构建 LP
    #[instrument(skip_all, fields(catalog_size = catalog.size(), solver = self.solver.name()))]
    pub fn optimize(
        &self,
        catalog: &Catalog,
        targets: &NutrientTargets,
        policy: Option<&RationPolicy>,
    ) -> Result<OptimizationOutcome, ConfigurationError> {
        let default_policy;
        let policy = match policy {
            Some(p) => p,
            None => {
                default_policy = RationPolicy::default();
                &default_policy
            }
        };

        // === 步骤 1: 配置校验 ===
        self.settings.validate()?;
        targets.validate()?;
        policy.validate()?;

        // === 步骤 2: 按策略筛选可选原料 ===
        let categories: HashSet<_> = policy.eligibility.categories().into_iter().collect();
        let eligible = catalog.filter_by_categories(&categories);

        if eligible.is_empty() {
            info!("策略筛选后无可选原料");
            return Ok(OptimizationOutcome::Infeasible(InfeasibleReport {
                reason: InfeasibleReason::NoEligibleIngredients,
                eligible_count: 0,
                shortfalls: Vec::new(),
            }));
        }

        if eligible.size() > self.settings.max_ingredients {
            return Err(ConfigurationError::TooManyIngredients {
                count: eligible.size(),
                max: self.settings.max_ingredients,
            });
        }

        // === 步骤 3: 构建 LP ===
        let model = LpModel::build(&eligible, targets, policy);
        debug!(
            vars = model.num_vars(),
            constraints = model.rows().len(),
            "LP 模型构建完成"
        );

        // === 步骤 4: 求解 + 提取 ===
        let outcome = match self.solver.solve(&model) {
            SolveStatus::Optimal { values, objective } => {
                let ration = self.extract_ration(&eligible, &model, &values, objective);
                info!(
                    cost = ration.total_cost_per_unit_mass(),
                    used = ration.significant_lines().count(),
                    "配方优化成功"
                );
                OptimizationOutcome::Optimal(ration)
            }
            SolveStatus::Infeasible => {
                let report = diagnose(&eligible, &model, targets, InfeasibleReason::Infeasible);
                info!(shortfalls = report.shortfalls.len(), "配方无可行解");
                OptimizationOutcome::Infeasible(report)
            }
            SolveStatus::Unbounded => {
                warn!("LP 目标无界（质量平衡约束下不应出现）");
                OptimizationOutcome::Infeasible(diagnose(
                    &eligible,
                    &model,
                    targets,
                    InfeasibleReason::Unbounded,
                ))
            }
        };

        Ok(outcome)
    }

    /// 提取配方
    ///
    /// # 规则
    /// - 求解器数值噪声收敛到 [0, 1]
    /// - 保留全部比例（含近似为 0 的项）,显示阈值只影响 significant_lines
    /// - 总成本取目标函数值; 营养合计按比例重新加权
    fn extract_ration(
        &self,
        eligible: &Catalog,
        model: &LpModel,
        values: &[f64],
        objective: f64,
    ) -> Ration {
        let proportions: Vec<f64> = values.iter().map(|v| v.clamp(0.0, 1.0)).collect();

        let lines = eligible
            .iter()
            .zip(&proportions)
            .map(|(ingredient, &p)| RationLine {
                ingredient: ingredient.name().to_string(),
                category: ingredient.category(),
                proportion: p,
                cost_contribution: p * ingredient.cost(),
            })
            .collect();

        let mut totals = [0.0; 4];
        for nutrient in Nutrient::ALL {
            totals[nutrient.index()] = dot(model.nutrient_coefficients(nutrient), &proportions);
        }

        Ration::new(
            lines,
            objective,
            NutrientProfile::from_array(totals),
            self.settings.display_epsilon,
        )
    }
}

/// 无可行解诊断: 列出超过任一可选原料含量的营养下限
fn diagnose(
    eligible: &Catalog,
    model: &LpModel,
    targets: &NutrientTargets,
    reason: InfeasibleReason,
) -> InfeasibleReport {
    let shortfalls = Nutrient::ALL
        .into_iter()
        .filter_map(|nutrient| {
            let target = targets.min(nutrient);
            let best_available = model
                .nutrient_coefficients(nutrient)
                .iter()
                .copied()
                .fold(0.0_f64, f64::max);
            (target > best_available + SHORTFALL_TOLERANCE).then_some(NutrientShortfall {
                nutrient,
                target,
                best_available,
            })
        })
        .collect();

    InfeasibleReport {
        reason,
        eligible_count: eligible.size(),
        shortfalls,
    }
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ingredient::Ingredient;
    use crate::domain::types::Category;

    fn add(catalog: &mut Catalog, name: &str, category: Category, n: [f64; 4], cost: f64) {
        catalog
            .add_or_replace(
                Ingredient::new(name, category, NutrientProfile::from_array(n), cost).unwrap(),
            )
            .unwrap();
    }

    #[test]
    fn test_two_ingredient_reference_case() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "A", Category::Unclassified, [0.0, 0.0, 0.0, 0.0], 10.0);
        add(&mut catalog, "B", Category::Unclassified, [100.0, 0.0, 0.0, 0.0], 100.0);

        let outcome = RationOptimizer::new()
            .optimize(&catalog, &NutrientTargets::new(50.0, 0.0, 0.0, 0.0), None)
            .unwrap();
        let ration = outcome.ration().expect("应有最优解");

        assert!((ration.proportion_of("A").unwrap() - 0.5).abs() < 1e-6);
        assert!((ration.proportion_of("B").unwrap() - 0.5).abs() < 1e-6);
        assert!((ration.total_cost_per_unit_mass() - 55.0).abs() < 1e-6);
        assert!((ration.nutrient_total(Nutrient::CrudeProtein) - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_eligible_ingredients() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "Grass", Category::Fodder, [9.0, 2400.0, 30.0, 0.5], 30.0);

        let outcome = RationOptimizer::new()
            .optimize(
                &catalog,
                &NutrientTargets::default(),
                Some(&RationPolicy::concentrate_only()),
            )
            .unwrap();
        let report = outcome.infeasible_report().unwrap();
        assert_eq!(report.reason, InfeasibleReason::NoEligibleIngredients);
    }

    #[test]
    fn test_configuration_error_before_solving() {
        let catalog = Catalog::with_defaults();
        let result = RationOptimizer::new().optimize(
            &catalog,
            &NutrientTargets::new(16.0, 2500.0, 10.0, 0.5).with_max_crude_protein(10.0),
            None,
        );
        assert!(matches!(result, Err(ConfigurationError::MaxBelowMin { .. })));

        let bad_settings = OptimizerSettings {
            display_epsilon: 0.0,
            ..OptimizerSettings::default()
        };
        let result = RationOptimizer::with_settings(bad_settings).optimize(
            &catalog,
            &NutrientTargets::default(),
            None,
        );
        assert_eq!(result, Err(ConfigurationError::InvalidEpsilon(0.0)));
    }

    #[test]
    fn test_too_many_ingredients() {
        let settings = OptimizerSettings {
            max_ingredients: 3,
            ..OptimizerSettings::default()
        };
        let result = RationOptimizer::with_settings(settings).optimize(
            &Catalog::with_defaults(),
            &NutrientTargets::default(),
            None,
        );
        assert_eq!(
            result,
            Err(ConfigurationError::TooManyIngredients { count: 12, max: 3 })
        );
    }

    #[test]
    fn test_zero_everything_ingredient() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "Filler", Category::Unclassified, [0.0; 4], 0.0);

        let outcome = RationOptimizer::new()
            .optimize(&catalog, &NutrientTargets::default(), None)
            .unwrap();
        let ration = outcome.ration().unwrap();
        assert!((ration.proportion_of("Filler").unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(ration.total_cost_per_unit_mass(), 0.0);
        assert_eq!(ration.cost_share("Filler"), Some(0.0));
    }

    #[test]
    fn test_diagnose_reports_unreachable_target() {
        let mut catalog = Catalog::new();
        add(&mut catalog, "A", Category::Unclassified, [0.0; 4], 10.0);
        add(&mut catalog, "B", Category::Unclassified, [100.0, 0.0, 0.0, 0.0], 100.0);

        let outcome = RationOptimizer::new()
            .optimize(&catalog, &NutrientTargets::new(200.0, 0.0, 0.0, 0.0), None)
            .unwrap();
        let report = outcome.infeasible_report().unwrap();
        assert_eq!(report.reason, InfeasibleReason::Infeasible);
        assert_eq!(report.eligible_count, 2);
        assert_eq!(report.shortfalls.len(), 1);
        assert_eq!(report.shortfalls[0].nutrient, Nutrient::CrudeProtein);
        assert_eq!(report.shortfalls[0].best_available, 100.0);
    }
}
