// ==========================================
// 饲料配方优化系统 - 配方结果
// ==========================================
// 职责: 优化结果（最优配方 / 无可行解报告）
// 红线: Ration 只由成功的优化产生,产生后不可修改
// 红线: 无可行解是正常结果值,不是错误
// ==========================================

use crate::domain::types::{Category, Nutrient, NutrientProfile};
use serde::{Deserialize, Serialize};

// ==========================================
// RationLine - 配方明细行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationLine {
    pub ingredient: String,
    pub category: Category,
    pub proportion: f64,        // 质量分数 (0..=1)
    pub cost_contribution: f64, // proportion × cost
}

// ==========================================
// Ration - 最优配方
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ration {
    lines: Vec<RationLine>,
    total_cost_per_unit_mass: f64,
    nutrient_totals: NutrientProfile,
    display_epsilon: f64,
}

impl Ration {
    /// 仅供优化引擎构造
    pub(crate) fn new(
        lines: Vec<RationLine>,
        total_cost_per_unit_mass: f64,
        nutrient_totals: NutrientProfile,
        display_epsilon: f64,
    ) -> Self {
        Self {
            lines,
            total_cost_per_unit_mass,
            nutrient_totals,
            display_epsilon,
        }
    }

    /// 全部可选原料的比例（含近似为 0 的项,按目录顺序）
    pub fn lines(&self) -> &[RationLine] {
        &self.lines
    }

    /// 显示用明细: 丢弃低于显示阈值的比例
    pub fn significant_lines(&self) -> impl Iterator<Item = &RationLine> {
        let epsilon = self.display_epsilon;
        self.lines.iter().filter(move |l| l.proportion >= epsilon)
    }

    pub fn proportion_of(&self, ingredient: &str) -> Option<f64> {
        self.lines
            .iter()
            .find(|l| l.ingredient == ingredient)
            .map(|l| l.proportion)
    }

    pub fn proportion_sum(&self) -> f64 {
        self.lines.iter().map(|l| l.proportion).sum()
    }

    /// 单位质量总成本（来自目标函数值）
    pub fn total_cost_per_unit_mass(&self) -> f64 {
        self.total_cost_per_unit_mass
    }

    /// 由比例重新计算的营养合计
    pub fn nutrient_totals(&self) -> &NutrientProfile {
        &self.nutrient_totals
    }

    pub fn nutrient_total(&self, nutrient: Nutrient) -> f64 {
        self.nutrient_totals.get(nutrient)
    }

    pub fn display_epsilon(&self) -> f64 {
        self.display_epsilon
    }

    /// 原料成本占比（总成本为 0 时返回 0）
    pub fn cost_share(&self, ingredient: &str) -> Option<f64> {
        let line = self.lines.iter().find(|l| l.ingredient == ingredient)?;
        if self.total_cost_per_unit_mass <= f64::EPSILON {
            return Some(0.0);
        }
        Some(line.cost_contribution / self.total_cost_per_unit_mass)
    }

    /// 类别比例合计（用于饼图/报表）
    pub fn category_share(&self, category: Category) -> f64 {
        self.lines
            .iter()
            .filter(|l| l.category == category)
            .map(|l| l.proportion)
            .sum()
    }
}

// ==========================================
// InfeasibleReason - 无可行解原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InfeasibleReason {
    NoEligibleIngredients, // 策略过滤后无可选原料
    Infeasible,            // 约束集合无可行点
    Unbounded,             // 目标无界（正常输入下不应出现）
}

// ==========================================
// NutrientShortfall - 单项营养不可达诊断
// ==========================================
// 目标下限高于任一可选原料的含量,任何混合都无法达到
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutrientShortfall {
    pub nutrient: Nutrient,
    pub target: f64,
    pub best_available: f64,
}

// ==========================================
// InfeasibleReport - 无可行解报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfeasibleReport {
    pub reason: InfeasibleReason,
    pub eligible_count: usize,
    pub shortfalls: Vec<NutrientShortfall>,
}

impl InfeasibleReport {
    /// 面向用户的处理建议
    pub fn hint(&self) -> String {
        match self.reason {
            InfeasibleReason::NoEligibleIngredients => {
                "当前策略下没有可选原料，请放宽类别筛选或添加原料".to_string()
            }
            InfeasibleReason::Unbounded => "目标函数无界，请检查原料成本".to_string(),
            InfeasibleReason::Infeasible if !self.shortfalls.is_empty() => {
                let names: Vec<String> = self
                    .shortfalls
                    .iter()
                    .map(|s| format!("{}（目标 {} > 最高 {}）", s.nutrient, s.target, s.best_available))
                    .collect();
                format!("以下营养目标无法达到: {}", names.join("; "))
            }
            InfeasibleReason::Infeasible => {
                "约束无可行解，请降低营养目标、放宽类别上限或添加原料".to_string()
            }
        }
    }
}

// ==========================================
// OptimizationOutcome - 优化结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OptimizationOutcome {
    Optimal(Ration),
    Infeasible(InfeasibleReport),
}

impl OptimizationOutcome {
    pub fn is_optimal(&self) -> bool {
        matches!(self, OptimizationOutcome::Optimal(_))
    }

    pub fn ration(&self) -> Option<&Ration> {
        match self {
            OptimizationOutcome::Optimal(ration) => Some(ration),
            OptimizationOutcome::Infeasible(_) => None,
        }
    }

    pub fn into_ration(self) -> Option<Ration> {
        match self {
            OptimizationOutcome::Optimal(ration) => Some(ration),
            OptimizationOutcome::Infeasible(_) => None,
        }
    }

    pub fn infeasible_report(&self) -> Option<&InfeasibleReport> {
        match self {
            OptimizationOutcome::Optimal(_) => None,
            OptimizationOutcome::Infeasible(report) => Some(report),
        }
    }
}
