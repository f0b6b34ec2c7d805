// ==========================================
// 饲料配方优化系统 - 配方历史
// ==========================================
// 职责: 记录每次优化的输入与结果摘要（调用方持有,无全局状态）
// 容量: 有界,超出后丢弃最旧记录
// ==========================================

use crate::domain::policy::RationPolicy;
use crate::domain::ration::OptimizationOutcome;
use crate::domain::targets::NutrientTargets;
use crate::domain::types::NutrientProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

// ==========================================
// FormulationRecord - 单次配方记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulationRecord {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub label: String,
    pub targets: NutrientTargets,
    pub policy: RationPolicy,
    pub feasible: bool,
    pub total_cost: Option<f64>,                 // 无可行解时为 None
    pub nutrient_totals: Option<NutrientProfile>, // 无可行解时为 None
    pub ingredient_count: usize,                  // 显示阈值以上的原料数
}

impl FormulationRecord {
    pub fn from_outcome(
        label: impl Into<String>,
        targets: &NutrientTargets,
        policy: &RationPolicy,
        outcome: &OptimizationOutcome,
    ) -> Self {
        let ration = outcome.ration();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            label: label.into(),
            targets: targets.clone(),
            policy: policy.clone(),
            feasible: ration.is_some(),
            total_cost: ration.map(|r| r.total_cost_per_unit_mass()),
            nutrient_totals: ration.map(|r| *r.nutrient_totals()),
            ingredient_count: ration.map_or(0, |r| r.significant_lines().count()),
        }
    }
}

// ==========================================
// FormulationHistory - 配方历史（按时间先后,最新在末尾）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormulationHistory {
    capacity: usize,
    records: VecDeque<FormulationRecord>,
}

impl Default for FormulationHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl FormulationHistory {
    /// 容量至少为 1
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            records: VecDeque::with_capacity(capacity),
        }
    }

    /// 追加记录,返回被挤出的最旧记录
    pub fn record(&mut self, record: FormulationRecord) -> Option<FormulationRecord> {
        let evicted = if self.records.len() == self.capacity {
            self.records.pop_front()
        } else {
            None
        };
        self.records.push_back(record);
        evicted
    }

    pub fn records(&self) -> impl Iterator<Item = &FormulationRecord> {
        self.records.iter()
    }

    pub fn latest(&self) -> Option<&FormulationRecord> {
        self.records.back()
    }

    /// 成本最低的可行记录
    pub fn cheapest(&self) -> Option<&FormulationRecord> {
        self.records
            .iter()
            .filter_map(|r| r.total_cost.map(|cost| (cost, r)))
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, r)| r)
    }

    pub fn find(&self, id: Uuid) -> Option<&FormulationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ration::{InfeasibleReason, InfeasibleReport};

    fn infeasible_record(label: &str) -> FormulationRecord {
        let outcome = OptimizationOutcome::Infeasible(InfeasibleReport {
            reason: InfeasibleReason::Infeasible,
            eligible_count: 3,
            shortfalls: Vec::new(),
        });
        FormulationRecord::from_outcome(
            label,
            &NutrientTargets::default(),
            &RationPolicy::default(),
            &outcome,
        )
    }

    fn costed_record(label: &str, cost: f64) -> FormulationRecord {
        FormulationRecord {
            feasible: true,
            total_cost: Some(cost),
            ..infeasible_record(label)
        }
    }

    #[test]
    fn test_record_from_infeasible_outcome() {
        let record = infeasible_record("rabbit");
        assert!(!record.feasible);
        assert_eq!(record.total_cost, None);
        assert_eq!(record.ingredient_count, 0);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut history = FormulationHistory::with_capacity(2);
        assert!(history.record(costed_record("a", 10.0)).is_none());
        assert!(history.record(costed_record("b", 20.0)).is_none());
        let evicted = history.record(costed_record("c", 30.0));

        assert_eq!(evicted.map(|r| r.label), Some("a".to_string()));
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().label, "c");
    }

    #[test]
    fn test_cheapest_skips_infeasible() {
        let mut history = FormulationHistory::default();
        history.record(costed_record("mid", 50.0));
        history.record(infeasible_record("none"));
        history.record(costed_record("low", 20.0));

        assert_eq!(history.cheapest().unwrap().label, "low");
        let id = history.latest().unwrap().id;
        assert!(history.find(id).is_some());

        history.clear();
        assert!(history.is_empty());
        assert!(history.cheapest().is_none());
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut history = FormulationHistory::with_capacity(0);
        history.record(costed_record("a", 1.0));
        history.record(costed_record("b", 1.0));
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.len(), 1);
    }
}
