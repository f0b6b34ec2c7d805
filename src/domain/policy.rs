// ==========================================
// 饲料配方优化系统 - 配方策略
// ==========================================
// 职责: 可选类别 + 类别添加上限 + 上限松弛量
// 口径: 类别上限作用于该类别下的每个原料（非类别合计）
// ==========================================

use crate::domain::error::ConfigurationError;
use crate::domain::types::{Category, Nutrient};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// Eligibility - 可选类别
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "categories", rename_all = "snake_case")]
pub enum Eligibility {
    #[default]
    All, // 混合配方（含未分类原料）
    ConcentrateOnly,
    FodderOnly,
    Categories(BTreeSet<Category>),
}

impl Eligibility {
    /// 展开为类别集合
    pub fn categories(&self) -> BTreeSet<Category> {
        match self {
            Eligibility::All => Category::ALL.into_iter().collect(),
            Eligibility::ConcentrateOnly => BTreeSet::from([Category::Concentrate]),
            Eligibility::FodderOnly => BTreeSet::from([Category::Fodder]),
            Eligibility::Categories(set) => set.clone(),
        }
    }

    pub fn admits(&self, category: Category) -> bool {
        match self {
            Eligibility::All => true,
            Eligibility::ConcentrateOnly => category == Category::Concentrate,
            Eligibility::FodderOnly => category == Category::Fodder,
            Eligibility::Categories(set) => set.contains(&category),
        }
    }
}

// ==========================================
// RationPolicy - 配方策略
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationPolicy {
    #[serde(default)]
    pub eligibility: Eligibility,

    /// 单原料最大添加比例（按类别查表）
    #[serde(default = "default_category_caps")]
    pub category_caps: BTreeMap<Category, f64>,

    /// 粗蛋白上限松弛量: 上限 = 下限 + slack
    #[serde(default)]
    pub protein_slack: Option<f64>,

    /// 粗纤维上限松弛量: 上限 = 下限 + slack
    #[serde(default)]
    pub fibre_slack: Option<f64>,
}

fn default_category_caps() -> BTreeMap<Category, f64> {
    Category::ALL
        .into_iter()
        .filter_map(|c| c.default_cap().map(|cap| (c, cap)))
        .collect()
}

impl Default for RationPolicy {
    fn default() -> Self {
        Self {
            eligibility: Eligibility::All,
            category_caps: default_category_caps(),
            protein_slack: None,
            fibre_slack: None,
        }
    }
}

impl RationPolicy {
    pub fn concentrate_only() -> Self {
        Self::default().with_eligibility(Eligibility::ConcentrateOnly)
    }

    pub fn fodder_only() -> Self {
        Self::default().with_eligibility(Eligibility::FodderOnly)
    }

    /// 不设任何类别上限
    pub fn uncapped() -> Self {
        Self {
            category_caps: BTreeMap::new(),
            ..Self::default()
        }
    }

    pub fn with_eligibility(mut self, eligibility: Eligibility) -> Self {
        self.eligibility = eligibility;
        self
    }

    pub fn with_cap(mut self, category: Category, cap: f64) -> Self {
        self.category_caps.insert(category, cap);
        self
    }

    pub fn without_cap(mut self, category: Category) -> Self {
        self.category_caps.remove(&category);
        self
    }

    pub fn with_protein_slack(mut self, slack: f64) -> Self {
        self.protein_slack = Some(slack);
        self
    }

    pub fn with_fibre_slack(mut self, slack: f64) -> Self {
        self.fibre_slack = Some(slack);
        self
    }

    pub fn cap_for(&self, category: Category) -> Option<f64> {
        self.category_caps.get(&category).copied()
    }

    pub fn slack_for(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::CrudeProtein => self.protein_slack,
            Nutrient::Fibre => self.fibre_slack,
            Nutrient::Energy | Nutrient::Calcium => None,
        }
    }

    /// 校验策略取值
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if let Eligibility::Categories(set) = &self.eligibility {
            if set.is_empty() {
                return Err(ConfigurationError::EmptyCategorySet);
            }
        }

        for (category, cap) in &self.category_caps {
            if !cap.is_finite() || !(0.0..=1.0).contains(cap) {
                return Err(ConfigurationError::InvalidCap {
                    category: category.to_string(),
                    value: *cap,
                });
            }
        }

        for (field, slack) in [("protein", self.protein_slack), ("fibre", self.fibre_slack)] {
            if let Some(value) = slack {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigurationError::InvalidSlack {
                        field: field.to_string(),
                        value,
                    });
                }
            }
        }
        Ok(())
    }
}
