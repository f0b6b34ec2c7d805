use crate::domain::error::ConfigurationError;
use crate::domain::policy::RationPolicy;
use crate::domain::targets::NutrientTargets;
use crate::engine::optimizer::OptimizerSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 畜种（决定默认营养目标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Rabbit,
    Poultry,
    Cattle,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Rabbit, Species::Poultry, Species::Cattle];

    /// 默认营养目标（粗蛋白 %, 代谢能 kcal/kg, 粗纤维 %, 钙 %）
    pub fn default_targets(&self) -> NutrientTargets {
        match self {
            Species::Rabbit => NutrientTargets::new(16.0, 2500.0, 10.0, 0.5),
            Species::Poultry | Species::Cattle => NutrientTargets::new(18.0, 3000.0, 0.0, 0.0),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Rabbit => "rabbit",
            Species::Poultry => "poultry",
            Species::Cattle => "cattle",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("未知畜种: {}（可选 rabbit/poultry/cattle）", s))
    }
}

/// 配方方案（持久化对象）
///
/// 存储位置：JSON 文件,路径由 ConfigManager 解析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulationProfile {
    /// 畜种
    pub species: Species,

    /// 营养目标（缺省时取畜种默认值）
    #[serde(default)]
    pub targets: Option<NutrientTargets>,

    /// 配方策略
    #[serde(default)]
    pub policy: RationPolicy,

    /// 引擎参数
    #[serde(default)]
    pub settings: OptimizerSettings,
}

impl FormulationProfile {
    /// 畜种预设
    pub fn preset(species: Species) -> Self {
        Self {
            species,
            targets: Some(species.default_targets()),
            policy: RationPolicy::default(),
            settings: OptimizerSettings::default(),
        }
    }

    /// 实际使用的营养目标
    pub fn effective_targets(&self) -> NutrientTargets {
        self.targets
            .clone()
            .unwrap_or_else(|| self.species.default_targets())
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.effective_targets().validate()?;
        self.policy.validate()?;
        self.settings.validate()
    }
}

impl Default for FormulationProfile {
    fn default() -> Self {
        Self::preset(Species::Rabbit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::policy::Eligibility;
    use crate::domain::types::Nutrient;

    #[test]
    fn test_species_presets() {
        let rabbit = Species::Rabbit.default_targets();
        assert_eq!(rabbit.min(Nutrient::CrudeProtein), 16.0);
        assert_eq!(rabbit.min(Nutrient::Calcium), 0.5);

        let cattle = Species::Cattle.default_targets();
        assert_eq!(cattle.min(Nutrient::Energy), 3000.0);
        assert_eq!(cattle.min(Nutrient::Fibre), 0.0);
    }

    #[test]
    fn test_species_from_str() {
        assert_eq!("Poultry".parse::<Species>(), Ok(Species::Poultry));
        assert!("goat".parse::<Species>().is_err());
    }

    #[test]
    fn test_minimal_profile_json() {
        let profile: FormulationProfile =
            serde_json::from_str(r#"{"species":"cattle","policy":{"eligibility":{"mode":"concentrate_only"}}}"#)
                .unwrap();
        assert_eq!(profile.targets, None);
        assert_eq!(profile.effective_targets(), Species::Cattle.default_targets());
        assert_eq!(profile.policy.eligibility, Eligibility::ConcentrateOnly);
        assert_eq!(profile.settings, OptimizerSettings::default());
        assert!(profile.validate().is_ok());
    }
}
