// ==========================================
// 饲料配方优化系统 - 营养目标
// ==========================================
// 单位: 粗蛋白/粗纤维/钙 为 %, 代谢能 为 kcal/kg
// 红线: 引擎不做单位换算,目标与目录单位必须一致
// ==========================================

use crate::domain::error::ConfigurationError;
use crate::domain::types::{Nutrient, NutrientProfile};
use serde::{Deserialize, Serialize};

// ==========================================
// NutrientTargets - 营养目标
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientTargets {
    /// 最低需要量
    pub minimum: NutrientProfile,

    /// 粗蛋白上限（可选,防止过度配方）
    #[serde(default)]
    pub max_crude_protein: Option<f64>,

    /// 粗纤维上限（可选）
    #[serde(default)]
    pub max_fibre: Option<f64>,
}

impl NutrientTargets {
    /// 仅指定最低需要量
    pub fn new(crude_protein: f64, energy: f64, fibre: f64, calcium: f64) -> Self {
        Self {
            minimum: NutrientProfile::new(crude_protein, energy, fibre, calcium),
            max_crude_protein: None,
            max_fibre: None,
        }
    }

    pub fn with_max_crude_protein(mut self, max: f64) -> Self {
        self.max_crude_protein = Some(max);
        self
    }

    pub fn with_max_fibre(mut self, max: f64) -> Self {
        self.max_fibre = Some(max);
        self
    }

    pub fn min(&self, nutrient: Nutrient) -> f64 {
        self.minimum.get(nutrient)
    }

    /// 显式上限（仅粗蛋白与粗纤维可设置）
    pub fn explicit_max(&self, nutrient: Nutrient) -> Option<f64> {
        match nutrient {
            Nutrient::CrudeProtein => self.max_crude_protein,
            Nutrient::Fibre => self.max_fibre,
            Nutrient::Energy | Nutrient::Calcium => None,
        }
    }

    /// 校验目标取值
    ///
    /// # 规则
    /// - 所有下限为有限非负数
    /// - 上限为有限非负数且不小于对应下限
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        for nutrient in Nutrient::ALL {
            let value = self.min(nutrient);
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigurationError::InvalidTarget {
                    field: nutrient.field_name().to_string(),
                    value,
                });
            }

            if let Some(max) = self.explicit_max(nutrient) {
                if !max.is_finite() || max < 0.0 {
                    return Err(ConfigurationError::InvalidTarget {
                        field: format!("max_{}", nutrient.field_name()),
                        value: max,
                    });
                }
                if max < value {
                    return Err(ConfigurationError::MaxBelowMin {
                        field: nutrient.field_name().to_string(),
                        min: value,
                        max,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_ok() {
        let targets = NutrientTargets::new(16.0, 2500.0, 10.0, 0.5)
            .with_max_crude_protein(20.0)
            .with_max_fibre(18.0);
        assert!(targets.validate().is_ok());
        assert_eq!(targets.explicit_max(Nutrient::Energy), None);
    }

    #[test]
    fn test_validate_rejects_negative() {
        let targets = NutrientTargets::new(16.0, -1.0, 10.0, 0.5);
        assert!(matches!(
            targets.validate(),
            Err(ConfigurationError::InvalidTarget { ref field, .. }) if field == "energy"
        ));
    }

    #[test]
    fn test_validate_rejects_max_below_min() {
        let targets = NutrientTargets::new(16.0, 2500.0, 10.0, 0.5).with_max_fibre(5.0);
        assert!(matches!(
            targets.validate(),
            Err(ConfigurationError::MaxBelowMin { ref field, .. }) if field == "fibre"
        ));
    }
}
