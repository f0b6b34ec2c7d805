// ==========================================
// 饲料配方优化系统 - 原料领域模型
// ==========================================
// 职责: 原料值对象 + 导入中间结构体
// 红线: 原料加入目录后不可变,编辑 = 整体替换
// ==========================================

use crate::domain::error::ValidationError;
use crate::domain::types::{Category, Nutrient, NutrientProfile};
use serde::{Deserialize, Serialize};

// ==========================================
// Ingredient - 原料
// ==========================================
// 主键: name（非空,目录内唯一,区分大小写）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    name: String,
    category: Category,
    nutrients: NutrientProfile,
    cost: f64, // 单价（货币/kg）
}

impl Ingredient {
    /// 创建并校验原料
    ///
    /// # 校验
    /// - name 去除首尾空白后非空
    /// - 四项营养值与 cost 均为有限非负数
    pub fn new(
        name: impl Into<String>,
        category: Category,
        nutrients: NutrientProfile,
        cost: f64,
    ) -> Result<Self, ValidationError> {
        let ingredient = Self {
            name: name.into().trim().to_string(),
            category,
            nutrients,
            cost,
        };
        ingredient.validate()?;
        Ok(ingredient)
    }

    /// 重新校验（反序列化得到的实例不经过 new）
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }

        for nutrient in Nutrient::ALL {
            check_non_negative(&self.name, nutrient.field_name(), self.nutrients.get(nutrient))?;
        }
        check_non_negative(&self.name, "cost", self.cost)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn nutrients(&self) -> &NutrientProfile {
        &self.nutrients
    }

    pub fn nutrient(&self, nutrient: Nutrient) -> f64 {
        self.nutrients.get(nutrient)
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}

fn check_non_negative(name: &str, field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidValue {
            name: name.to_string(),
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

// ==========================================
// IngredientRow - 导入中间结构体
// ==========================================
// 用途: 表格行（单元格原文）→ 目录批量合并
// 约定: None = 列不存在; Some("") = 单元格为空
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientRow {
    pub row_number: usize, // 原始文件行号（用于校验报告）
    pub name: Option<String>,
    pub category: Option<String>,
    pub crude_protein: Option<String>,
    pub energy: Option<String>,
    pub fibre: Option<String>,
    pub calcium: Option<String>,
    pub cost: Option<String>,
}

impl IngredientRow {
    /// 按营养指标取原始单元格
    pub fn nutrient_cell(&self, nutrient: Nutrient) -> Option<&str> {
        match nutrient {
            Nutrient::CrudeProtein => self.crude_protein.as_deref(),
            Nutrient::Energy => self.energy.as_deref(),
            Nutrient::Fibre => self.fibre.as_deref(),
            Nutrient::Calcium => self.calcium.as_deref(),
        }
    }

    /// 由已校验原料生成行（用于编辑表格/导出）
    pub fn from_ingredient(row_number: usize, ingredient: &Ingredient) -> Self {
        let n = ingredient.nutrients();
        Self {
            row_number,
            name: Some(ingredient.name().to_string()),
            category: Some(ingredient.category().label().to_string()),
            crude_protein: Some(n.crude_protein.to_string()),
            energy: Some(n.energy.to_string()),
            fibre: Some(n.fibre.to_string()),
            calcium: Some(n.calcium.to_string()),
            cost: Some(ingredient.cost().to_string()),
        }
    }
}
