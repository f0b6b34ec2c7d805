// ==========================================
// 饲料配方优化系统 - 领域类型定义
// ==========================================
// 职责: 原料类别、营养指标、营养含量向量
// 红线: 类别上限作为数据挂在枚举上,不做字符串分支判断
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 原料类别 (Category)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Fodder,       // 粗饲料/青饲料
    Concentrate,  // 精饲料
    Mineral,      // 矿物质
    Additive,     // 添加剂
    Unclassified, // 未分类
}

impl Category {
    /// 全部类别（固定顺序）
    pub const ALL: [Category; 5] = [
        Category::Fodder,
        Category::Concentrate,
        Category::Mineral,
        Category::Additive,
        Category::Unclassified,
    ];

    /// 默认单原料最大添加比例
    ///
    /// # 默认值
    /// - Mineral: 0.05
    /// - Additive: 0.02
    /// - Concentrate: 0.60
    /// - 其他: 无上限
    pub fn default_cap(self) -> Option<f64> {
        match self {
            Category::Mineral => Some(0.05),
            Category::Additive => Some(0.02),
            Category::Concentrate => Some(0.60),
            Category::Fodder | Category::Unclassified => None,
        }
    }

    /// 从表格文本解析类别（不区分大小写）
    ///
    /// # 返回
    /// - Some(Category): 可识别（空白视为 Unclassified）
    /// - None: 无法识别
    pub fn parse(text: &str) -> Option<Category> {
        let normalized = text.trim().to_lowercase();
        match normalized.as_str() {
            "" | "unclassified" | "other" => Some(Category::Unclassified),
            "fodder" | "forage" | "roughage" => Some(Category::Fodder),
            "concentrate" => Some(Category::Concentrate),
            "mineral" | "minerals" => Some(Category::Mineral),
            "additive" | "additives" => Some(Category::Additive),
            _ => None,
        }
    }

    /// 表格导出时使用的标签
    pub fn label(self) -> &'static str {
        match self {
            Category::Fodder => "Fodder",
            Category::Concentrate => "Concentrate",
            Category::Mineral => "Mineral",
            Category::Additive => "Additive",
            Category::Unclassified => "Unclassified",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 营养指标 (Nutrient)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    CrudeProtein, // 粗蛋白 (%)
    Energy,       // 代谢能 (kcal/kg)
    Fibre,        // 粗纤维 (%)
    Calcium,      // 钙 (%)
}

impl Nutrient {
    /// 全部营养指标（与 NutrientProfile 内部数组顺序一致）
    pub const ALL: [Nutrient; 4] = [
        Nutrient::CrudeProtein,
        Nutrient::Energy,
        Nutrient::Fibre,
        Nutrient::Calcium,
    ];

    /// 在营养向量中的下标
    pub fn index(self) -> usize {
        match self {
            Nutrient::CrudeProtein => 0,
            Nutrient::Energy => 1,
            Nutrient::Fibre => 2,
            Nutrient::Calcium => 3,
        }
    }

    /// 字段名（用于校验报告与表头）
    pub fn field_name(self) -> &'static str {
        match self {
            Nutrient::CrudeProtein => "crude_protein",
            Nutrient::Energy => "energy",
            Nutrient::Fibre => "fibre",
            Nutrient::Calcium => "calcium",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Nutrient::Energy => "kcal/kg",
            _ => "%",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nutrient::CrudeProtein => write!(f, "粗蛋白"),
            Nutrient::Energy => write!(f, "代谢能"),
            Nutrient::Fibre => write!(f, "粗纤维"),
            Nutrient::Calcium => write!(f, "钙"),
        }
    }
}

// ==========================================
// NutrientProfile - 营养含量向量
// ==========================================
// 用途: 原料营养含量 / 配方营养合计
// 存储: 定长数组,按 Nutrient::index() 寻址
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NutrientProfile {
    pub crude_protein: f64,
    pub energy: f64,
    pub fibre: f64,
    pub calcium: f64,
}

impl NutrientProfile {
    pub fn new(crude_protein: f64, energy: f64, fibre: f64, calcium: f64) -> Self {
        Self {
            crude_protein,
            energy,
            fibre,
            calcium,
        }
    }

    pub fn get(&self, nutrient: Nutrient) -> f64 {
        self.to_array()[nutrient.index()]
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.crude_protein, self.energy, self.fibre, self.calcium]
    }

    pub fn from_array(values: [f64; 4]) -> Self {
        Self::new(values[0], values[1], values[2], values[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_case_insensitive() {
        assert_eq!(Category::parse(" fodder "), Some(Category::Fodder));
        assert_eq!(Category::parse("CONCENTRATE"), Some(Category::Concentrate));
        assert_eq!(Category::parse(""), Some(Category::Unclassified));
        assert_eq!(Category::parse("grain?"), None);
    }

    #[test]
    fn test_category_default_caps() {
        assert_eq!(Category::Mineral.default_cap(), Some(0.05));
        assert_eq!(Category::Additive.default_cap(), Some(0.02));
        assert_eq!(Category::Concentrate.default_cap(), Some(0.60));
        assert_eq!(Category::Fodder.default_cap(), None);
        assert_eq!(Category::Unclassified.default_cap(), None);
    }

    #[test]
    fn test_nutrient_profile_indexing() {
        let profile = NutrientProfile::new(18.0, 2300.0, 25.0, 1.5);
        for nutrient in Nutrient::ALL {
            assert_eq!(profile.get(nutrient), profile.to_array()[nutrient.index()]);
        }
        assert_eq!(profile.get(Nutrient::Energy), 2300.0);
        assert_eq!(NutrientProfile::from_array(profile.to_array()), profile);
    }
}
