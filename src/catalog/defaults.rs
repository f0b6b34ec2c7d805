// ==========================================
// 饲料配方优化系统 - 默认原料表
// ==========================================
// 来源: 尼日利亚家兔饲料常用原料（粗蛋白 %, 代谢能 kcal/kg, 粗纤维 %, 钙 %, 单价 ₦/kg）
// ==========================================

use crate::domain::ingredient::Ingredient;
use crate::domain::types::{Category, NutrientProfile};

// (名称, 类别, 粗蛋白, 代谢能, 粗纤维, 钙, 单价)
const DEFAULT_TABLE: [(&str, Category, f64, f64, f64, f64, f64); 12] = [
    ("Alfalfa", Category::Fodder, 18.0, 2300.0, 25.0, 1.5, 80.0),
    ("Maize", Category::Concentrate, 9.0, 3400.0, 2.0, 0.02, 120.0),
    ("Soybean Meal", Category::Concentrate, 44.0, 3200.0, 7.0, 0.3, 150.0),
    ("Wheat Bran", Category::Concentrate, 15.0, 1800.0, 10.0, 0.1, 90.0),
    ("Groundnut Cake", Category::Concentrate, 45.0, 3000.0, 6.0, 0.25, 130.0),
    ("Cassava Peel", Category::Concentrate, 3.0, 2800.0, 15.0, 0.1, 50.0),
    ("Sweet Potato Vine", Category::Fodder, 13.0, 2300.0, 20.0, 1.2, 60.0),
    ("Guinea Grass", Category::Fodder, 9.0, 2400.0, 30.0, 0.5, 30.0),
    ("Elephant Grass", Category::Fodder, 8.0, 2300.0, 35.0, 0.7, 35.0),
    ("Centro", Category::Fodder, 17.0, 2000.0, 28.0, 1.4, 40.0),
    ("Stylosanthes", Category::Fodder, 14.0, 2200.0, 25.0, 1.2, 38.0),
    ("Leucaena", Category::Fodder, 26.0, 2400.0, 22.0, 1.3, 45.0),
];

/// 默认原料列表（按表顺序）
pub fn default_ingredients() -> Vec<Ingredient> {
    DEFAULT_TABLE
        .iter()
        .filter_map(|&(name, category, cp, energy, fibre, calcium, cost)| {
            Ingredient::new(
                name,
                category,
                NutrientProfile::new(cp, energy, fibre, calcium),
                cost,
            )
            .ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_is_complete() {
        let ingredients = default_ingredients();
        assert_eq!(ingredients.len(), DEFAULT_TABLE.len());
        assert_eq!(ingredients[0].name(), "Alfalfa");
        assert_eq!(
            ingredients
                .iter()
                .filter(|i| i.category() == Category::Concentrate)
                .count(),
            5
        );
    }
}
