// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use feed_ration::catalog::Catalog;
use feed_ration::domain::{Category, Ingredient, NutrientProfile};

// ==========================================
// Ingredient 构建器
// ==========================================

pub struct IngredientBuilder {
    name: String,
    category: Category,
    crude_protein: f64,
    energy: f64,
    fibre: f64,
    calcium: f64,
    cost: f64,
}

impl IngredientBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            category: Category::Unclassified,
            crude_protein: 0.0,
            energy: 0.0,
            fibre: 0.0,
            calcium: 0.0,
            cost: 0.0,
        }
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn protein(mut self, value: f64) -> Self {
        self.crude_protein = value;
        self
    }

    pub fn energy(mut self, value: f64) -> Self {
        self.energy = value;
        self
    }

    pub fn fibre(mut self, value: f64) -> Self {
        self.fibre = value;
        self
    }

    pub fn calcium(mut self, value: f64) -> Self {
        self.calcium = value;
        self
    }

    pub fn cost(mut self, value: f64) -> Self {
        self.cost = value;
        self
    }

    pub fn build(self) -> Ingredient {
        Ingredient::new(
            self.name,
            self.category,
            NutrientProfile::new(self.crude_protein, self.energy, self.fibre, self.calcium),
            self.cost,
        )
        .expect("构建测试原料失败")
    }
}

// ==========================================
// Catalog 构建器
// ==========================================

#[derive(Default)]
pub struct CatalogBuilder {
    ingredients: Vec<Ingredient>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ingredient: IngredientBuilder) -> Self {
        self.ingredients.push(ingredient.build());
        self
    }

    pub fn build(self) -> Catalog {
        let mut catalog = Catalog::new();
        for ingredient in self.ingredients {
            catalog.add_or_replace(ingredient).expect("加入测试原料失败");
        }
        catalog
    }
}

/// 参考用例: A（无营养,10/kg）+ B（粗蛋白 100,100/kg）
pub fn two_ingredient_catalog() -> Catalog {
    CatalogBuilder::new()
        .with(IngredientBuilder::new("A").cost(10.0))
        .with(IngredientBuilder::new("B").protein(100.0).cost(100.0))
        .build()
}
