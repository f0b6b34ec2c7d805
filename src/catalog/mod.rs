// ==========================================
// 饲料配方优化系统 - 原料目录层
// ==========================================
// 职责: 已校验、去重的原料目录（有序）
// 红线: 批量合并要么全部成功,要么整体拒绝（不做部分合并）
// 红线: 名称区分大小写,后写覆盖先写
// ==========================================

pub mod defaults;
pub mod validator;

pub use validator::{RowValidation, RowValidator};

use crate::domain::error::{RowIssue, ValidationError};
use crate::domain::ingredient::{Ingredient, IngredientRow};
use crate::domain::types::Category;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

// ==========================================
// MergeReport - 批量合并结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MergeReport {
    pub inserted: usize,        // 新增原料数
    pub replaced: usize,        // 覆盖原料数
    pub warnings: Vec<RowIssue>, // 非阻断问题（如类别无法识别）
}

// ==========================================
// Catalog - 原料目录
// ==========================================
// 存储: 连续数组 + 名称索引
// 顺序: 插入顺序; 覆盖时保留原位置
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<Ingredient>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 默认原料表
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        for ingredient in defaults::default_ingredients() {
            catalog.insert_validated(ingredient);
        }
        catalog
    }

    /// 由表格行构建全新目录（编辑表格后整体保存）
    pub fn from_rows(rows: &[IngredientRow]) -> Result<(Self, MergeReport), ValidationError> {
        let mut catalog = Self::new();
        let report = catalog.merge_from(rows)?;
        Ok((catalog, report))
    }

    /// 插入或覆盖原料
    ///
    /// # 返回
    /// - Ok(Some(旧原料)): 覆盖
    /// - Ok(None): 新增
    /// - Err(ValidationError::EmptyName): 名称为空
    pub fn add_or_replace(
        &mut self,
        ingredient: Ingredient,
    ) -> Result<Option<Ingredient>, ValidationError> {
        ingredient.validate()?;
        Ok(self.insert_validated(ingredient))
    }

    /// 批量合并（如上传表格）
    ///
    /// # 流程
    /// 1. 整批校验（必填字段/数值/非负/名称非空且批内唯一）
    /// 2. 存在任一 ERROR → 整批拒绝,目录不变
    /// 3. 否则逐行覆盖同名原料或追加到末尾
    pub fn merge_from(&mut self, rows: &[IngredientRow]) -> Result<MergeReport, ValidationError> {
        let validation = RowValidator::validate(rows);
        if validation.has_errors() {
            let (errors, _) = validation.split_issues();
            warn!(
                rows = rows.len(),
                error_count = errors.len(),
                "原料批量合并被拒绝"
            );
            return Err(ValidationError::Rejected(errors));
        }

        let RowValidation { accepted, issues } = validation;
        let mut report = MergeReport {
            warnings: issues,
            ..MergeReport::default()
        };

        for ingredient in accepted {
            match self.insert_validated(ingredient) {
                Some(_) => report.replaced += 1,
                None => report.inserted += 1,
            }
        }

        debug!(
            inserted = report.inserted,
            replaced = report.replaced,
            size = self.size(),
            "原料批量合并完成"
        );
        Ok(report)
    }

    /// 删除原料（保持其余原料顺序）
    pub fn remove(&mut self, name: &str) -> Option<Ingredient> {
        let position = self.index.remove(name)?;
        let removed = self.entries.remove(position);
        for slot in self.index.values_mut() {
            if *slot > position {
                *slot -= 1;
            }
        }
        Some(removed)
    }

    /// 按类别筛选子目录（纯读取）
    pub fn filter_by_categories(&self, categories: &HashSet<Category>) -> Catalog {
        let mut filtered = Catalog::new();
        for ingredient in self.entries.iter().filter(|i| categories.contains(&i.category())) {
            filtered.insert_validated(ingredient.clone());
        }
        filtered
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|i| i.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Ingredient> {
        self.index.get(name).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ingredient> {
        self.entries.iter()
    }

    /// 转为表格行（编辑/导出）
    pub fn to_rows(&self) -> Vec<IngredientRow> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, ingredient)| IngredientRow::from_ingredient(i + 2, ingredient))
            .collect()
    }

    fn insert_validated(&mut self, ingredient: Ingredient) -> Option<Ingredient> {
        match self.index.get(ingredient.name()) {
            Some(&pos) => Some(std::mem::replace(&mut self.entries[pos], ingredient)),
            None => {
                self.index
                    .insert(ingredient.name().to_string(), self.entries.len());
                self.entries.push(ingredient);
                None
            }
        }
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Ingredient;
    type IntoIter = std::slice::Iter<'a, Ingredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
