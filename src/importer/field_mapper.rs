// ==========================================
// 饲料配方优化系统 - 字段映射器实现
// ==========================================
// 职责: 源表头（含别名）→ 标准字段
// 规范化: 去除括号内单位、忽略大小写与非字母数字字符
//   例: "Crude Protein (%)" → "crudeprotein" → crude_protein
// ==========================================

use crate::domain::ingredient::IngredientRow;
use crate::importer::file_parser::{ParsedSheet, RawRecord};
use crate::importer::ingredient_importer_trait::FieldMapper;
use std::collections::HashMap;

/// 标准字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Name,
    Category,
    CrudeProtein,
    Energy,
    Fibre,
    Calcium,
    Cost,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 7] = [
        CanonicalField::Name,
        CanonicalField::Category,
        CanonicalField::CrudeProtein,
        CanonicalField::Energy,
        CanonicalField::Fibre,
        CanonicalField::Calcium,
        CanonicalField::Cost,
    ];

    /// 导出时使用的标准表头
    pub fn header(&self) -> &'static str {
        match self {
            CanonicalField::Name => "Ingredient",
            CanonicalField::Category => "Category",
            CanonicalField::CrudeProtein => "CP",
            CanonicalField::Energy => "Energy",
            CanonicalField::Fibre => "Fibre",
            CanonicalField::Calcium => "Calcium",
            CanonicalField::Cost => "Cost",
        }
    }

    /// 规范化后的别名
    fn aliases(&self) -> &'static [&'static str] {
        match self {
            CanonicalField::Name => &["ingredient", "name", "ingredientname", "feed", "feedname"],
            CanonicalField::Category => &["category", "type", "class"],
            CanonicalField::CrudeProtein => &["cp", "crudeprotein", "protein"],
            CanonicalField::Energy => &[
                "energy",
                "me",
                "metabolizableenergy",
                "metabolisableenergy",
            ],
            CanonicalField::Fibre => &["fibre", "fiber", "crudefibre", "crudefiber", "cf"],
            CanonicalField::Calcium => &["calcium", "ca"],
            CanonicalField::Cost => &["cost", "price", "unitcost", "costperkg"],
        }
    }

    /// 根据表头识别标准字段
    pub fn from_header(header: &str) -> Option<Self> {
        let key = normalize_header(header);
        Self::ALL
            .into_iter()
            .find(|field| field.aliases().contains(&key.as_str()))
    }
}

/// 去掉括号内单位并只保留小写字母数字
fn normalize_header(header: &str) -> String {
    let base = header.split(['(', '[']).next().unwrap_or(header);
    base.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

// ==========================================
// HeaderAliasMapper - 按表头别名映射
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderAliasMapper;

impl HeaderAliasMapper {
    /// 标准字段 → 源表头（同一字段出现多列时取第一列）
    pub fn resolve_headers(&self, headers: &[String]) -> HashMap<CanonicalField, String> {
        let mut resolved = HashMap::new();
        for header in headers {
            if let Some(field) = CanonicalField::from_header(header) {
                resolved.entry(field).or_insert_with(|| header.clone());
            }
        }
        resolved
    }

    fn map_record(
        &self,
        record: &RawRecord,
        resolved: &HashMap<CanonicalField, String>,
    ) -> IngredientRow {
        let cell = |field: CanonicalField| -> Option<String> {
            resolved
                .get(&field)
                .map(|header| record.cells.get(header).cloned().unwrap_or_default())
        };

        IngredientRow {
            row_number: record.row_number,
            name: cell(CanonicalField::Name),
            category: cell(CanonicalField::Category),
            crude_protein: cell(CanonicalField::CrudeProtein),
            energy: cell(CanonicalField::Energy),
            fibre: cell(CanonicalField::Fibre),
            calcium: cell(CanonicalField::Calcium),
            cost: cell(CanonicalField::Cost),
        }
    }
}

impl FieldMapper for HeaderAliasMapper {
    fn map_sheet(&self, sheet: &ParsedSheet) -> Vec<IngredientRow> {
        let resolved = self.resolve_headers(&sheet.headers);
        sheet
            .records
            .iter()
            .map(|record| self.map_record(record, &resolved))
            .collect()
    }
}
