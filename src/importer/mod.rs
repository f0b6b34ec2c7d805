// ==========================================
// 饲料配方优化系统 - 导入层
// ==========================================
// 职责: 外部原料表格导入/导出
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod export;
pub mod field_mapper;
pub mod file_parser;
pub mod ingredient_importer_impl;
pub mod ingredient_importer_trait;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use export::{write_catalog, write_catalog_csv};
pub use field_mapper::{CanonicalField, HeaderAliasMapper};
pub use file_parser::{CsvParser, ExcelParser, ParsedSheet, RawRecord, UniversalFileParser};
pub use ingredient_importer_impl::{ImportedBatch, IngredientImporterImpl};

// 重导出 Trait 接口
pub use ingredient_importer_trait::{FieldMapper, FileParser, IngredientImporter};
