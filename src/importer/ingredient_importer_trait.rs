// ==========================================
// 饲料配方优化系统 - 原料导入 Trait
// ==========================================
// 职责: 定义原料导入接口（不包含实现）
// ==========================================

use crate::domain::ingredient::IngredientRow;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::ParsedSheet;
use crate::importer::ingredient_importer_impl::ImportedBatch;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// IngredientImporter Trait
// ==========================================
// 用途: 原料导入主接口
// 实现者: IngredientImporterImpl
#[async_trait]
pub trait IngredientImporter: Send + Sync {
    /// 从文件导入原料行（CSV / Excel,按扩展名分派）
    ///
    /// # 返回
    /// - Ok(ImportedBatch): 批次（含批次 ID、行数据、耗时）
    /// - Err: 文件读取/解析错误
    ///
    /// # 说明
    /// - 只解析与映射,不做校验; 校验在合并进目录时整批进行
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportedBatch>;

    /// 批量导入多个文件（并发执行）
    ///
    /// # 说明
    /// - 每个文件独立导入,某个文件失败不影响其他文件
    /// - 结果顺序与输入顺序一致
    async fn batch_import(&self, file_paths: &[&Path]) -> Vec<ImportResult<ImportedBatch>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 原始行记录
    fn parse(&self, file_path: &Path) -> ImportResult<ParsedSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口
// 实现者: HeaderAliasMapper
pub trait FieldMapper: Send + Sync {
    /// 将解析结果映射为 IngredientRow 列表
    ///
    /// # 约定
    /// - 表头中不存在的列 → None
    /// - 表头存在但该行单元格缺失/为空 → Some("")
    fn map_sheet(&self, sheet: &ParsedSheet) -> Vec<IngredientRow>;
}
