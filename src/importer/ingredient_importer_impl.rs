// ==========================================
// 饲料配方优化系统 - 原料导入器实现
// ==========================================
// 职责: 整合导入流程,从文件到原料目录
// 流程: 解析（阻塞线程池）→ 表头映射 → 整批合并（校验在目录内完成）
// ==========================================

use crate::catalog::{Catalog, MergeReport};
use crate::domain::ingredient::IngredientRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::HeaderAliasMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::ingredient_importer_trait::{FieldMapper, FileParser, IngredientImporter};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ImportedBatch - 导入批次
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct ImportedBatch {
    pub batch_id: Uuid,
    pub source: PathBuf,
    pub imported_at: DateTime<Utc>,
    pub rows: Vec<IngredientRow>,
    pub elapsed: Duration,
}

impl ImportedBatch {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 整批合并进目录（任一行不合格则整批拒绝,目录不变）
    pub fn merge_into(&self, catalog: &mut Catalog) -> ImportResult<MergeReport> {
        match catalog.merge_from(&self.rows) {
            Ok(report) => {
                info!(
                    batch_id = %self.batch_id,
                    inserted = report.inserted,
                    replaced = report.replaced,
                    warnings = report.warnings.len(),
                    "导入批次已合并"
                );
                Ok(report)
            }
            Err(e) => {
                warn!(batch_id = %self.batch_id, error = %e, "导入批次被拒绝");
                Err(ImportError::Validation(e))
            }
        }
    }
}

// ==========================================
// IngredientImporterImpl - 原料导入器实现
// ==========================================
#[derive(Clone)]
pub struct IngredientImporterImpl {
    file_parser: Arc<dyn FileParser>,
    field_mapper: Arc<dyn FieldMapper>,
}

impl Default for IngredientImporterImpl {
    fn default() -> Self {
        Self::new(Arc::new(UniversalFileParser), Arc::new(HeaderAliasMapper))
    }
}

impl IngredientImporterImpl {
    /// 创建导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    pub fn new(file_parser: Arc<dyn FileParser>, field_mapper: Arc<dyn FieldMapper>) -> Self {
        Self {
            file_parser,
            field_mapper,
        }
    }
}

#[async_trait::async_trait]
impl IngredientImporter for IngredientImporterImpl {
    #[instrument(skip(self), fields(file = %file_path.display()))]
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportedBatch> {
        let start_time = Instant::now();
        let batch_id = Uuid::new_v4();

        // === 步骤 1: 解析文件（阻塞 IO,放入阻塞线程池）===
        let parser = Arc::clone(&self.file_parser);
        let path = file_path.to_path_buf();
        let sheet = tokio::task::spawn_blocking(move || parser.parse(&path))
            .await
            .map_err(|e| ImportError::InternalError(format!("解析任务失败: {}", e)))??;

        // === 步骤 2: 表头映射 ===
        let rows = self.field_mapper.map_sheet(&sheet);

        let elapsed = start_time.elapsed();
        info!(
            batch_id = %batch_id,
            rows = rows.len(),
            elapsed_ms = elapsed.as_millis() as u64,
            "原料文件解析完成"
        );

        Ok(ImportedBatch {
            batch_id,
            source: file_path.to_path_buf(),
            imported_at: Utc::now(),
            rows,
            elapsed,
        })
    }

    async fn batch_import(&self, file_paths: &[&Path]) -> Vec<ImportResult<ImportedBatch>> {
        let tasks = file_paths.iter().map(|path| self.import_file(path));
        let results = join_all(tasks).await;

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(
            total = results.len(),
            failed = failed,
            "批量导入完成"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[tokio::test]
    async fn test_import_file_maps_rows() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Ingredient,Category,CP,Energy,Fibre,Calcium,Cost").unwrap();
        writeln!(file, "Maize,Concentrate,9,3400,2,0.02,120").unwrap();

        let importer = IngredientImporterImpl::default();
        let batch = importer.import_file(file.path()).await.unwrap();

        assert_eq!(batch.row_count(), 1);
        assert_eq!(batch.source, file.path());
        assert_eq!(batch.rows[0].name.as_deref(), Some("Maize"));

        let mut catalog = Catalog::new();
        let report = batch.merge_into(&mut catalog).unwrap();
        assert_eq!(report.inserted, 1);
        assert!(catalog.contains("Maize"));
    }

    #[tokio::test]
    async fn test_import_missing_file() {
        let importer = IngredientImporterImpl::default();
        let result = importer.import_file(Path::new("/nonexistent/feed.csv")).await;
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }
}
