// ==========================================
// 饲料配方优化系统 - 原料目录导出
// ==========================================
// 职责: 目录 → CSV（标准表头,可重新导入）
// ==========================================

use crate::catalog::Catalog;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::CanonicalField;
use csv::Writer;
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// 写出到任意 Writer
pub fn write_catalog<W: Write>(catalog: &Catalog, writer: W) -> ImportResult<()> {
    let mut csv_writer = Writer::from_writer(writer);
    csv_writer.write_record(CanonicalField::ALL.iter().map(|f| f.header()))?;

    for ingredient in catalog {
        let n = ingredient.nutrients();
        csv_writer.write_record([
            ingredient.name().to_string(),
            ingredient.category().label().to_string(),
            n.crude_protein.to_string(),
            n.energy.to_string(),
            n.fibre.to_string(),
            n.calcium.to_string(),
            ingredient.cost().to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// 写出到 CSV 文件
pub fn write_catalog_csv(catalog: &Catalog, path: &Path) -> ImportResult<()> {
    let file = std::fs::File::create(path)?;
    write_catalog(catalog, file)?;
    debug!(path = %path.display(), size = catalog.size(), "原料目录已导出");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_catalog_headers() {
        let mut buffer = Vec::new();
        write_catalog(&Catalog::with_defaults(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Ingredient,Category,CP,Energy,Fibre,Calcium,Cost")
        );
        assert_eq!(lines.next(), Some("Alfalfa,Fodder,18,2300,25,1.5,80"));
        assert_eq!(text.lines().count(), 13);
    }
}
