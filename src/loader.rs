// CSV Loader - snapshot tables → string-keyed rows
// The two source files are operator-maintained snapshots; every cell stays a
// string here and typing happens once, at the RecordStore boundary.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// One row of a source table: column header → raw cell value.
pub type Row = HashMap<String, String>;

/// Read a header-keyed CSV file into rows.
///
/// Blank lines are skipped. Rows shorter than the header are padded with
/// empty cells so later coercion sees a uniform shape.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open file: {}", path.display()))?;

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read CSV headers from {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        let record = result.with_context(|| {
            format!(
                "Failed to parse CSV line {} in {}",
                line_num + 2, // 1-indexed + header row
                path.display()
            )
        })?;

        // Skip rows that are entirely empty (PapaParse's skipEmptyLines)
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let mut row = Row::with_capacity(headers.len());
        for (i, header) in headers.iter().enumerate() {
            let cell = record.get(i).unwrap_or("");
            row.insert(header.clone(), cell.to_string());
        }
        rows.push(row);
    }

    Ok(rows)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut f = File::create(&path).unwrap();
        f.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_table_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "master.csv",
            "個体識別番号,ステータス,牛舎\n1234567890,出荷,A-3\n",
        );

        let rows = load_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["個体識別番号"], "1234567890");
        assert_eq!(rows[0]["ステータス"], "出荷");
        assert_eq!(rows[0]["牛舎"], "A-3");
    }

    #[test]
    fn test_load_table_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "weight.csv",
            "個体識別番号,体重測定日,体重,報告\n,,,\n1111111111,2024/1/1,320,健診\n",
        );

        let rows = load_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["体重"], "320");
    }

    #[test]
    fn test_load_table_short_row_padded() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            &dir,
            "weight.csv",
            "個体識別番号,体重測定日,体重,報告\n1111111111,2024/1/1,320\n",
        );

        let rows = load_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["報告"], "");
    }

    #[test]
    fn test_load_table_missing_file() {
        let result = load_table("no_such_dir/no_such_file.csv");
        assert!(result.is_err());
    }
}
