use std::collections::HashMap;
use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Reader};
use tracing::{debug, info};

use crate::application::{CatalogSource, REQUIRED_COLUMNS};
use crate::domain::{CatalogRow, DomainError};

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsm", "ods"];

/// Loads catalog rows from a spreadsheet (first worksheet) or a CSV file.
///
/// The first row holds the headers. Headers are matched after lowercasing,
/// turning underscores into spaces and collapsing whitespace, so
/// `Portal_URL` and ` portal  url ` both name the `portal url` column.
pub struct SpreadsheetCatalogReader {
    path: PathBuf,
}

impl SpreadsheetCatalogReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn extension(&self) -> String {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase()
    }

    fn read_table(&self) -> Result<Vec<Vec<String>>, DomainError> {
        let extension = self.extension();
        if extension == "csv" {
            read_csv(&self.path)
        } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            read_spreadsheet(&self.path)
        } else {
            Err(DomainError::invalid_input(format!(
                "Unsupported catalog format: {}",
                self.path.display()
            )))
        }
    }
}

impl CatalogSource for SpreadsheetCatalogReader {
    fn load_rows(&self) -> Result<Vec<CatalogRow>, DomainError> {
        if !self.path.exists() {
            return Err(DomainError::not_found(format!(
                "Catalog not found: {}",
                self.path.display()
            )));
        }

        let mut table = self.read_table()?.into_iter();
        let headers = table.next().unwrap_or_default();
        let columns = ColumnMap::from_headers(&headers)?;

        let rows: Vec<CatalogRow> = table
            .filter(|cells| cells.iter().any(|c| !c.trim().is_empty()))
            .map(|cells| columns.row(&cells))
            .collect();

        info!("Loaded {} catalog rows from {}", rows.len(), self.describe());
        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Position of each required column in the source table.
struct ColumnMap {
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[String]) -> Result<Self, DomainError> {
        let normalized: Vec<String> = headers.iter().map(|h| normalize_header(h)).collect();

        let mut positions = HashMap::new();
        let mut missing = Vec::new();
        for column in REQUIRED_COLUMNS {
            match normalized.iter().position(|h| h == column) {
                Some(i) => {
                    positions.insert(column, i);
                }
                None => missing.push(column),
            }
        }

        if !missing.is_empty() {
            return Err(DomainError::invalid_input(format!(
                "Missing required column(s) in catalog: {}",
                missing.join(", ")
            )));
        }

        debug!("Catalog column positions: {:?}", positions);
        Ok(Self { positions })
    }

    fn cell(&self, cells: &[String], column: &str) -> String {
        self.positions
            .get(column)
            .and_then(|&i| cells.get(i))
            .map(|c| c.trim().to_string())
            .unwrap_or_default()
    }

    fn row(&self, cells: &[String]) -> CatalogRow {
        CatalogRow {
            service_number: self.cell(cells, "service number"),
            service_name: self.cell(cells, "service name"),
            description: self.cell(cells, "description"),
            portal_url: self.cell(cells, "portal url"),
            request_type: self.cell(cells, "request type"),
            request_description: self.cell(cells, "request description"),
            request_url: self.cell(cells, "request url"),
        }
    }
}

pub fn normalize_header(header: &str) -> String {
    header
        .to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn read_csv(path: &Path) -> Result<Vec<Vec<String>>, DomainError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| DomainError::catalog(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record
            .map_err(|e| DomainError::catalog(format!("Malformed CSV row in {}: {}", path.display(), e)))?;
        table.push(record.iter().map(str::to_string).collect());
    }
    Ok(table)
}

fn read_spreadsheet(path: &Path) -> Result<Vec<Vec<String>>, DomainError> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| DomainError::catalog(format!("Failed to open {}: {}", path.display(), e)))?;

    let first_sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DomainError::catalog(format!("No worksheets in {}", path.display())))?;

    let range = workbook
        .worksheet_range(&first_sheet)
        .map_err(|e| DomainError::catalog(format!("Failed to read sheet {}: {}", first_sheet, e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("Portal_URL"), "portal url");
        assert_eq!(normalize_header("  Request   Type "), "request type");
        assert_eq!(normalize_header("SERVICE__NUMBER"), "service number");
    }

    #[test]
    fn test_missing_column_is_reported() {
        let headers: Vec<String> = REQUIRED_COLUMNS[..6].iter().map(|s| s.to_string()).collect();

        let err = ColumnMap::from_headers(&headers).err().unwrap();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert!(err.to_string().contains("request url"));
    }

    #[test]
    fn test_short_rows_are_padded_with_empty_cells() {
        let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        let columns = ColumnMap::from_headers(&headers).unwrap();

        let row = columns.row(&[" 12 ".to_string(), "Identity".to_string()]);
        assert_eq!(row.service_number, "12");
        assert_eq!(row.service_name, "Identity");
        assert_eq!(row.request_url, "");
    }

    #[test]
    fn test_float_cells_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(12.0)), "12");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let reader = SpreadsheetCatalogReader::new("/nonexistent/help_docs.xlsx");
        assert!(reader.load_rows().unwrap_err().is_not_found());
    }
}
