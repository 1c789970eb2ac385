//! Catalog loading from files on disk.

mod common;

use ask_bestie::{Catalog, CatalogSource, DomainError, SpreadsheetCatalogReader};

use common::{catalog_file, CATALOG_CSV};

#[test]
fn test_csv_catalog_loads_every_row() {
    let file = catalog_file(CATALOG_CSV, "csv");
    let rows = SpreadsheetCatalogReader::new(file.path())
        .load_rows()
        .expect("Failed to load catalog");

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].request_type, "Reset Password");
    assert_eq!(rows[2].portal_url, "https://portal/9");
    assert_eq!(rows[4].request_url, "https://portal/11/laptop");
}

#[test]
fn test_blank_service_backfilled_from_portal() {
    let file = catalog_file(CATALOG_CSV, "csv");
    let rows = SpreadsheetCatalogReader::new(file.path()).load_rows().unwrap();
    let catalog = Catalog::from_rows(&rows);

    let unlock = &catalog.documents()[1];
    assert_eq!(unlock.title(), "Unlock Account");
    assert_eq!(unlock.service(), "Identity");
}

#[test]
fn test_headers_match_regardless_of_case_and_order() {
    let csv = "\
request url , PORTAL_URL,Request Type,request description,service name,Service Number,DESCRIPTION
https://portal/9/vpn,https://portal/9,VPN Access,Remote work,Network,30,Connectivity
";
    let file = catalog_file(csv, "csv");
    let rows = SpreadsheetCatalogReader::new(file.path()).load_rows().unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].request_url, "https://portal/9/vpn");
    assert_eq!(rows[0].service_number, "30");
}

#[test]
fn test_missing_column_is_fatal() {
    let csv = "Service Number,Service Name,Portal URL,Request Type,Request URL\n1,a,b,c,d\n";
    let file = catalog_file(csv, "csv");
    let err = SpreadsheetCatalogReader::new(file.path())
        .load_rows()
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert!(err.to_string().contains("description"));
}

#[test]
fn test_unknown_extension_is_fatal() {
    let file = catalog_file(CATALOG_CSV, "txt");
    let err = SpreadsheetCatalogReader::new(file.path())
        .load_rows()
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = SpreadsheetCatalogReader::new(dir.path().join("help_docs.xlsx"))
        .load_rows()
        .unwrap_err();

    assert!(err.is_not_found());
}

fn fixture(name: &str) -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn test_xlsx_catalog_reads_first_sheet() {
    let rows = SpreadsheetCatalogReader::new(fixture("help_docs.xlsx"))
        .load_rows()
        .expect("Failed to load workbook");

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].service_number, "12");
    assert_eq!(rows[0].service_name, "Identity");
    assert_eq!(rows[0].request_url, "https://portal/5/reset");
    assert_eq!(rows[2].request_type, "VPN Access");
}

#[test]
fn test_xlsx_numeric_and_blank_cells() {
    let rows = SpreadsheetCatalogReader::new(fixture("help_docs.xlsx"))
        .load_rows()
        .unwrap();

    let unlock = &rows[1];
    assert_eq!(unlock.service_number, "12");
    assert_eq!(unlock.service_name, "");
    assert_eq!(unlock.request_description, "");

    let catalog = Catalog::from_rows(&rows);
    assert_eq!(catalog.documents()[1].service(), "Identity");
}

#[test]
fn test_xlsx_missing_column_is_fatal() {
    let err = SpreadsheetCatalogReader::new(fixture("missing_column.xlsx"))
        .load_rows()
        .unwrap_err();

    assert!(matches!(err, DomainError::InvalidInput(_)));
    assert!(err.to_string().contains("request description"));
}
