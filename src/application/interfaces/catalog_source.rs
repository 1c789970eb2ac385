use crate::domain::{CatalogRow, DomainError};

/// Names of the columns every catalog source must provide, already in their
/// normalized form (lowercase, single spaces).
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "service number",
    "service name",
    "description",
    "portal url",
    "request type",
    "request description",
    "request url",
];

/// Reads raw catalog rows once at startup.
///
/// A missing source or a missing required column is an error; blank cells
/// are not.
pub trait CatalogSource: Send + Sync {
    fn load_rows(&self) -> Result<Vec<CatalogRow>, DomainError>;

    /// Human readable origin, for logs.
    fn describe(&self) -> String;
}
