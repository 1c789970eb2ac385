mod url_scan;

pub use url_scan::*;
