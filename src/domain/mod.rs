//! # Domain Layer
//!
//! Catalog documents, inbound and outbound message models, and the pure
//! helpers they share. Independent of transports and model runtimes.

mod error;
pub mod models;
pub mod services;

pub use error::*;
pub use models::*;
pub use services::*;
