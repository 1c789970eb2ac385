//! External answer adapter for model serving endpoints.

mod client;
mod payload;
mod response;

pub use client::*;
pub use payload::*;
pub use response::*;
