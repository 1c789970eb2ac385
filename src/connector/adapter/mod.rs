mod logging_message_poster;
mod mock_embedding;
mod ort_embedding;
mod serving_endpoint;
mod slack_signature;
mod slack_web_client;
mod spreadsheet_catalog_reader;

pub use logging_message_poster::*;
pub use mock_embedding::*;
pub use ort_embedding::*;
pub use serving_endpoint::*;
pub use slack_signature::*;
pub use slack_web_client::*;
pub use spreadsheet_catalog_reader::*;
