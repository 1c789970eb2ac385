mod answer_provider;
mod catalog_source;
mod embedding_service;
mod message_poster;
mod request_authenticator;

pub use answer_provider::*;
pub use catalog_source::*;
pub use embedding_service::*;
pub use message_poster::*;
pub use request_authenticator::*;
