mod catalog;
mod document;
mod embedding;
mod external_answer;
mod inbound_event;
mod link_policy;
mod outbound_message;
mod processed_event_cache;
mod resolved_answer;
mod search_result;

pub use catalog::*;
pub use document::*;
pub use embedding::*;
pub use external_answer::*;
pub use inbound_event::*;
pub use link_policy::*;
pub use outbound_message::*;
pub use processed_event_cache::*;
pub use resolved_answer::*;
pub use search_result::*;
