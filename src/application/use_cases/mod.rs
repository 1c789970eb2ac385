mod admit_event;
mod answer_question;
mod catalog_index;
mod compose_reply;
mod find_alternates;
mod resolve_link;
mod respond_to_event;

pub use admit_event::*;
pub use answer_question::*;
pub use catalog_index::*;
pub use compose_reply::*;
pub use find_alternates::*;
pub use resolve_link::*;
pub use respond_to_event::*;
