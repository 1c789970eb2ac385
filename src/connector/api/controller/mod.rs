pub mod ask_controller;
pub mod events_controller;
pub mod search_controller;
pub mod serve_controller;

pub use ask_controller::{AskController, CLI_CHANNEL};
pub use events_controller::{healthz, slack_events, EventsController};
pub use search_controller::SearchController;
pub use serve_controller::ServeController;
