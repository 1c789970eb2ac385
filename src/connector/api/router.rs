use anyhow::Result;

use crate::cli::Commands;

use super::container::Container;
use super::controller::{AskController, SearchController, ServeController};

pub struct Router<'a> {
    serve_controller: ServeController<'a>,
    search_controller: SearchController<'a>,
    ask_controller: AskController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            serve_controller: ServeController::new(container),
            search_controller: SearchController::new(container),
            ask_controller: AskController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Serve { host, port } => self.serve_controller.serve(host, port).await,
            Commands::Search { query, num } => self.search_controller.search(query, num).await,
            Commands::Ask { text, plain } => self.ask_controller.ask(text, plain).await,
        }
    }
}
