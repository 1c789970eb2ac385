use anyhow::Result;

use super::super::server;
use super::super::Container;

pub struct ServeController<'a> {
    container: &'a Container,
}

impl<'a> ServeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Blocks until the listener stops.
    pub async fn serve(&self, host: String, port: u16) -> Result<String> {
        server::serve(self.container, &host, port).await?;
        Ok("Server stopped.".to_string())
    }
}
