pub mod container;
pub mod controller;
pub mod router;
pub mod server;

pub use container::{Collaborators, Container, ContainerConfig, DEFAULT_CATALOG_PATH};
pub use router::Router;
pub use server::{build_app, serve, EVENTS_PATH, HEALTH_PATH};
