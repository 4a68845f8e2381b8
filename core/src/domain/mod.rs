//! Domain layer: entities shared by the services.

pub mod entities;

pub use entities::*;
