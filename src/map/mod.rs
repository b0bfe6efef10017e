pub mod bootstrap;
pub mod error;
pub mod loader;
pub mod map_model;
pub mod session;
