pub mod config;
pub mod track;

pub use config::{GridConfig, PackingPolicy};
pub use track::{Session, Track};
