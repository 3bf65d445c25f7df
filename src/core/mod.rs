pub mod config;
pub mod repos;
pub mod splitter;

pub use config::*;
pub use repos::*;
pub use splitter::*;
