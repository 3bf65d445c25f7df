pub mod config;
pub mod mode;
pub mod partition;
pub mod repo_update;

pub use config::*;
pub use mode::*;
pub use partition::*;
pub use repo_update::*;
