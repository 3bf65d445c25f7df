pub mod init;
pub mod pull;
pub mod repo;
pub mod split;

pub use init::*;
pub use pull::*;
pub use repo::*;
pub use split::*;
