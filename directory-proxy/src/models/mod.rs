pub mod directory;

pub use directory::{Department, UserDetail, UserSummary};
