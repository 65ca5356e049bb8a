pub mod app;
pub mod directory;
pub mod metrics;
