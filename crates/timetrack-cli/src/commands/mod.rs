pub mod config;
pub mod export;
pub mod project;
pub mod task;
pub mod timer;
