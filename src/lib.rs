pub mod cli;
pub mod config;
pub mod credential;
pub mod generator;
pub mod llm;
pub mod logging;
pub mod outlet;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use generator::workflow::launch;
