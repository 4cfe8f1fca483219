pub mod analysis;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod parser;
pub mod source;
