pub mod config;
pub mod docs;
pub mod error;
pub mod index;
pub mod loader;
pub mod logging;
pub mod parser;
pub mod query;

pub use config::Config;
pub use error::Error;
pub use index::{FileIndexer, ProjectIndex, TextDocument};
pub use loader::WorkspaceLoader;
pub use query::QueryEngine;
