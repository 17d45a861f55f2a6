pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliArgs;
pub use config::{FileConfig, Settings};

pub use adapters::{
    http::HttpDocumentSource,
    output::{ConsoleSink, FileSink},
    phabricator::PhabricatorClient,
};
pub use core::{engine::ScopeEngine, pipeline::ScopePipeline};
pub use utils::error::{Result, ScopeError};
