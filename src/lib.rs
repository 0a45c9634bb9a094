pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::{render, reviewer::CodeReviewer, transport::ReqwestTransport};
pub use crate::domain::model::{
    ApiSettings, AuthMode, BatchReviewResult, FileReview, FileStatus, ReviewOutcome, ReviewParams,
};
pub use crate::utils::error::{Result, ReviewError};
