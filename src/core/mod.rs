pub mod builder;
pub mod normalizer;
pub mod prompt;
pub mod render;
pub mod reviewer;
pub mod transport;

pub use crate::domain::model::{BatchReviewResult, FileReview, FileStatus, ReviewOutcome};
pub use crate::domain::ports::{ConfigProvider, Storage, Transport};
pub use crate::utils::error::Result;
