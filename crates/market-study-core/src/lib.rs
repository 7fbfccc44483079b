pub mod error;
pub mod formatting;
pub mod types;

#[cfg(feature = "projection")]
pub mod projection;

#[cfg(feature = "study")]
pub mod study;

pub use error::{ExtractionError, MarketStudyError, ModelError};
pub use types::*;

/// Standard result type for all market-study operations
pub type MarketStudyResult<T> = Result<T, MarketStudyError>;
