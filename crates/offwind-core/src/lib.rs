pub mod error;
pub mod numeric;
pub mod types;

#[cfg(feature = "analytics")]
pub mod statements;

#[cfg(feature = "analytics")]
pub mod leverage;

#[cfg(feature = "analytics")]
pub mod operations;

#[cfg(feature = "analytics")]
pub mod aggregation;

#[cfg(feature = "extraction")]
pub mod extraction;

pub use error::OffwindError;
pub use types::*;

/// Standard result type for all offwind operations
pub type OffwindResult<T> = Result<T, OffwindError>;
