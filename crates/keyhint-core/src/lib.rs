mod error;
pub use error::{Error, IntoError};

pub mod schema;

pub mod shape;
pub use shape::Query;

pub mod stats;
pub use stats::StatsProvider;

/// A Result type alias that uses keyhint's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
