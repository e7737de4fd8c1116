//! Core types, settings and errors for craftstats

pub mod constants;
pub mod error;
pub mod settings;
pub mod types;

pub use error::{Error, Result};
pub use settings::{DbSettings, EmailSettings};
pub use types::{ActivitySample, ServerProbe, ServerState};
