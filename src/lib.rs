pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod processing;
pub mod record;
pub mod source;

#[cfg(feature = "simulation")]
pub mod simulation;

pub use config::AtGpsConfig;
pub use error::{AtGpsError, Result};
pub use processing::{FixProcessor, FixSink};
pub use record::{Fix, GpsFix, TimeFix};
