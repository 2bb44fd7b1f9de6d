//! Core types for the labor-market lake pipeline.

pub mod config;
pub mod error;
pub mod record;
pub mod report;
pub mod state;

pub use config::{LakeConfig, RetryPolicy};
pub use error::{ErrorKind, PipelineError, Result, ValidationFailure};
pub use record::{MovementType, RawRecord, Region};
pub use report::{QualityReport, QualityStatus};
pub use state::{PipelineState, Stage};
