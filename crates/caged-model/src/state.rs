//! Run-level state machine.

use std::fmt;
use std::path::PathBuf;

use crate::error::ErrorKind;
use crate::report::QualityReport;

/// Pipeline stages in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Extract,
    Transform,
    Validate,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Extract, Stage::Transform, Stage::Validate];

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Extract => "extract",
            Stage::Transform => "transform",
            Stage::Validate => "validate",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a run currently stands. Each successful stage carries its output
/// forward to the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineState {
    NotStarted,
    Extracted { raw_file: PathBuf },
    Transformed { dataset_root: PathBuf },
    Validated { report: QualityReport },
    Failed { stage: Stage, kind: ErrorKind },
}

impl PipelineState {
    /// Stage that runs next, or `None` once the run is terminal.
    pub fn next_stage(&self) -> Option<Stage> {
        match self {
            Self::NotStarted => Some(Stage::Extract),
            Self::Extracted { .. } => Some(Stage::Transform),
            Self::Transformed { .. } => Some(Stage::Validate),
            Self::Validated { .. } | Self::Failed { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.next_stage().is_none()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotStarted => "NOT_STARTED",
            Self::Extracted { .. } => "EXTRACTED",
            Self::Transformed { .. } => "TRANSFORMED",
            Self::Validated { .. } => "VALIDATED",
            Self::Failed { .. } => "FAILED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_follow_state() {
        assert_eq!(PipelineState::NotStarted.next_stage(), Some(Stage::Extract));
        let extracted = PipelineState::Extracted {
            raw_file: PathBuf::from("raw.csv"),
        };
        assert_eq!(extracted.next_stage(), Some(Stage::Transform));
        let failed = PipelineState::Failed {
            stage: Stage::Transform,
            kind: ErrorKind::Data,
        };
        assert!(failed.is_terminal());
        assert_eq!(failed.name(), "FAILED");
    }
}
