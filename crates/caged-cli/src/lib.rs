//! Library side of the `caged` runner: logging setup and stage orchestration.

pub mod logging;
pub mod pipeline;
