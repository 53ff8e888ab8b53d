//! Conversion execution: single-job controller and batch scheduler.

pub mod batch;
pub mod conversion;

pub use batch::{
    run_batch, run_batch_with, BatchObserver, BatchSummary, FfmpegJobRunner, JobRunner,
    NullObserver,
};
pub use conversion::{run_conversion, JobOutcome};
