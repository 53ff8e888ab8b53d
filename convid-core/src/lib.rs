//! convid-core: batch video conversion library.
//!
//! Converts arbitrary video files to MP4 (h264 video, AAC audio), copying
//! streams that already match the target and transcoding the rest. Built
//! around external `ffmpeg`/`ffprobe` binaries; nothing is linked in.
//!
//! The pipeline is probe → plan → convert:
//! - [`probe_streams`] reads stream metadata via ffprobe
//! - [`build_plan`] decides copy vs transcode per stream
//! - [`run_conversion`] executes one job with pause/cancel support
//! - [`run_batch`] drives a whole directory's worth of jobs
//!
//! Progress and status flow out through the [`BatchObserver`] trait, and
//! pause/cancel flow in through [`ControlFlags`], so the library is usable
//! from a CLI as well as from an embedding application.

pub mod config;
pub mod control;
pub mod discovery;
pub mod error;
pub mod external;
pub mod planning;
pub mod processing;
pub mod progress;
pub mod utils;

pub use config::{CoreConfig, OverwritePolicy, DEFAULT_CRF, DEFAULT_PRESET};
pub use control::ControlFlags;
pub use discovery::{find_video_files, is_video_file, output_path_for, VIDEO_EXTENSIONS};
pub use error::{CoreError, CoreResult};
pub use external::{check_dependency, probe_streams, StreamDescriptor, StreamKind};
pub use planning::{build_plan, target_audio_bitrate, ConversionPlan, EncodeDecision, StreamAction};
pub use processing::{
    run_batch, run_batch_with, run_conversion, BatchObserver, BatchSummary, FfmpegJobRunner,
    JobOutcome, JobRunner, NullObserver,
};
pub use progress::ProgressParser;
pub use utils::{format_duration, parse_ffmpeg_time};
