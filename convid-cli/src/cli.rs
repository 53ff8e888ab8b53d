// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Convid: batch video to MP4 converter",
    long_about = "Converts video files to MP4 (h264/AAC) using ffmpeg, copying streams that already match the target format."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts a video file, or every video file under a directory, to MP4
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    /// Input video file or directory to scan recursively
    #[arg(required = true, value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// CRF quality for transcoded video (lower is better quality)
    #[arg(long, value_name = "CRF", default_value_t = convid_core::DEFAULT_CRF, value_parser = clap::value_parser!(u8).range(0..=51))]
    pub crf: u8,

    /// x264 preset for transcoded video
    #[arg(long, value_name = "PRESET", default_value = convid_core::DEFAULT_PRESET)]
    pub preset: String,

    /// Re-encode even when the .mp4 output already exists
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
