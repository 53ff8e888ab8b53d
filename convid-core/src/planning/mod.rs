//! Conversion planning.
//!
//! Turns probed stream metadata into a per-stream copy/transcode decision
//! list and renders that list as an ffmpeg argument vector. The canonical
//! output is an MP4 container with h264 video and AAC audio; streams already
//! in the canonical codec are copied instead of re-encoded.

pub mod audio;

pub use audio::target_audio_bitrate;

use crate::config::CoreConfig;
use crate::external::{StreamDescriptor, StreamKind};

use std::path::Path;

/// Canonical video codec name as reported by ffprobe.
pub const VIDEO_CODEC: &str = "h264";
/// Encoder used when video must be transcoded.
pub const VIDEO_ENCODER: &str = "libx264";
/// Canonical audio codec name.
pub const AUDIO_CODEC: &str = "aac";
/// AAC profile applied to transcoded audio.
pub const AUDIO_PROFILE: &str = "aac_low";

/// Whether a stream is carried over untouched or re-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamAction {
    Copy,
    Transcode,
}

/// One planned output stream.
#[derive(Debug, Clone)]
pub struct EncodeDecision {
    /// Global stream index in the input container.
    pub stream_index: usize,
    pub kind: StreamKind,
    /// Per-type output index (the `n` in `-c:v:n` / `-c:a:n`).
    pub out_index: usize,
    pub action: StreamAction,
    /// Target bitrate for transcoded audio, in bits per second.
    pub bitrate_target: Option<u64>,
}

/// A complete conversion plan for one input file.
#[derive(Debug, Clone)]
pub struct ConversionPlan {
    pub decisions: Vec<EncodeDecision>,
    pub crf: u8,
    pub preset: String,
}

impl ConversionPlan {
    /// True if any planned output stream is audio.
    #[must_use]
    pub fn has_audio(&self) -> bool {
        self.decisions
            .iter()
            .any(|d| d.kind == StreamKind::Audio)
    }

    /// True if every planned stream is a copy.
    #[must_use]
    pub fn is_remux_only(&self) -> bool {
        self.decisions
            .iter()
            .all(|d| d.action == StreamAction::Copy)
    }

    /// Renders the full ffmpeg argument vector for this plan.
    ///
    /// A plan with no decisions still yields the global flags; ffmpeg then
    /// performs its own default stream selection or fails with its own
    /// diagnostic.
    #[must_use]
    pub fn to_args(&self, input: &Path, output: &Path) -> Vec<String> {
        let mut args: Vec<String> = vec![
            "-y".to_string(),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
        ];

        for decision in &self.decisions {
            args.push("-map".to_string());
            args.push(format!("0:{}", decision.stream_index));

            match (decision.kind, decision.action) {
                (StreamKind::Video, StreamAction::Copy) => {
                    args.push(format!("-c:v:{}", decision.out_index));
                    args.push("copy".to_string());
                }
                (StreamKind::Video, StreamAction::Transcode) => {
                    args.push(format!("-c:v:{}", decision.out_index));
                    args.push(VIDEO_ENCODER.to_string());
                    args.push("-crf".to_string());
                    args.push(self.crf.to_string());
                    args.push("-preset".to_string());
                    args.push(self.preset.clone());
                }
                (StreamKind::Audio, StreamAction::Copy) => {
                    args.push(format!("-c:a:{}", decision.out_index));
                    args.push("copy".to_string());
                }
                (StreamKind::Audio, StreamAction::Transcode) => {
                    args.push(format!("-c:a:{}", decision.out_index));
                    args.push(AUDIO_CODEC.to_string());
                    args.push("-profile:a".to_string());
                    args.push(AUDIO_PROFILE.to_string());
                    args.push(format!("-b:a:{}", decision.out_index));
                    args.push(decision.bitrate_target.unwrap_or_default().to_string());
                }
                (StreamKind::Other, _) => {}
            }
        }

        args.push("-movflags".to_string());
        args.push("+faststart".to_string());
        args.push(output.to_string_lossy().into_owned());
        args
    }
}

/// Builds a conversion plan from probed streams.
///
/// Video streams are copied when already h264, otherwise transcoded with the
/// configured crf/preset. Audio streams are copied when already AAC at or
/// above the normalized target bitrate, otherwise transcoded at that target.
/// Data and subtitle streams are dropped.
#[must_use]
pub fn build_plan(streams: &[StreamDescriptor], config: &CoreConfig) -> ConversionPlan {
    let mut decisions = Vec::new();
    let mut video_out = 0usize;
    let mut audio_out = 0usize;

    for stream in streams {
        match stream.kind {
            StreamKind::Video => {
                let action = if stream.codec_name == VIDEO_CODEC {
                    StreamAction::Copy
                } else {
                    StreamAction::Transcode
                };
                decisions.push(EncodeDecision {
                    stream_index: stream.index,
                    kind: StreamKind::Video,
                    out_index: video_out,
                    action,
                    bitrate_target: None,
                });
                video_out += 1;
            }
            StreamKind::Audio => {
                // Layouts without a reported channel count plan as stereo.
                let channels = stream.channels.unwrap_or(2);
                let target = target_audio_bitrate(&stream.codec_name, stream.bit_rate, channels);
                let action = if stream.codec_name == AUDIO_CODEC
                    && stream.bit_rate.is_some_and(|rate| rate >= target)
                {
                    StreamAction::Copy
                } else {
                    StreamAction::Transcode
                };
                decisions.push(EncodeDecision {
                    stream_index: stream.index,
                    kind: StreamKind::Audio,
                    out_index: audio_out,
                    action,
                    bitrate_target: match action {
                        StreamAction::Transcode => Some(target),
                        StreamAction::Copy => None,
                    },
                });
                audio_out += 1;
            }
            StreamKind::Other => {
                log::debug!(
                    "Dropping non-audio/video stream {} ({})",
                    stream.index,
                    stream.codec_name
                );
            }
        }
    }

    let plan = ConversionPlan {
        decisions,
        crf: config.crf,
        preset: config.preset.clone(),
    };
    if !plan.has_audio() {
        log::info!("No audio streams found; planning video-only output");
    }
    plan
}
