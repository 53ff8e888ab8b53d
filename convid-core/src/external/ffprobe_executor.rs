//! Stream probing via ffprobe.
//!
//! Wraps the `ffprobe` crate and reduces its output to the handful of fields
//! the planner cares about. A file that cannot be probed yields an empty
//! stream list rather than an error; the resulting plan then transcodes
//! nothing and ffmpeg itself reports the real problem.

use std::path::Path;

/// Broad stream classification as reported by ffprobe's `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Video,
    Audio,
    /// Subtitles, data, attachments. Not carried into the output container.
    Other,
}

/// The subset of per-stream metadata used for planning a conversion.
#[derive(Debug, Clone)]
pub struct StreamDescriptor {
    /// Stream index within the input container.
    pub index: usize,
    pub kind: StreamKind,
    /// Codec name as reported by ffprobe, lowercased (e.g. "h264", "aac").
    pub codec_name: String,
    /// Channel count; audio streams only, and even then sometimes absent.
    pub channels: Option<u32>,
    /// Stream bitrate in bits per second, when the container reports one.
    pub bit_rate: Option<u64>,
}

/// Probes a media file and returns descriptors for all of its streams,
/// in container order.
///
/// Probe failures are logged and reported as an empty list.
#[must_use]
pub fn probe_streams(path: &Path) -> Vec<StreamDescriptor> {
    let info = match ffprobe::ffprobe(path) {
        Ok(info) => info,
        Err(e) => {
            log::warn!("ffprobe failed for {}: {e}", path.display());
            return Vec::new();
        }
    };

    info.streams
        .iter()
        .map(|stream| {
            let kind = match stream.codec_type.as_deref() {
                Some("video") => StreamKind::Video,
                Some("audio") => StreamKind::Audio,
                _ => StreamKind::Other,
            };
            StreamDescriptor {
                index: stream.index.max(0) as usize,
                kind,
                codec_name: stream
                    .codec_name
                    .as_deref()
                    .unwrap_or("")
                    .to_ascii_lowercase(),
                channels: stream.channels.and_then(|c| u32::try_from(c).ok()),
                bit_rate: stream.bit_rate.as_deref().and_then(|b| b.parse().ok()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_streams_unreadable_file_is_empty() {
        let streams = probe_streams(Path::new("/nonexistent/convid-test.mkv"));
        assert!(streams.is_empty());
    }
}
