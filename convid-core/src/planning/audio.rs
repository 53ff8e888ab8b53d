//! Audio bitrate normalization.
//!
//! Maps an arbitrary source audio stream to an AAC target bitrate. Sources
//! already using an efficient codec keep their rate, legacy lossy sources are
//! reduced (re-encoding lossy audio at its nominal rate wastes bits) and
//! lossless sources get a generous but bounded rate.

/// Codecs whose nominal bitrate translates 1:1 to an AAC target.
const EFFICIENT_CODECS: &[&str] = &["aac", "opus", "vorbis"];

/// Older lossy codecs whose nominal bitrate overstates the AAC equivalent.
const LEGACY_LOSSY_CODECS: &[&str] = &["mp3", "wma", "wma2", "ac3", "eac3", "dts", "atrac3"];

/// Lossless codecs. Their container bitrate is meaningless as an AAC target,
/// so it is scaled up and then clamped hard by the channel caps.
const LOSSLESS_CODECS: &[&str] = &[
    "flac",
    "alac",
    "pcm_s16le",
    "pcm_s24le",
    "pcm_s32le",
    "mlp",
];

fn codec_scale(codec_name: &str) -> f64 {
    if EFFICIENT_CODECS.contains(&codec_name) {
        1.0
    } else if LEGACY_LOSSY_CODECS.contains(&codec_name) {
        0.8
    } else if LOSSLESS_CODECS.contains(&codec_name) {
        1.5
    } else {
        1.0
    }
}

/// Per-channel-layout bitrate bounds: (default, min, max) in bits per second.
fn channel_bounds(channels: u32) -> (u64, u64, u64) {
    match channels {
        1 => (128_000, 32_000, 128_000),
        2 => (320_000, 64_000, 320_000),
        _ => (512_000, 192_000, 512_000),
    }
}

/// Computes the AAC target bitrate for an audio stream.
///
/// A missing or zero source bitrate falls back to a channel-based default.
/// Otherwise the source rate is scaled by codec family and clamped to the
/// channel layout's bounds.
#[must_use]
pub fn target_audio_bitrate(codec_name: &str, source_bitrate: Option<u64>, channels: u32) -> u64 {
    let (default, min, max) = channel_bounds(channels);

    match source_bitrate {
        None | Some(0) => default,
        Some(rate) => {
            let scaled = (rate as f64 * codec_scale(codec_name)) as u64;
            scaled.clamp(min, max)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_bitrate_uses_channel_default() {
        assert_eq!(target_audio_bitrate("aac", None, 1), 128_000);
        assert_eq!(target_audio_bitrate("aac", None, 2), 320_000);
        assert_eq!(target_audio_bitrate("aac", Some(0), 6), 512_000);
        assert_eq!(target_audio_bitrate("flac", None, 8), 512_000);
    }

    #[test]
    fn test_efficient_codecs_keep_rate() {
        assert_eq!(target_audio_bitrate("aac", Some(192_000), 2), 192_000);
        assert_eq!(target_audio_bitrate("opus", Some(96_000), 2), 96_000);
        assert_eq!(target_audio_bitrate("vorbis", Some(128_000), 2), 128_000);
    }

    #[test]
    fn test_legacy_lossy_scaled_down() {
        assert_eq!(target_audio_bitrate("mp3", Some(200_000), 2), 160_000);
        assert_eq!(target_audio_bitrate("mp3", Some(320_000), 2), 256_000);
        assert_eq!(target_audio_bitrate("ac3", Some(448_000), 6), 358_400);
        assert_eq!(target_audio_bitrate("dts", Some(1_536_000), 6), 512_000);
    }

    #[test]
    fn test_lossless_scaled_up_and_capped() {
        // 1.5x scale, then the stereo cap applies
        assert_eq!(target_audio_bitrate("flac", Some(1_000_000), 2), 320_000);
        assert_eq!(target_audio_bitrate("alac", Some(150_000), 2), 225_000);
        assert_eq!(target_audio_bitrate("pcm_s16le", Some(1_411_000), 2), 320_000);
    }

    #[test]
    fn test_unknown_codec_passes_through() {
        assert_eq!(target_audio_bitrate("truehd", Some(200_000), 2), 200_000);
    }

    #[test]
    fn test_clamp_lower_bounds() {
        assert_eq!(target_audio_bitrate("mp3", Some(32_000), 2), 64_000);
        assert_eq!(target_audio_bitrate("mp3", Some(16_000), 1), 32_000);
        assert_eq!(target_audio_bitrate("aac", Some(96_000), 6), 192_000);
    }

    #[test]
    fn test_clamp_upper_bounds() {
        assert_eq!(target_audio_bitrate("aac", Some(400_000), 1), 128_000);
        assert_eq!(target_audio_bitrate("aac", Some(2_000_000), 2), 320_000);
        assert_eq!(target_audio_bitrate("aac", Some(2_000_000), 6), 512_000);
    }
}
