//! File discovery module for finding video files to convert.
//!
//! Recursively scans a directory for files with a recognized video container
//! extension (case-insensitive). Traversal order is made stable by sorting so
//! batch runs are reproducible.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Video container extensions eligible for conversion (lowercase, no dot).
pub const VIDEO_EXTENSIONS: &[&str] = &[
    "mov", "avi", "mkv", "mpg", "mp4", "wmv", "flv", "webm", "vob", "m4v", "ts", "m2ts", "rm",
    "rmvb", "ogv",
];

/// Checks if the given path is an existing file with a recognized video extension.
#[must_use]
pub fn is_video_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext_str| {
                VIDEO_EXTENSIONS
                    .iter()
                    .any(|known| ext_str.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

/// Returns the output path for an input file: same location, `.mp4` extension.
#[must_use]
pub fn output_path_for(input: &Path) -> PathBuf {
    input.with_extension("mp4")
}

/// Finds video files eligible for conversion under the specified directory.
///
/// Scans recursively and returns the matching paths in sorted order.
///
/// # Errors
///
/// * `CoreError::Io` - If directory traversal fails
/// * `CoreError::NoFilesFound` - If no video files are found
pub fn find_video_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    collect_video_files(input_dir, &mut files)?;

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort();
    Ok(files)
}

fn collect_video_files(dir: &Path, files: &mut Vec<PathBuf>) -> CoreResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_video_files(&path, files)?;
        } else if is_video_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_is_video_file_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["a.mkv", "b.MKV", "c.WebM", "d.m2ts"] {
            File::create(dir.path().join(name)).unwrap();
            assert!(is_video_file(&dir.path().join(name)), "{name}");
        }
        File::create(dir.path().join("notes.txt")).unwrap();
        assert!(!is_video_file(&dir.path().join("notes.txt")));
        assert!(!is_video_file(&dir.path().join("missing.mkv")));
        assert!(!is_video_file(dir.path()));
    }

    #[test]
    fn test_find_video_files_recursive_and_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("season1");
        fs::create_dir(&sub).unwrap();
        File::create(dir.path().join("b.avi")).unwrap();
        File::create(dir.path().join("a.mkv")).unwrap();
        File::create(sub.join("ep1.mov")).unwrap();
        File::create(dir.path().join("cover.jpg")).unwrap();

        let files = find_video_files(dir.path()).unwrap();
        assert_eq!(files.len(), 3);
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);
        assert!(files.iter().any(|f| f.ends_with("season1/ep1.mov")));
    }

    #[test]
    fn test_find_video_files_empty() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("readme.md")).unwrap();
        assert!(matches!(
            find_video_files(dir.path()),
            Err(CoreError::NoFilesFound)
        ));
    }

    #[test]
    fn test_output_path_for() {
        assert_eq!(
            output_path_for(Path::new("/videos/clip.mkv")),
            PathBuf::from("/videos/clip.mp4")
        );
        assert_eq!(
            output_path_for(Path::new("clip.mp4")),
            PathBuf::from("clip.mp4")
        );
    }
}
