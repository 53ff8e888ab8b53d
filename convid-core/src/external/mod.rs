//! External tool interaction.
//!
//! Everything that shells out to ffmpeg/ffprobe lives under this module so the
//! rest of the crate only deals in parsed results.

mod ffprobe_executor;

pub use ffprobe_executor::{probe_streams, StreamDescriptor, StreamKind};

use crate::error::{CoreError, CoreResult};

use std::process::{Command, Stdio};

/// Checks if an external command is available by running `<cmd> -version`.
///
/// # Errors
///
/// Returns `CoreError::DependencyNotFound` if the command cannot be executed
/// or exits unsuccessfully.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    log::debug!("Checking dependency: {cmd_name}");

    let status = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|_| CoreError::DependencyNotFound(cmd_name.to_string()))?;

    if !status.success() {
        return Err(CoreError::DependencyNotFound(cmd_name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dependency_missing() {
        let result = check_dependency("convid-test-no-such-binary");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(name)) if name == "convid-test-no-such-binary"));
    }
}
