//! Helpers for running external extraction tools.

use std::io::Write;
use std::process::{Command, Output};

use tempfile::NamedTempFile;

use super::extractor::ExtractionError;

/// Check if a binary is available in PATH.
pub fn check_binary(name: &str) -> bool {
    Command::new("which")
        .arg(name)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Report availability of every external tool the extractors call.
pub fn check_tools() -> Vec<(String, bool)> {
    ["pdftotext", "tesseract"]
        .iter()
        .map(|tool| (tool.to_string(), check_binary(tool)))
        .collect()
}

/// Handle command output, extracting stdout on success or returning appropriate error.
pub(crate) fn handle_cmd_output(
    result: std::io::Result<Output>,
    tool_name: &str,
    error_prefix: &str,
) -> Result<String, ExtractionError> {
    match result {
        Ok(output) => {
            if output.status.success() {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            } else {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractionError::ExtractionFailed(format!(
                    "{}: {}",
                    error_prefix,
                    stderr.trim()
                )))
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(ExtractionError::ToolNotFound(tool_name.to_string()))
        }
        Err(e) => Err(ExtractionError::Io(e)),
    }
}

/// Spill an in-memory payload to a temporary file so command-line tools can read it.
///
/// The file is removed when the returned handle is dropped.
pub(crate) fn spill_to_tempfile(bytes: &[u8], suffix: &str) -> Result<NamedTempFile, ExtractionError> {
    let mut file = tempfile::Builder::new()
        .prefix("contentlens-")
        .suffix(suffix)
        .tempfile()?;
    file.write_all(bytes)?;
    file.flush()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_tools_lists_every_tool() {
        let tools = check_tools();
        let names: Vec<_> = tools.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec!["pdftotext", "tesseract"]);
    }

    #[test]
    fn test_spill_to_tempfile_round_trips_bytes() {
        let file = spill_to_tempfile(b"%PDF-1.4", ".pdf").unwrap();
        assert!(file.path().to_string_lossy().ends_with(".pdf"));
        assert_eq!(std::fs::read(file.path()).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn test_missing_tool_maps_to_tool_not_found() {
        let result = Command::new("contentlens-no-such-tool").output();
        let err = handle_cmd_output(result, "contentlens-no-such-tool", "failed").unwrap_err();
        assert!(matches!(err, ExtractionError::ToolNotFound(_)));
    }
}
