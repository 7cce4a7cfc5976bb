//! In-process extraction and analysis of a local file.

use std::path::Path;

use anyhow::Context;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::SelectedAsset;
use crate::config::Config;
use crate::ocr::MediaKind;
use crate::pipeline::{Pipeline, UploadedAsset};

/// Run the pipeline on one file and print the JSON result.
pub async fn cmd_process(config: &Config, file: &Path) -> anyhow::Result<()> {
    let selected = SelectedAsset::from_path(file).await?;
    if MediaKind::classify(&selected.media_type).is_none() {
        anyhow::bail!(
            "Unsupported file type: {} ({})",
            selected.name,
            selected.media_type
        );
    }

    let pipeline = Pipeline::from_config(config)?;
    let asset = UploadedAsset::new(selected.bytes, selected.media_type, selected.name);

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Processing {}...", asset.filename));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = pipeline.process(&asset).await;
    pb.finish_and_clear();
    let result = result.with_context(|| format!("Failed to process {}", file.display()))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    if let Some(failure) = pipeline.diagnostics().snapshot().last_failure {
        eprintln!(
            "{} Analysis fell back to defaults: {}",
            style("!").yellow(),
            failure.cause
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_unsupported_file_is_an_error() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"plain notes").unwrap();

        let err = cmd_process(&Config::default(), file.path())
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("Unsupported file type"));
    }
}
