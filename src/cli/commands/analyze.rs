//! Upload a file to a running server and show the analysis.

use std::path::Path;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::client::{render, ClientError, HttpUploader, PipelineController, SelectedAsset, Status};
use crate::config::Config;

/// Drive one client session against the upload endpoint.
pub async fn cmd_analyze(
    config: &Config,
    file: &Path,
    server: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let mut client_config = config.client.clone();
    if let Some(url) = server {
        client_config = client_config.with_server_url(url);
    }

    let url = client_config.server_url.clone();
    let uploader = HttpUploader::new(url.clone());
    let mut controller = PipelineController::new(uploader, client_config);

    let asset = SelectedAsset::from_path(file).await?;
    controller.select(asset)?;
    if let Some(preview) = &controller.session().preview {
        println!("{} {}", style("→").cyan(), preview);
    }

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}% {wide_msg}")
            .unwrap()
            .progress_chars("█▓░"),
    );

    let mut progress_rx = controller.subscribe_progress();
    let mut status_rx = controller.subscribe_status();
    let pb_task = pb.clone();
    let watcher = tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = progress_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    pb_task.set_position(u64::from(*progress_rx.borrow_and_update()));
                }
                changed = status_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    match *status_rx.borrow_and_update() {
                        Status::Uploading => pb_task.set_message("Uploading..."),
                        Status::Analyzing => pb_task.set_message("Analyzing..."),
                        _ => {}
                    }
                }
            }
        }
    });

    let outcome = controller.analyze().await.cloned();
    watcher.abort();
    pb.finish_and_clear();

    let contract = outcome.map_err(|e| {
        if let ClientError::NetworkOrServer(cause) = &e {
            tracing::info!("Upload to {} failed: {}", url, cause);
        }
        e
    })?;

    if json {
        println!("{}", serde_json::to_string_pretty(&contract)?);
    } else {
        print!("{}", render(&contract));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_rejected_file_is_returned_as_client_error() {
        let mut file = tempfile::Builder::new().suffix(".gif").tempfile().unwrap();
        file.write_all(b"GIF89a").unwrap();
        let config = Config::default();

        let err = cmd_analyze(&config, file.path(), Some("http://127.0.0.1:9/upload"), false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Validation(_))
        ));
    }
}
