//! Tool and provider availability report.

use console::style;

use crate::config::Config;
use crate::llm::LlmClient;
use crate::ocr::{check_tools, PdfToText, TesseractBackend};

/// Check extraction tool availability and LLM configuration.
pub async fn cmd_check(config: &Config) -> anyhow::Result<()> {
    println!("\n{}", style("Extraction Tools").bold());
    println!("{}", "-".repeat(50));

    let mut all_found = true;
    for (tool, available) in check_tools() {
        let status = if available {
            style("✓ found").green()
        } else {
            all_found = false;
            style("✗ not found").red()
        };
        println!("  {:<15} {}", tool, status);
    }

    if !all_found {
        let pdf = PdfToText::new();
        if !pdf.is_available() {
            println!("  {}", style(pdf.availability_hint()).dim());
        }
        let tesseract = TesseractBackend::new();
        if !tesseract.is_available() {
            println!("  {}", style(tesseract.availability_hint()).dim());
        }
    }
    println!(
        "  {:<15} {}",
        "OCR language",
        style(&config.extraction.ocr_language).cyan()
    );

    println!("\n{}", style("Content Analysis").bold());
    println!("{}", "-".repeat(50));

    let client = LlmClient::new(config.llm.clone())?;
    let status = if client.is_configured() {
        style("✓ configured").green()
    } else {
        style("✗ not configured").yellow()
    };
    println!("  {:<15} {}", client.config().provider, status);
    println!("  {}", style(client.availability_hint()).dim());
    if !client.is_configured() {
        println!(
            "  {}",
            style("Uploads still succeed; suggestions fall back to empty defaults.").dim()
        );
    }

    if let Some(path) = &config.source_path {
        println!("\n{} {}", style("Config:").bold(), path.display());
    }

    Ok(())
}
