//! Resume text extraction for uploaded PDF, DOCX, and plain-text files.
//!
//! PDF goes through `pdf-extract`. DOCX is handed to `pandoc` on a temp file.
//! Everything else is decoded as UTF-8, lossily.

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use tokio::process::Command;
use tracing::debug;

use crate::errors::AppError;

const PDF_MIME: &str = "application/pdf";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const PANDOC_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Docx,
    Text,
}

/// Content type wins; the file extension is the fallback for generic uploads.
pub fn detect_format(content_type: Option<&str>, filename: Option<&str>) -> ResumeFormat {
    match content_type.map(|c| c.split(';').next().unwrap_or(c).trim()) {
        Some(PDF_MIME) => return ResumeFormat::Pdf,
        Some(DOCX_MIME) => return ResumeFormat::Docx,
        _ => {}
    }
    let extension = filename
        .and_then(|f| f.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("pdf") => ResumeFormat::Pdf,
        Some("docx") => ResumeFormat::Docx,
        _ => ResumeFormat::Text,
    }
}

pub async fn extract_resume_text(
    content_type: Option<&str>,
    filename: Option<&str>,
    bytes: &[u8],
) -> Result<String, AppError> {
    let format = detect_format(content_type, filename);
    debug!(?format, size = bytes.len(), "Extracting resume text");

    let text = match format {
        ResumeFormat::Pdf => {
            let bytes = bytes.to_vec();
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .context("PDF extraction task failed")?
                .map_err(|e| AppError::Validation(format!("could not read PDF: {e}")))?
        }
        ResumeFormat::Docx => docx_to_text(bytes).await?,
        ResumeFormat::Text => String::from_utf8_lossy(bytes).into_owned(),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(AppError::Validation(
            "no text could be extracted from the uploaded file".to_string(),
        ));
    }
    Ok(text)
}

async fn docx_to_text(bytes: &[u8]) -> Result<String, AppError> {
    let mut file = tempfile::Builder::new()
        .suffix(".docx")
        .tempfile()
        .context("failed to create temp file for DOCX")?;
    file.write_all(bytes).context("failed to write DOCX temp file")?;

    let mut cmd = Command::new("pandoc");
    cmd.arg("--from=docx").arg("--to=plain").arg(file.path());

    let output = tokio::time::timeout(PANDOC_TIMEOUT, cmd.output())
        .await
        .map_err(|_| AppError::Timeout(PANDOC_TIMEOUT.as_millis()))?
        .context("failed to run pandoc")?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Validation(format!(
            "could not read DOCX: {}",
            stderr.trim()
        )));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
