use std::panic;
use std::path::Path;

use anyhow::anyhow;
use scour_common::api::LocationMatch;
use scour_common::expr::Expression;

/// Accept .pdf files.
pub fn accepts(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

/// Scan a PDF page by page.
///
/// A page matches when the expression matches its extracted text; the result
/// carries the 1-based page number only, no excerpt.
pub fn search(path: &Path, expr: &Expression) -> anyhow::Result<Vec<LocationMatch>> {
    let bytes = std::fs::read(path)?;
    let pages = extract_pages(bytes, &path.display().to_string())?;

    Ok(pages
        .iter()
        .enumerate()
        .filter(|(_, text)| expr.matches(text))
        .map(|(i, _)| LocationMatch::Page { number: i + 1 })
        .collect())
}

/// Extract per-page text from PDF bytes.
///
/// pdf-extract can panic on malformed PDFs; catch_unwind turns that into a
/// recoverable error so the directory scan can continue with other files.
/// The panic hook is process-global and sessions extract concurrently, so it
/// is never swapped here; the file is attributed in the returned error.
fn extract_pages(bytes: Vec<u8>, name: &str) -> anyhow::Result<Vec<String>> {
    let result = panic::catch_unwind(move || pdf_extract::extract_text_from_mem_by_pages(&bytes));

    match result {
        Ok(Ok(pages)) => Ok(pages),
        Ok(Err(e)) => Err(anyhow!("PDF text extraction failed: {e}")),
        Err(_) => {
            tracing::warn!("pdf-extract panicked while processing {name}");
            Err(anyhow!("PDF text extraction panicked"))
        }
    }
}
