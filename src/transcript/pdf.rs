//! PDF export for transcripts.
//!
//! Lays the text out as fixed-width lines on A4 pages using the built-in
//! Helvetica font, starting a new page when the bottom margin is reached.

use crate::config::ExportSettings;
use crate::error::{Result, TubeqaError};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::path::Path;
use tracing::{debug, instrument};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 10.0;

/// Number of lines that fit between the top and bottom margins.
pub fn lines_per_page() -> usize {
    ((PAGE_HEIGHT_MM - 2.0 * MARGIN_MM) / LINE_HEIGHT_MM).floor() as usize
}

/// Split text into lines of at most `line_chars` characters.
///
/// Built-in PDF fonts only cover Latin-1, so other characters become `?`.
/// Line breaks and tabs are folded into spaces before slicing.
pub fn layout_lines(text: &str, line_chars: usize) -> Vec<String> {
    let sanitized: Vec<char> = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if (c as u32) < 0x20 => ' ',
            c if (c as u32) <= 0xFF => c,
            _ => '?',
        })
        .collect();

    sanitized
        .chunks(line_chars.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Render text into PDF bytes.
#[instrument(skip(text, settings), fields(chars = text.len()))]
pub fn render_pdf(text: &str, title: &str, settings: &ExportSettings) -> Result<Vec<u8>> {
    let lines = layout_lines(text, settings.pdf_line_chars);
    let per_page = lines_per_page();

    let (doc, first_page, first_layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Transcript");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| TubeqaError::Export(format!("Failed to load font: {}", e)))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);
    let first_baseline = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM * 0.7;

    for (i, line) in lines.iter().enumerate() {
        if i > 0 && i % per_page == 0 {
            let (page, page_layer) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Transcript");
            layer = doc.get_page(page).get_layer(page_layer);
        }

        let y = first_baseline - (i % per_page) as f32 * LINE_HEIGHT_MM;
        layer.use_text(line.clone(), settings.pdf_font_size, Mm(MARGIN_MM), Mm(y), &font);
    }

    debug!(
        "Laid out {} lines on {} pages",
        lines.len(),
        lines.len().div_ceil(per_page).max(1)
    );

    doc.save_to_bytes()
        .map_err(|e| TubeqaError::Export(format!("Failed to write PDF: {}", e)))
}

/// Save text as a PDF file.
pub fn save_pdf_file(text: &str, title: &str, path: &Path, settings: &ExportSettings) -> Result<()> {
    let bytes = render_pdf(text, title, settings)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)?;
    Ok(())
}
