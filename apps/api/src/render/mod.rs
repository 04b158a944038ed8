//! Document rendering: plain text in, paginated PDF bytes out.
//!
//! Single built-in font, fixed size, greedy line wrapping, no styling. The
//! whole document is built in memory; nothing is written to disk.

use printpdf::{BuiltinFont, Mm, PdfDocument};
use thiserror::Error;
use tracing::debug;

use crate::layout::{default_page_config, paginate, FontMetricTable, PageConfig, HELVETICA};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF rendering failed: {0}")]
    Pdf(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// Turns plain text into a downloadable document.
/// Implementations are synchronous and CPU-bound.
pub trait DocumentRenderer: Send + Sync {
    fn render(&self, title: &str, text: &str) -> Result<Vec<u8>, RenderError>;
}

pub struct PdfRenderer {
    page: PageConfig,
    metrics: &'static FontMetricTable,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(default_page_config())
    }
}

impl PdfRenderer {
    pub fn new(page: PageConfig) -> Self {
        Self {
            page,
            metrics: &HELVETICA,
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, title: &str, text: &str) -> Result<Vec<u8>, RenderError> {
        let text = to_win_ansi(text);
        let pages = paginate(&text, self.metrics, &self.page);
        let width = Mm(self.page.page_width_mm);
        let height = Mm(self.page.page_height_mm);

        let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| RenderError::Pdf(e.to_string()))?;

        let mut first = Some((first_page, first_layer));
        for (index, lines) in pages.iter().enumerate() {
            let (page, layer) = match first.take() {
                Some(indices) => indices,
                None => doc.add_page(width, height, format!("Layer {}", index + 1)),
            };
            let layer = doc.get_page(page).get_layer(layer);

            // First baseline sits one line below the top margin.
            let mut y = self.page.page_height_mm - self.page.margin_mm - self.page.line_height_mm;
            for line in lines {
                if !line.is_empty() {
                    layer.use_text(
                        line.as_str(),
                        self.page.font_size_pt,
                        Mm(self.page.margin_mm),
                        Mm(y),
                        &font,
                    );
                }
                y -= self.page.line_height_mm;
            }
        }

        debug!("Rendered document '{}' with {} page(s)", title, pages.len());
        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(e.to_string()))
    }
}

/// cp1252 characters outside Latin-1 that WinAnsiEncoding can show.
const CP1252_EXTRAS: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Maps text onto what the built-in fonts can show under WinAnsiEncoding.
/// Printable ASCII, Latin-1 and the cp1252 extras pass through; close
/// relatives of those are folded onto them and anything else becomes `?`.
/// Newlines are kept.
fn to_win_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => out.push('\n'),
            '\t' => out.push_str("    "),
            ' '..='~' | '\u{00A0}'..='\u{00FF}' => out.push(c),
            c if CP1252_EXTRAS.contains(c) => out.push(c),
            '\u{201B}' | '\u{2032}' => out.push('\''),
            '\u{201F}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2012}' | '\u{2212}' => out.push('-'),
            '\u{2015}' => out.push('\u{2014}'),
            '\u{2023}' | '\u{2043}' | '\u{25AA}' | '\u{25CF}' => out.push('\u{2022}'),
            '\u{2002}'..='\u{200A}' | '\u{202F}' => out.push(' '),
            c if c.is_whitespace() || c.is_control() => {}
            _ => out.push('?'),
        }
    }
    out
}
