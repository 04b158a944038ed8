//! Greedy word wrap and pagination for plain text.
//!
//! Paragraph breaks in the source (`\n`) are kept; blank source lines become
//! blank output lines. A word wider than the line is hard-broken by character.

use crate::layout::font_metrics::{FontMetricTable, PageConfig};

/// Wraps `text` into lines no wider than `max_width_em`.
pub fn wrap_lines(text: &str, metrics: &FontMetricTable, max_width_em: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        wrap_paragraph(paragraph, metrics, max_width_em, &mut lines);
    }
    lines
}

fn wrap_paragraph(
    paragraph: &str,
    metrics: &FontMetricTable,
    max_width: f32,
    lines: &mut Vec<String>,
) {
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in paragraph.split_whitespace() {
        let word_w = metrics.measure_str(word);
        let space_w = if current.is_empty() {
            0.0
        } else {
            metrics.space_width
        };

        if current_width + space_w + word_w <= max_width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_width += space_w + word_w;
            continue;
        }

        // Current line is full; push it and start a new line.
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0.0;
        }

        if word_w <= max_width {
            current.push_str(word);
            current_width = word_w;
        } else {
            for c in word.chars() {
                let c_w = metrics.char_width(c);
                if !current.is_empty() && current_width + c_w > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += c_w;
            }
        }
    }
    // Push the final (possibly partial) line.
    if !current.is_empty() {
        lines.push(current);
    }
}

/// Wraps `text` for `config` and groups the lines into pages.
/// Always returns at least one (possibly empty) page.
pub fn paginate(text: &str, metrics: &FontMetricTable, config: &PageConfig) -> Vec<Vec<String>> {
    let lines = wrap_lines(text, metrics, config.text_width_em());
    if lines.is_empty() {
        return vec![Vec::new()];
    }
    lines
        .chunks(config.lines_per_page())
        .map(|page| page.to_vec())
        .collect()
}
