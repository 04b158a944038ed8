//! Download filenames built from client-supplied name and company fields.
//!
//! Only ASCII letters, digits, `-` and `_` survive. Any other run of
//! characters collapses to a single `_`, so the result can never carry a path
//! separator, a dot segment or a quote into the `Content-Disposition` header.

const MAX_PART_LEN: usize = 64;
const FALLBACK_PART: &str = "resume";

/// `<name>_<company>.pdf` with both parts sanitized.
pub fn attachment_filename(name: &str, company: &str) -> String {
    format!("{}_{}.pdf", sanitize_part(name), sanitize_part(company))
}

fn sanitize_part(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len().min(MAX_PART_LEN));
    let mut pending_separator = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            pending_separator = false;
            out.push(c);
        } else {
            pending_separator = true;
        }
        if out.len() >= MAX_PART_LEN {
            break;
        }
    }

    out.truncate(MAX_PART_LEN);
    let trimmed = out.trim_matches(|c| c == '_' || c == '-');
    if trimmed.is_empty() {
        FALLBACK_PART.to_string()
    } else {
        trimmed.to_string()
    }
}
