// Plain-text layout for rendered résumés: font metrics, page geometry, line wrapping.
// Pure CPU work; callers on the async runtime run it inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod wrap;

// Re-export the public API consumed by the renderer.
pub use font_metrics::{default_page_config, FontMetricTable, PageConfig, HELVETICA};
pub use wrap::paginate;
