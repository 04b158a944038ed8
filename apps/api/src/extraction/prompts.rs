// Metadata extraction prompt.

pub const METADATA_SYSTEM: &str = "\
Extract key metadata from the resume text. \
Focus on name, contact information, education, work experience, skills, \
and any other relevant information. \
Provide the output in a structured format.";

/// Separator between per-chunk results when a résumé spans several chunks.
pub const CHUNK_SEPARATOR: &str = "\n\n";
