// Resume generation prompt.

pub const GENERATION_SYSTEM: &str = "Generate a resume based on these qualifications.";
