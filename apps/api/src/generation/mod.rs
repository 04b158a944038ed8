// Resume generation: qualifications → LLM draft → rendered PDF attachment.
// All LLM calls go through llm_client and are wrapped in the shared RetryPolicy.

pub mod filename;
pub mod generator;
pub mod handlers;
pub mod prompts;
