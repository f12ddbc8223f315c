// Cover letter generation: instruction compiler, posting parser, fallback letter, pipeline.
// All completion calls go through llm_client — no direct HTTP calls here.

pub mod compiler;
pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod posting_parser;
pub mod prompts;
