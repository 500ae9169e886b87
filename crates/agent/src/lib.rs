//! LLM-facing side of the pipeline.
//!
//! Two delegations live here, both best-effort by contract:
//! - `dates` turns a free-text query plus "today" into a concrete inclusive
//!   date range, falling back to today/today on any failure,
//! - `analyst` hands the filtered orders and the question to the model under
//!   a fixed data contract and returns prose, or an apology.
//!
//! Both go through the `LlmClient` seam; `gemini` is the production
//! implementation. The LLM never filters or selects data itself - it only
//! interprets dates and narrates the order set it is given.

pub mod analyst;
pub mod dates;
pub mod gemini;
pub mod llm;

pub use analyst::SalesAnalyst;
pub use dates::DateRangeResolver;
pub use gemini::GeminiClient;
pub use llm::LlmClient;
