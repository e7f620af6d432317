// Analysis module: fact sheet assembly and prompt generation for the two
// shop-floor forms (quality defects, safety incidents). The generated
// prompt is pasted into an external LLM chat tool by the operator; no LLM
// is called from here.

pub mod facts;
pub mod handlers;
pub mod prompts;
