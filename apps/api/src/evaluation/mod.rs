// Match Evaluator: resume text + job text -> typed EvaluationResult.
// All LLM calls go through llm_client.

pub mod evaluator;
pub mod handlers;
pub mod prompts;
