// Career chatbot: conversation plumbing around `llm_client`.

pub mod handlers;
pub mod prompts;
