//! Axum route handlers for the career chatbot.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::prompts::{CAREER_ADVISOR_SYSTEM, RESUME_SKILLS_CONTEXT};
use crate::errors::AppError;
use crate::llm_client::{ChatMessage, ChatRole};
use crate::resumes::queries::fetch_resume;
use crate::state::AppState;

/// Older turns are dropped beyond this many.
const MAX_HISTORY_TURNS: usize = 20;
const MAX_MESSAGE_CHARS: usize = 4000;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
    pub resume_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

fn validate_message(message: &str) -> Result<(), AppError> {
    if message.trim().is_empty() {
        return Err(AppError::Validation("message cannot be empty".to_string()));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(AppError::Validation(format!(
            "message cannot exceed {MAX_MESSAGE_CHARS} characters"
        )));
    }
    Ok(())
}

/// Recent history followed by the new user message. The Messages API expects
/// the conversation to open with a user turn, so a leading assistant turn left
/// over from truncation is dropped.
fn build_conversation(history: Vec<ChatMessage>, message: &str) -> Vec<ChatMessage> {
    let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
    let mut conversation: Vec<ChatMessage> = history
        .into_iter()
        .skip(skip)
        .filter(|m| !m.content.trim().is_empty())
        .skip_while(|m| m.role == ChatRole::Assistant)
        .collect();

    conversation.push(ChatMessage {
        role: ChatRole::User,
        content: message.trim().to_string(),
    });
    conversation
}

fn build_system_prompt(skills: Option<&[String]>) -> String {
    match skills {
        Some(skills) if !skills.is_empty() => format!(
            "{CAREER_ADVISOR_SYSTEM}{}",
            RESUME_SKILLS_CONTEXT.replace("{skills}", &skills.join(", "))
        ),
        _ => CAREER_ADVISOR_SYSTEM.to_string(),
    }
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate_message(&request.message)?;

    let skills = match request.resume_id {
        Some(resume_id) => {
            let resume = fetch_resume(&state.db, resume_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
            Some(resume.extracted_skills)
        }
        None => None,
    };

    let system = build_system_prompt(skills.as_deref());
    let conversation = build_conversation(request.history, &request.message);

    let reply = state
        .llm
        .chat(&system, &conversation)
        .await
        .map_err(|e| AppError::Upstream(format!("Chat completion failed: {e}")))?;

    Ok(Json(ChatResponse { reply }))
}
