use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resumes::parser_client::{ParsedResume, ParserError};
use crate::resumes::queries::{self, NewResume};
use crate::state::AppState;

pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const PDF: &str = "application/pdf";
const DOC: &str = "application/msword";
const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// A resume file received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

/// Accepted content type for an upload. A declared type wins when it is one of
/// the accepted ones; otherwise the file extension decides.
pub fn resolve_content_type(file_name: &str, declared: Option<&str>) -> Option<&'static str> {
    if let Some(declared) = declared {
        let declared = declared.split(';').next().unwrap_or_default().trim();
        if let Some(known) = [PDF, DOC, DOCX].into_iter().find(|t| t.eq_ignore_ascii_case(declared)) {
            return Some(known);
        }
    }

    let extension = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some(PDF),
        "doc" => Some(DOC),
        "docx" => Some(DOCX),
        _ => None,
    }
}

pub fn validate_upload(file: &UploadedFile) -> Result<&'static str, AppError> {
    if file.content.is_empty() {
        return Err(AppError::Validation("Uploaded file is empty".to_string()));
    }
    if file.content.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "Uploaded file exceeds {} MB",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }
    resolve_content_type(&file.file_name, file.content_type.as_deref()).ok_or_else(|| {
        AppError::Validation("Only PDF, DOC and DOCX resumes are supported".to_string())
    })
}

/// Keeps the base name and replaces anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.trim_matches('.').is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

pub fn resume_s3_key(user_id: Uuid, resume_id: Uuid, file_name: &str) -> String {
    format!("resumes/{user_id}/{resume_id}/{file_name}")
}

/// How a parser call changes the resume row.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseUpdate {
    Parsed {
        skills: Vec<String>,
        ats_score: f64,
        score_breakdown: Value,
    },
    Failed {
        error: String,
    },
}

impl From<Result<ParsedResume, ParserError>> for ParseUpdate {
    fn from(outcome: Result<ParsedResume, ParserError>) -> Self {
        match outcome {
            Ok(parsed) => ParseUpdate::Parsed {
                skills: parsed.extracted_skills,
                ats_score: parsed.final_ats_score.clamp(0.0, 100.0),
                score_breakdown: parsed.score_breakdown,
            },
            Err(e) => ParseUpdate::Failed {
                error: e.to_string(),
            },
        }
    }
}

/// Stores the file, records the resume and runs the skill parser.
/// A parser failure is recorded on the row and does not fail the upload.
pub async fn ingest_resume(
    state: &AppState,
    user_id: Uuid,
    file: UploadedFile,
) -> Result<ResumeRow, AppError> {
    let content_type = validate_upload(&file)?;
    let file_name = sanitize_file_name(&file.file_name);
    let resume_id = Uuid::new_v4();
    let s3_key = resume_s3_key(user_id, resume_id, &file_name);

    state
        .s3
        .put_object()
        .bucket(&state.config.s3_bucket)
        .key(&s3_key)
        .body(ByteStream::from(file.content.clone()))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!("Uploaded resume to s3://{}/{}", state.config.s3_bucket, s3_key);

    queries::insert_resume(
        &state.db,
        NewResume {
            id: resume_id,
            user_id,
            file_name: &file_name,
            content_type,
            s3_key: &s3_key,
        },
    )
    .await?;

    run_parser(state, resume_id, &file_name, content_type, file.content).await
}

/// Re-sends a stored resume to the parser. Only ever triggered by the user.
pub async fn reparse_resume(state: &AppState, resume: &ResumeRow) -> Result<ResumeRow, AppError> {
    let object = state
        .s3
        .get_object()
        .bucket(&state.config.s3_bucket)
        .key(&resume.s3_key)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume download failed: {e}")))?;

    let content = object
        .body
        .collect()
        .await
        .map_err(|e| AppError::S3(format!("Resume download failed: {e}")))?
        .into_bytes();

    run_parser(
        state,
        resume.id,
        &resume.file_name,
        &resume.content_type,
        content,
    )
    .await
}

pub async fn delete_resume(state: &AppState, resume_id: Uuid) -> Result<(), AppError> {
    let deleted = queries::delete_resume(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;

    // the row is gone either way; an orphaned object is only logged
    if let Err(e) = state
        .s3
        .delete_object()
        .bucket(&state.config.s3_bucket)
        .key(&deleted.s3_key)
        .send()
        .await
    {
        warn!("Failed to delete s3://{}/{}: {e}", state.config.s3_bucket, deleted.s3_key);
    }

    info!("Deleted resume {resume_id}");
    Ok(())
}

async fn run_parser(
    state: &AppState,
    resume_id: Uuid,
    file_name: &str,
    content_type: &str,
    content: Bytes,
) -> Result<ResumeRow, AppError> {
    let outcome = state.parser.parse(file_name, content_type, content).await;

    match ParseUpdate::from(outcome) {
        ParseUpdate::Parsed {
            skills,
            ats_score,
            score_breakdown,
        } => {
            info!("Resume {resume_id} parsed: {} skills", skills.len());
            Ok(queries::mark_parsed(&state.db, resume_id, &skills, ats_score, &score_breakdown).await?)
        }
        ParseUpdate::Failed { error } => {
            warn!("Resume {resume_id} parse failed: {error}");
            Ok(queries::mark_failed(&state.db, resume_id, &error).await?)
        }
    }
}
