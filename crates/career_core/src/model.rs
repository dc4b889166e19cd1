//! Data shapes exchanged with the backend and persisted on the client.
//!
//! Wire types default missing fields so that a partial payload still decodes;
//! the view layer decides how to present what is missing.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identity stored next to the bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

impl SessionUser {
    /// Name shown in the dashboard greeting.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.email)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
}

/// Outcome of reading the persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredSession {
    /// Token or user entry absent.
    Missing,
    /// Entries present but the user record does not decode.
    Corrupt,
    Present(Session),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user_id: String,
    pub email: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of `GET /auth/me`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub user_id: Option<String>,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A file picked for upload, as seen before any request is made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub path: PathBuf,
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ResumeUploadResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub resume_id: Option<String>,
    #[serde(default)]
    pub extracted_text: String,
    #[serde(default)]
    pub extracted_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SkillExtraction {
    #[serde(default, alias = "skills")]
    pub extracted_skills: Vec<String>,
    #[serde(default)]
    pub skill_count: Option<usize>,
}

/// Skills held by the dashboard for the lifetime of the screen.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedSkills {
    pub skills: Vec<String>,
    pub text_preview: Option<String>,
}

impl From<ResumeUploadResponse> for ExtractedSkills {
    fn from(response: ResumeUploadResponse) -> Self {
        let text_preview = Some(response.extracted_text).filter(|text| !text.trim().is_empty());
        Self {
            skills: response.extracted_skills,
            text_preview,
        }
    }
}

impl From<SkillExtraction> for ExtractedSkills {
    fn from(extraction: SkillExtraction) -> Self {
        Self {
            skills: extraction.extracted_skills,
            text_preview: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JobMatch {
    #[serde(default)]
    pub job_id: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
    #[serde(default)]
    pub match_percentage: f64,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub user_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub skill_gap_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecommendationResult {
    #[serde(default)]
    pub user_skills: Vec<String>,
    #[serde(default)]
    pub total_jobs_found: usize,
    #[serde(default)]
    pub recommendations: Option<Vec<JobMatch>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SkillGapReport {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub user_skills: Vec<String>,
    #[serde(default)]
    pub matching_skills: Vec<String>,
    #[serde(default)]
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub match_percentage: f64,
    #[serde(default)]
    pub skill_gap_count: usize,
}

/// Request failure as the screens see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    /// HTTP status when the server answered.
    pub status: Option<u16>,
    /// Structured message from the server body.
    pub detail: Option<String>,
    /// Transport level description.
    pub message: String,
}

impl RequestFailure {
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }

    /// Server detail first, then the transport message, then `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail
            .as_deref()
            .filter(|detail| !detail.trim().is_empty())
            .or_else(|| Some(self.message.as_str()).filter(|msg| !msg.trim().is_empty()))
            .unwrap_or(fallback)
            .to_string()
    }
}
