use std::time::Duration;

use career_core::{
    AuthResponse, Credentials, RecommendationResult, Registration, ResumeFile,
    ResumeUploadResponse, SkillExtraction, SkillGapReport, UserProfile,
};
use career_logging::{career_debug, career_info, career_warn, next_request_seq};
use reqwest::header::AUTHORIZATION;
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::map_reqwest_error;
use crate::{ApiError, ApiErrorKind, SessionStore};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub connect_timeout: Option<Duration>,
    /// Requests run until the server answers unless this is set.
    pub request_timeout: Option<Duration>,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

/// Operations of the career backend.
#[async_trait::async_trait]
pub trait CareerApi: Send + Sync {
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError>;

    async fn current_user(&self) -> Result<UserProfile, ApiError>;

    async fn upload_resume(&self, file: &ResumeFile) -> Result<ResumeUploadResponse, ApiError>;

    async fn extract_skills(&self, text: &str) -> Result<SkillExtraction, ApiError>;

    async fn recommend(
        &self,
        skills: &[String],
        top_n: usize,
    ) -> Result<RecommendationResult, ApiError>;

    async fn skill_gap(
        &self,
        job_id: &str,
        skills: &[String],
    ) -> Result<SkillGapReport, ApiError>;
}

#[derive(Serialize)]
struct RecommendRequest<'a> {
    user_skills: &'a [String],
    top_n: usize,
}

#[derive(Serialize)]
struct SkillGapRequest<'a> {
    user_skills: &'a [String],
}

/// HTTP implementation. The bearer token is read from the session store on
/// every request, so a login or logout takes effect immediately.
#[derive(Clone)]
pub struct ReqwestApi {
    client: reqwest::Client,
    base_url: Url,
    session: SessionStore,
}

impl ReqwestApi {
    pub fn new(settings: ApiSettings, session: SessionStore) -> Result<Self, ApiError> {
        let base_url = Url::parse(settings.base_url.trim())
            .map_err(|err| ApiError::new(ApiErrorKind::InvalidUrl, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::new(
                ApiErrorKind::InvalidUrl,
                format!("{base_url} cannot be used as a base url"),
            ));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(ApiErrorKind::Network, err.to_string()))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Appends path segments to the base url; each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(ApiErrorKind::InvalidUrl, "base url has no path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> (u64, RequestBuilder) {
        let seq = next_request_seq();
        let token = self.session.token();
        career_info!(
            "[req {}] {} {} (token {})",
            seq,
            method,
            url.path(),
            if token.is_some() { "attached" } else { "absent" }
        );
        let mut builder = self.client.request(method, url);
        if let Some(token) = token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        (seq, builder)
    }

    async fn send<R: DeserializeOwned>(
        &self,
        seq: u64,
        builder: RequestBuilder,
    ) -> Result<R, ApiError> {
        let response = builder.send().await.map_err(|err| {
            career_warn!("[req {}] transport failure: {}", seq, err);
            map_reqwest_error(err)
        })?;

        let status = response.status();
        career_info!("[req {}] response {}", seq, status);
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let detail = error_detail(&body);
            career_warn!(
                "[req {}] error body: {}",
                seq,
                String::from_utf8_lossy(&body)
            );
            return Err(ApiError::new(
                ApiErrorKind::HttpStatus(status.as_u16()),
                format!("Request failed with status {}", status.as_u16()),
            )
            .with_detail(detail));
        }

        serde_json::from_slice::<R>(&body).map_err(|err| {
            career_debug!(
                "[req {}] undecodable body: {}",
                seq,
                String::from_utf8_lossy(&body)
            );
            ApiError::new(ApiErrorKind::Decode, err.to_string())
        })
    }

    async fn post_json<T, R>(&self, segments: &[&str], payload: &T) -> Result<R, ApiError>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        let (seq, builder) = self.request(Method::POST, url);
        self.send(seq, builder.json(payload)).await
    }
}

#[async_trait::async_trait]
impl CareerApi for ReqwestApi {
    async fn register(&self, registration: &Registration) -> Result<AuthResponse, ApiError> {
        self.post_json(&["auth", "register"], registration).await
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        self.post_json(&["auth", "login"], credentials).await
    }

    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        let url = self.endpoint(&["auth", "me"])?;
        let (seq, builder) = self.request(Method::GET, url);
        self.send(seq, builder).await
    }

    async fn upload_resume(&self, file: &ResumeFile) -> Result<ResumeUploadResponse, ApiError> {
        let bytes = tokio::fs::read(&file.path).await.map_err(|err| {
            ApiError::new(
                ApiErrorKind::Io,
                format!("Failed to read {}: {err}", file.path.display()),
            )
        })?;
        let part = Part::bytes(bytes)
            .file_name(file.file_name.clone())
            .mime_str(&file.mime_type)
            .map_err(|err| ApiError::new(ApiErrorKind::Io, err.to_string()))?;
        let form = Form::new().part("file", part);

        let url = self.endpoint(&["resume", "upload"])?;
        let (seq, builder) = self.request(Method::POST, url);
        self.send(seq, builder.multipart(form)).await
    }

    async fn extract_skills(&self, text: &str) -> Result<SkillExtraction, ApiError> {
        let mut url = self.endpoint(&["resume", "extract-skills"])?;
        url.query_pairs_mut().append_pair("text", text);
        let (seq, builder) = self.request(Method::POST, url);
        self.send(seq, builder).await
    }

    async fn recommend(
        &self,
        skills: &[String],
        top_n: usize,
    ) -> Result<RecommendationResult, ApiError> {
        let payload = RecommendRequest {
            user_skills: skills,
            top_n,
        };
        self.post_json(&["jobs", "recommend"], &payload).await
    }

    async fn skill_gap(
        &self,
        job_id: &str,
        skills: &[String],
    ) -> Result<SkillGapReport, ApiError> {
        let payload = SkillGapRequest {
            user_skills: skills,
        };
        self.post_json(&["jobs", "skill-gap", job_id], &payload).await
    }
}

/// Pulls the human-readable message out of an error body.
///
/// Understands `{"detail": "..."}`, validation lists
/// `{"detail": [{"msg": "..."}]}` and `{"error": "..."}`.
fn error_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => return Some(detail.clone()),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                .collect();
            if !messages.is_empty() {
                return Some(messages.join("; "));
            }
        }
        _ => {}
    }
    value
        .get("error")
        .and_then(|error| error.as_str())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_is_extracted() {
        assert_eq!(
            error_detail(br#"{"detail": "Email already registered"}"#).as_deref(),
            Some("Email already registered")
        );
    }

    #[test]
    fn validation_list_is_flattened() {
        let body = br#"{"detail": [{"loc": ["body", "email"], "msg": "value is not a valid email address"}, {"msg": "field required"}]}"#;
        assert_eq!(
            error_detail(body).as_deref(),
            Some("value is not a valid email address; field required")
        );
    }

    #[test]
    fn non_json_body_has_no_detail() {
        assert_eq!(error_detail(b"Internal Server Error"), None);
        assert_eq!(
            error_detail(br#"{"error": "boom"}"#).as_deref(),
            Some("boom")
        );
    }

    #[test]
    fn endpoint_appends_and_encodes_segments() {
        let settings = ApiSettings {
            base_url: "http://localhost:8000/api/v1/".to_string(),
            ..ApiSettings::default()
        };
        let api = ReqwestApi::new(settings, SessionStore::in_memory()).unwrap();
        let url = api.endpoint(&["jobs", "skill-gap", "a b/c"]).unwrap();
        assert_eq!(url.path(), "/api/v1/jobs/skill-gap/a%20b%2Fc");
    }

    #[test]
    fn rejects_unusable_base_url() {
        let settings = ApiSettings {
            base_url: "mailto:someone@example.com".to_string(),
            ..ApiSettings::default()
        };
        let err = ReqwestApi::new(settings, SessionStore::in_memory())
            .err()
            .expect("invalid base url");
        assert_eq!(err.kind, ApiErrorKind::InvalidUrl);
    }
}
