use std::sync::Arc;
use std::time::{Duration, Instant};

use career_core::{
    AuthResponse, Credentials, RecommendationResult, Registration, ResumeFile,
    ResumeUploadResponse, SkillExtraction, SkillGapReport, UserProfile,
};
use career_engine::{
    ApiError, CareerApi, EngineCommand, EngineEvent, EngineHandle, ReqwestApi, SessionStore,
};
use pretty_assertions::assert_eq;

/// Answers every call from memory; only login and skill gap are interesting.
struct CannedApi;

fn auth() -> AuthResponse {
    AuthResponse {
        access_token: "tok".to_string(),
        token_type: "bearer".to_string(),
        user_id: "u-1".to_string(),
        email: "ada@example.com".to_string(),
    }
}

#[async_trait::async_trait]
impl CareerApi for CannedApi {
    async fn register(&self, _registration: &Registration) -> Result<AuthResponse, ApiError> {
        Ok(auth())
    }

    async fn login(&self, _credentials: &Credentials) -> Result<AuthResponse, ApiError> {
        Ok(auth())
    }

    async fn current_user(&self) -> Result<UserProfile, ApiError> {
        Ok(UserProfile {
            user_id: None,
            email: "ada@example.com".to_string(),
            full_name: None,
        })
    }

    async fn upload_resume(&self, _file: &ResumeFile) -> Result<ResumeUploadResponse, ApiError> {
        Ok(ResumeUploadResponse {
            message: None,
            resume_id: None,
            extracted_text: String::new(),
            extracted_skills: Vec::new(),
        })
    }

    async fn extract_skills(&self, _text: &str) -> Result<SkillExtraction, ApiError> {
        Ok(SkillExtraction {
            extracted_skills: Vec::new(),
            skill_count: None,
        })
    }

    async fn recommend(
        &self,
        _skills: &[String],
        _top_n: usize,
    ) -> Result<RecommendationResult, ApiError> {
        Ok(RecommendationResult::default())
    }

    async fn skill_gap(
        &self,
        _job_id: &str,
        skills: &[String],
    ) -> Result<SkillGapReport, ApiError> {
        Ok(SkillGapReport {
            user_skills: skills.to_vec(),
            ..SkillGapReport::default()
        })
    }
}

fn recv_within(engine: &EngineHandle, timeout: Duration) -> Option<EngineEvent> {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if let Some(event) = engine.try_recv() {
            return Some(event);
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    None
}

#[test]
fn login_command_produces_authenticated_event() {
    let engine = EngineHandle::new(Arc::new(CannedApi)).unwrap();
    engine.submit(EngineCommand::Login(Credentials {
        email: "ada@example.com".to_string(),
        password: "secret1".to_string(),
    }));

    let event = recv_within(&engine, Duration::from_secs(5)).expect("event");
    assert_eq!(event, EngineEvent::Authenticated(Ok(auth())));
}

#[test]
fn skill_gap_event_carries_job_id() {
    let engine = EngineHandle::new(Arc::new(CannedApi)).unwrap();
    engine.submit(EngineCommand::SkillGap {
        job_id: "j-7".to_string(),
        skills: vec!["rust".to_string()],
    });

    match engine.recv().expect("event") {
        EngineEvent::SkillGapLoaded { job_id, result } => {
            assert_eq!(job_id, "j-7");
            assert_eq!(result.unwrap().user_skills, vec!["rust".to_string()]);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn transport_failures_come_back_as_events() {
    let settings = career_engine::ApiSettings {
        base_url: "http://127.0.0.1:9/api/v1".to_string(),
        ..career_engine::ApiSettings::default()
    };
    let api = ReqwestApi::new(settings, SessionStore::in_memory()).unwrap();
    let engine = EngineHandle::new(Arc::new(api)).unwrap();
    engine.submit(EngineCommand::ValidateSession { check: 4 });

    match recv_within(&engine, Duration::from_secs(10)).expect("event") {
        EngineEvent::SessionChecked {
            check,
            result: Err(err),
        } => {
            assert_eq!(check, 4);
            assert!(err.status().is_none());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
