use std::io;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use career_core::{
    AuthResponse, Credentials, RecommendationResult, Registration, ResumeFile,
    ResumeUploadResponse, SkillExtraction, SkillGapReport, UserProfile,
};
use career_logging::career_debug;

use crate::{ApiError, CareerApi};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Login(Credentials),
    Register(Registration),
    ValidateSession { check: u64 },
    Upload(ResumeFile),
    ExtractSkills { text: String },
    Recommend {
        skills: Vec<String>,
        top_n: usize,
    },
    SkillGap {
        job_id: String,
        skills: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Authenticated(Result<AuthResponse, ApiError>),
    SessionChecked {
        check: u64,
        result: Result<UserProfile, ApiError>,
    },
    Uploaded(Result<ResumeUploadResponse, ApiError>),
    SkillsExtracted(Result<SkillExtraction, ApiError>),
    Recommended(Result<RecommendationResult, ApiError>),
    SkillGapLoaded {
        job_id: String,
        result: Result<SkillGapReport, ApiError>,
    },
}

/// Runs API calls on a private tokio runtime. Each command is one request;
/// results come back in completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(api: Arc<dyn CareerApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel::<EngineCommand>();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("career-engine-io")
            .build()?;

        thread::Builder::new()
            .name("career-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
                career_debug!("Engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn submit(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the engine is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.recv().ok()
    }
}

async fn handle_command(api: &dyn CareerApi, command: EngineCommand) -> EngineEvent {
    match command {
        EngineCommand::Login(credentials) => {
            EngineEvent::Authenticated(api.login(&credentials).await)
        }
        EngineCommand::Register(registration) => {
            EngineEvent::Authenticated(api.register(&registration).await)
        }
        EngineCommand::ValidateSession { check } => EngineEvent::SessionChecked {
            check,
            result: api.current_user().await,
        },
        EngineCommand::Upload(file) => EngineEvent::Uploaded(api.upload_resume(&file).await),
        EngineCommand::ExtractSkills { text } => {
            EngineEvent::SkillsExtracted(api.extract_skills(&text).await)
        }
        EngineCommand::Recommend { skills, top_n } => {
            EngineEvent::Recommended(api.recommend(&skills, top_n).await)
        }
        EngineCommand::SkillGap { job_id, skills } => {
            let result = api.skill_gap(&job_id, &skills).await;
            EngineEvent::SkillGapLoaded { job_id, result }
        }
    }
}
