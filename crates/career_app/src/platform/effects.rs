use std::sync::mpsc;
use std::thread;

use career_core::{Effect, Msg, RequestFailure, StoredSession};
use career_engine::{inspect_resume, EngineCommand, EngineEvent, EngineHandle, SessionStore};
use career_logging::{career_debug, career_error, career_info, career_warn};

/// Executes effects. Network work goes to the engine and comes back later
/// over `msg_tx`; store and file work runs inline and its answer is returned
/// so the caller can dispatch it before anything else.
pub struct EffectRunner {
    engine: EngineHandle,
    session: SessionStore,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle, session: SessionStore, msg_tx: mpsc::Sender<Msg>) -> Self {
        let runner = Self { engine, session };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn run(&self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            career_debug!("Running effect {}", effect_name(&effect));
            match effect {
                Effect::Login(credentials) => self.engine.submit(EngineCommand::Login(credentials)),
                Effect::Register(registration) => {
                    self.engine.submit(EngineCommand::Register(registration))
                }
                Effect::ValidateSession { check } => {
                    self.engine.submit(EngineCommand::ValidateSession { check })
                }
                Effect::UploadResume(file) => self.engine.submit(EngineCommand::Upload(file)),
                Effect::ExtractSkills { text } => {
                    self.engine.submit(EngineCommand::ExtractSkills { text })
                }
                Effect::Recommend { skills, top_n } => {
                    self.engine.submit(EngineCommand::Recommend { skills, top_n })
                }
                Effect::FetchSkillGap { job_id, skills } => {
                    self.engine.submit(EngineCommand::SkillGap { job_id, skills })
                }
                Effect::PersistSession(session) => match self.session.save(&session) {
                    Ok(()) => career_info!("Session stored for {}", session.user.email),
                    Err(err) => {
                        career_error!("Failed to persist session: {}", err);
                        follow_ups.push(Msg::SessionPersistFailed(err.to_string()));
                    }
                },
                Effect::ClearSession => {
                    if let Err(err) = self.session.clear() {
                        career_error!("Failed to clear session: {}", err);
                    }
                }
                Effect::OpenDashboard => {
                    let stored = self.session.load().unwrap_or_else(|err| {
                        career_warn!("Session store unreadable: {}", err);
                        StoredSession::Corrupt
                    });
                    follow_ups.push(Msg::DashboardOpened(stored));
                }
                Effect::InspectResume(path) => {
                    let msg = match inspect_resume(&path) {
                        Ok(file) => Msg::ResumeSelected(file),
                        Err(err) => Msg::ResumeUnreadable {
                            path,
                            reason: err.to_string(),
                        },
                    };
                    follow_ups.push(msg);
                }
                Effect::Exit => {}
            }
        }
        follow_ups
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            while let Some(event) = engine.recv() {
                if msg_tx.send(event_to_msg(event)).is_err() {
                    break;
                }
            }
        });
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::Authenticated(result) => {
            Msg::AuthCompleted(result.map_err(RequestFailure::from))
        }
        EngineEvent::SessionChecked { check, result } => Msg::SessionChecked {
            check,
            result: result.map_err(RequestFailure::from),
        },
        EngineEvent::Uploaded(result) => Msg::UploadCompleted(result.map_err(RequestFailure::from)),
        EngineEvent::SkillsExtracted(result) => {
            Msg::ExtractCompleted(result.map_err(RequestFailure::from))
        }
        EngineEvent::Recommended(result) => {
            Msg::RecommendCompleted(result.map_err(RequestFailure::from))
        }
        EngineEvent::SkillGapLoaded { job_id, result } => Msg::SkillGapCompleted {
            job_id,
            result: result.map_err(RequestFailure::from),
        },
    }
}

/// Effect label for logs; payloads may hold passwords.
fn effect_name(effect: &Effect) -> &'static str {
    match effect {
        Effect::Login(_) => "Login",
        Effect::Register(_) => "Register",
        Effect::PersistSession(_) => "PersistSession",
        Effect::ClearSession => "ClearSession",
        Effect::OpenDashboard => "OpenDashboard",
        Effect::ValidateSession { .. } => "ValidateSession",
        Effect::InspectResume(_) => "InspectResume",
        Effect::UploadResume(_) => "UploadResume",
        Effect::ExtractSkills { .. } => "ExtractSkills",
        Effect::Recommend { .. } => "Recommend",
        Effect::FetchSkillGap { .. } => "FetchSkillGap",
        Effect::Exit => "Exit",
    }
}
