use std::path::PathBuf;

use crate::{Credentials, Registration, ResumeFile, Session};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Login(Credentials),
    Register(Registration),
    /// Write token and user to the session store.
    PersistSession(Session),
    /// Remove token and user from the session store.
    ClearSession,
    /// Read the session store and answer with `Msg::DashboardOpened`.
    OpenDashboard,
    /// `GET /auth/me` with the stored token; `check` comes back with the answer.
    ValidateSession { check: u64 },
    /// Inspect a path and answer with `Msg::ResumeSelected` or `Msg::ResumeUnreadable`.
    InspectResume(PathBuf),
    UploadResume(ResumeFile),
    ExtractSkills { text: String },
    Recommend {
        skills: Vec<String>,
        top_n: usize,
    },
    FetchSkillGap {
        job_id: String,
        skills: Vec<String>,
    },
    Exit,
}
