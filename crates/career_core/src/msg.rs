use std::path::PathBuf;

use crate::{
    AuthResponse, RecommendationResult, RequestFailure, ResumeFile, ResumeUploadResponse,
    SkillExtraction, SkillGapReport, StoredSession, UserProfile,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User flipped between sign-in and registration.
    AuthModeToggled,
    /// User edited the email field.
    EmailChanged(String),
    /// User edited the password field.
    PasswordChanged(String),
    /// User edited the full name field (registration only).
    FullNameChanged(String),
    /// User submitted the login form.
    LoginSubmitted,
    /// Engine finished a login or registration request.
    AuthCompleted(Result<AuthResponse, RequestFailure>),
    /// Writing the new session to the store failed.
    SessionPersistFailed(String),
    /// Persisted session was read; the one signal that opens the dashboard.
    DashboardOpened(StoredSession),
    /// Engine finished the `GET /auth/me` started as `check`.
    SessionChecked {
        check: u64,
        result: Result<UserProfile, RequestFailure>,
    },
    /// User picked a file path for upload.
    ResumeChosen(PathBuf),
    /// The chosen path was inspected.
    ResumeSelected(ResumeFile),
    /// The chosen path could not be inspected.
    ResumeUnreadable { path: PathBuf, reason: String },
    /// User clicked Upload.
    UploadClicked,
    /// Engine finished the upload.
    UploadCompleted(Result<ResumeUploadResponse, RequestFailure>),
    /// User asked to extract skills from free text.
    ExtractTextSubmitted(String),
    /// Engine finished the text extraction.
    ExtractCompleted(Result<SkillExtraction, RequestFailure>),
    /// User asked for recommendations; `None` uses the configured default.
    RecommendClicked { top_n: Option<usize> },
    /// Engine finished the recommendation request.
    RecommendCompleted(Result<RecommendationResult, RequestFailure>),
    /// User asked for the skill gap of one job.
    SkillGapRequested { job_id: String },
    /// Engine finished the skill gap request.
    SkillGapCompleted {
        job_id: String,
        result: Result<SkillGapReport, RequestFailure>,
    },
    /// User asked to see the current skills or results again.
    RedrawRequested,
    /// User asked for the command list.
    HelpRequested,
    /// User clicked Logout.
    LogoutClicked,
    /// User asked to leave.
    QuitRequested,
    /// No more user input will arrive.
    InputClosed,
    /// Input line that did not parse.
    UnknownCommand(String),
}
