//! Career client core: pure screen state machines and view-model helpers.
mod effect;
mod model;
mod msg;
mod state;
mod update;
pub mod validation;
mod view_model;

pub use effect::Effect;
pub use model::{
    AuthResponse, Credentials, ExtractedSkills, JobMatch, RecommendationResult, Registration,
    RequestFailure, ResumeFile, ResumeUploadResponse, Session, SessionUser, SkillExtraction,
    SkillGapReport, StoredSession, UserProfile,
};
pub use msg::Msg;
pub use state::{AppState, AuthMode, Flash, FlashLevel, Screen, DEFAULT_TOP_N};
pub use update::update;
pub use view_model::{
    AppViewModel, DashboardView, JobCardView, JobResultsView, LoginView, SkillChip,
    SkillGapView, UploadView, NO_RECOMMENDATIONS_MESSAGE, NO_RESULTS_MESSAGE,
    PERFECT_MATCH_MESSAGE,
};
