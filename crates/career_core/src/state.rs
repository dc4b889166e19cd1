use crate::view_model::{AppViewModel, DashboardView, LoginView, UploadView};
use crate::{ExtractedSkills, RecommendationResult, ResumeFile, SessionUser, SkillGapReport};

/// Recommendations requested when the user does not ask for a count.
pub const DEFAULT_TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
    Exited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

impl AuthMode {
    pub fn toggled(self) -> Self {
        match self {
            AuthMode::SignIn => AuthMode::Register,
            AuthMode::Register => AuthMode::SignIn,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Warning,
    Error,
}

/// A message shown once. `seq` makes a repeated text render again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub seq: u64,
    pub level: FlashLevel,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct LoginForm {
    pub(crate) mode: AuthMode,
    pub(crate) email: String,
    pub(crate) password: String,
    pub(crate) full_name: String,
    pub(crate) submitting: bool,
    pub(crate) error: Option<Flash>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct UploadPanel {
    pub(crate) selected: Option<ResumeFile>,
    pub(crate) uploading: bool,
    pub(crate) error: Option<Flash>,
    pub(crate) extracted: Option<ExtractedSkills>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct Dashboard {
    pub(crate) user: Option<SessionUser>,
    /// Outstanding session check, if any.
    pub(crate) session_check: Option<u64>,
    pub(crate) upload: UploadPanel,
    pub(crate) extracting: bool,
    pub(crate) skills: Vec<String>,
    pub(crate) recommending: bool,
    pub(crate) recommendations: Option<RecommendationResult>,
    pub(crate) gap_in_flight: Option<String>,
    pub(crate) skill_gap: Option<(String, SkillGapReport)>,
    pub(crate) notice: Option<Flash>,
}

impl Dashboard {
    pub(crate) fn is_busy(&self) -> bool {
        self.session_check.is_some()
            || self.upload.uploading
            || self.extracting
            || self.recommending
            || self.gap_in_flight.is_some()
    }

    /// New skills invalidate everything derived from the old ones.
    pub(crate) fn replace_skills(&mut self, skills: Vec<String>) {
        self.skills = skills;
        self.recommendations = None;
        self.skill_gap = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub(crate) screen: Screen,
    pub(crate) login: LoginForm,
    pub(crate) dashboard: Dashboard,
    pub(crate) default_top_n: usize,
    pub(crate) input_closed: bool,
    pub(crate) help_seq: u64,
    pub(crate) redraw_seq: u64,
    seq: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::default(),
            login: LoginForm::default(),
            dashboard: Dashboard::default(),
            default_top_n: DEFAULT_TOP_N,
            input_closed: false,
            help_seq: 0,
            redraw_seq: 0,
            seq: 0,
            dirty: false,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State whose recommendation requests default to `top_n` jobs.
    pub fn with_default_top_n(top_n: usize) -> Self {
        Self {
            default_top_n: top_n.max(1),
            ..Self::default()
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// True while any request started by this state is outstanding.
    pub fn is_busy(&self) -> bool {
        self.login.submitting || self.dashboard.is_busy()
    }

    pub fn view(&self) -> AppViewModel {
        let login = &self.login;
        let dashboard = &self.dashboard;
        let upload = &dashboard.upload;
        AppViewModel {
            screen: self.screen,
            login: LoginView {
                mode: login.mode,
                email: login.email.clone(),
                password_len: login.password.chars().count(),
                full_name: login.full_name.clone(),
                submitting: login.submitting,
                error: login.error.clone(),
            },
            dashboard: DashboardView {
                greeting: dashboard
                    .user
                    .as_ref()
                    .map(|user| user.display_name().to_string()),
                checking_session: dashboard.session_check.is_some(),
                upload: UploadView {
                    selected_file: upload.selected.as_ref().map(|file| file.file_name.clone()),
                    uploading: upload.uploading,
                    error: upload.error.clone(),
                    extracted: upload.extracted.clone(),
                },
                extracting: dashboard.extracting,
                skills: dashboard.skills.clone(),
                can_recommend: !dashboard.skills.is_empty() && !dashboard.recommending,
                recommending: dashboard.recommending,
                results: dashboard
                    .recommendations
                    .as_ref()
                    .map(crate::JobResultsView::from_result),
                gap_in_flight: dashboard.gap_in_flight.clone(),
                skill_gap: dashboard.skill_gap.clone(),
                notice: dashboard.notice.clone(),
            },
            help_seq: self.help_seq,
            redraw_seq: self.redraw_seq,
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether the state changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn flash(&mut self, level: FlashLevel, text: impl Into<String>) -> Flash {
        self.seq += 1;
        Flash {
            seq: self.seq,
            level,
            text: text.into(),
        }
    }

    pub(crate) fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }
}
