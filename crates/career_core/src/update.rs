use crate::state::Dashboard;
use crate::validation::{validate_login_form, validate_resume};
use crate::{
    AppState, AuthMode, Credentials, Effect, ExtractedSkills, FlashLevel, Msg, Registration,
    Screen, Session, SessionUser, StoredSession,
};

const AUTH_FALLBACK: &str = "An error occurred. Please try again.";
const UPLOAD_FALLBACK: &str = "Failed to upload resume. Please try again.";
const EXTRACT_FALLBACK: &str = "Failed to extract skills. Please try again.";
const RECOMMEND_FAILED: &str = "Failed to get job recommendations. Please try again.";
const SKILL_GAP_FALLBACK: &str = "Failed to load the skill gap. Please try again.";
const NEED_SKILLS: &str = "Please upload a resume first to extract skills";
const SESSION_EXPIRED: &str = "Your session has expired. Please sign in again.";
const SESSION_NOT_SAVED: &str = "Signed in, but the session could not be saved";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let mut effects = match msg {
        Msg::AuthModeToggled => on_login_screen(&mut state, |state| {
            state.login.mode = state.login.mode.toggled();
            state.login.error = None;
            Vec::new()
        }),
        Msg::EmailChanged(email) => on_login_screen(&mut state, |state| {
            state.login.email = email.trim().to_string();
            Vec::new()
        }),
        Msg::PasswordChanged(password) => on_login_screen(&mut state, |state| {
            state.login.password = password;
            Vec::new()
        }),
        Msg::FullNameChanged(name) => on_login_screen(&mut state, |state| {
            state.login.full_name = name.trim().to_string();
            Vec::new()
        }),
        Msg::LoginSubmitted => submit_login(&mut state),
        Msg::AuthCompleted(result) => {
            if !state.login.submitting {
                return (state, Vec::new());
            }
            state.login.submitting = false;
            state.mark_dirty();
            match result {
                Ok(response) => {
                    let full_name = match state.login.mode {
                        AuthMode::Register => Some(state.login.full_name.clone()),
                        AuthMode::SignIn => None,
                    };
                    let session = Session {
                        token: response.access_token,
                        user: SessionUser {
                            user_id: response.user_id,
                            email: response.email,
                            full_name,
                        },
                    };
                    state.login.password.clear();
                    state.login.error = None;
                    state.dashboard = Dashboard::default();
                    state.screen = Screen::Dashboard;
                    vec![Effect::PersistSession(session), Effect::OpenDashboard]
                }
                Err(failure) => {
                    let text = failure.user_message(AUTH_FALLBACK);
                    state.login.error = Some(state.flash(FlashLevel::Error, text));
                    Vec::new()
                }
            }
        }
        Msg::SessionPersistFailed(reason) => {
            if state.screen == Screen::Exited {
                return (state, Vec::new());
            }
            let flash = state.flash(FlashLevel::Error, format!("{SESSION_NOT_SAVED}: {reason}"));
            go_to_login(&mut state);
            state.login.error = Some(flash);
            Vec::new()
        }
        Msg::DashboardOpened(stored) => open_dashboard(&mut state, stored),
        Msg::SessionChecked { check, result } => {
            // An answer for an earlier dashboard must not touch this one.
            if state.screen != Screen::Dashboard || state.dashboard.session_check != Some(check) {
                return (state, Vec::new());
            }
            state.dashboard.session_check = None;
            state.mark_dirty();
            match result {
                Ok(profile) => {
                    if let Some(user) = state.dashboard.user.as_mut() {
                        if user.full_name.is_none() {
                            user.full_name = profile.full_name.filter(|name| !name.is_empty());
                        }
                    }
                    Vec::new()
                }
                Err(failure) if failure.is_unauthorized() => {
                    let flash = state.flash(FlashLevel::Warning, SESSION_EXPIRED);
                    go_to_login(&mut state);
                    state.login.error = Some(flash);
                    vec![Effect::ClearSession]
                }
                // Anything else is treated as transient; the session stays.
                Err(_) => Vec::new(),
            }
        }
        Msg::ResumeChosen(path) => on_dashboard(&mut state, |state| {
            if state.dashboard.upload.uploading {
                return Vec::new();
            }
            vec![Effect::InspectResume(path)]
        }),
        Msg::ResumeSelected(file) => on_dashboard(&mut state, |state| {
            if state.dashboard.upload.uploading {
                return Vec::new();
            }
            match validate_resume(&file) {
                Ok(()) => {
                    state.dashboard.upload.selected = Some(file);
                    state.dashboard.upload.error = None;
                }
                Err(rejection) => {
                    let flash = state.flash(FlashLevel::Error, rejection.to_string());
                    state.dashboard.upload.error = Some(flash);
                }
            }
            state.mark_dirty();
            Vec::new()
        }),
        Msg::ResumeUnreadable { path, reason } => on_dashboard(&mut state, |state| {
            let text = format!("Cannot read {}: {reason}", path.display());
            let flash = state.flash(FlashLevel::Error, text);
            state.dashboard.upload.error = Some(flash);
            state.mark_dirty();
            Vec::new()
        }),
        Msg::UploadClicked => on_dashboard(&mut state, |state| {
            if state.dashboard.upload.uploading {
                return Vec::new();
            }
            state.mark_dirty();
            let Some(file) = state.dashboard.upload.selected.clone() else {
                let flash = state.flash(FlashLevel::Error, "Please select a file");
                state.dashboard.upload.error = Some(flash);
                return Vec::new();
            };
            let upload = &mut state.dashboard.upload;
            upload.uploading = true;
            upload.error = None;
            upload.extracted = None;
            vec![Effect::UploadResume(file)]
        }),
        Msg::UploadCompleted(result) => {
            if state.screen != Screen::Dashboard || !state.dashboard.upload.uploading {
                return (state, Vec::new());
            }
            state.dashboard.upload.uploading = false;
            state.mark_dirty();
            match result {
                Ok(response) => {
                    let extracted = ExtractedSkills::from(response);
                    state.dashboard.replace_skills(extracted.skills.clone());
                    state.dashboard.upload.extracted = Some(extracted);
                }
                Err(failure) => {
                    let text = failure.user_message(UPLOAD_FALLBACK);
                    state.dashboard.upload.error = Some(state.flash(FlashLevel::Error, text));
                }
            }
            Vec::new()
        }
        Msg::ExtractTextSubmitted(text) => on_dashboard(&mut state, |state| {
            if state.dashboard.extracting {
                return Vec::new();
            }
            state.mark_dirty();
            let text = text.trim().to_string();
            if text.is_empty() {
                let flash = state.flash(FlashLevel::Warning, "Please enter some text to analyse");
                state.dashboard.notice = Some(flash);
                return Vec::new();
            }
            state.dashboard.extracting = true;
            state.dashboard.notice = None;
            vec![Effect::ExtractSkills { text }]
        }),
        Msg::ExtractCompleted(result) => {
            if state.screen != Screen::Dashboard || !state.dashboard.extracting {
                return (state, Vec::new());
            }
            state.dashboard.extracting = false;
            state.mark_dirty();
            match result {
                Ok(extraction) => {
                    let extracted = ExtractedSkills::from(extraction);
                    let text = format!("Extracted {} skill(s) from text", extracted.skills.len());
                    state.dashboard.notice = Some(state.flash(FlashLevel::Info, text));
                    state.dashboard.replace_skills(extracted.skills);
                }
                Err(failure) => {
                    let text = failure.user_message(EXTRACT_FALLBACK);
                    state.dashboard.notice = Some(state.flash(FlashLevel::Error, text));
                }
            }
            Vec::new()
        }
        Msg::RecommendClicked { top_n } => on_dashboard(&mut state, |state| {
            if state.dashboard.recommending {
                return Vec::new();
            }
            state.mark_dirty();
            if state.dashboard.skills.is_empty() {
                let flash = state.flash(FlashLevel::Warning, NEED_SKILLS);
                state.dashboard.notice = Some(flash);
                return Vec::new();
            }
            state.dashboard.recommending = true;
            state.dashboard.notice = None;
            vec![Effect::Recommend {
                skills: state.dashboard.skills.clone(),
                top_n: top_n.filter(|n| *n > 0).unwrap_or(state.default_top_n),
            }]
        }),
        Msg::RecommendCompleted(result) => {
            if state.screen != Screen::Dashboard || !state.dashboard.recommending {
                return (state, Vec::new());
            }
            state.dashboard.recommending = false;
            state.mark_dirty();
            match result {
                Ok(result) => state.dashboard.recommendations = Some(result),
                Err(_) => {
                    let flash = state.flash(FlashLevel::Error, RECOMMEND_FAILED);
                    state.dashboard.notice = Some(flash);
                }
            }
            Vec::new()
        }
        Msg::SkillGapRequested { job_id } => on_dashboard(&mut state, |state| {
            if state.dashboard.gap_in_flight.is_some() {
                return Vec::new();
            }
            state.mark_dirty();
            let job_id = job_id.trim().to_string();
            if state.dashboard.skills.is_empty() {
                let flash = state.flash(FlashLevel::Warning, NEED_SKILLS);
                state.dashboard.notice = Some(flash);
                return Vec::new();
            }
            if job_id.is_empty() {
                let flash = state.flash(FlashLevel::Warning, "Please give a job id");
                state.dashboard.notice = Some(flash);
                return Vec::new();
            }
            state.dashboard.gap_in_flight = Some(job_id.clone());
            state.dashboard.notice = None;
            vec![Effect::FetchSkillGap {
                job_id,
                skills: state.dashboard.skills.clone(),
            }]
        }),
        Msg::SkillGapCompleted { job_id, result } => {
            if state.screen != Screen::Dashboard
                || state.dashboard.gap_in_flight.as_deref() != Some(job_id.as_str())
            {
                return (state, Vec::new());
            }
            state.dashboard.gap_in_flight = None;
            state.mark_dirty();
            match result {
                Ok(report) => state.dashboard.skill_gap = Some((job_id, report)),
                Err(failure) => {
                    let text = failure.user_message(SKILL_GAP_FALLBACK);
                    state.dashboard.notice = Some(state.flash(FlashLevel::Error, text));
                }
            }
            Vec::new()
        }
        Msg::RedrawRequested => {
            state.redraw_seq = state.next_seq();
            state.mark_dirty();
            Vec::new()
        }
        Msg::HelpRequested => {
            state.help_seq = state.next_seq();
            state.mark_dirty();
            Vec::new()
        }
        Msg::UnknownCommand(command) => {
            let text = format!("Unknown command `{command}`. Type `help` for the list.");
            let flash = state.flash(FlashLevel::Warning, text);
            match state.screen {
                Screen::Login => state.login.error = Some(flash),
                Screen::Dashboard => state.dashboard.notice = Some(flash),
                Screen::Exited => {}
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::LogoutClicked => on_dashboard(&mut state, |state| {
            go_to_login(state);
            vec![Effect::ClearSession]
        }),
        Msg::QuitRequested => {
            if state.screen == Screen::Exited {
                return (state, Vec::new());
            }
            state.screen = Screen::Exited;
            state.mark_dirty();
            vec![Effect::Exit]
        }
        Msg::InputClosed => {
            state.input_closed = true;
            Vec::new()
        }
    };

    // With no more input, leave once nothing is outstanding.
    if state.input_closed && state.screen != Screen::Exited && !state.is_busy() {
        state.screen = Screen::Exited;
        state.mark_dirty();
        effects.push(Effect::Exit);
    }

    (state, effects)
}

fn on_login_screen(
    state: &mut AppState,
    apply: impl FnOnce(&mut AppState) -> Vec<Effect>,
) -> Vec<Effect> {
    if state.screen != Screen::Login || state.login.submitting {
        return Vec::new();
    }
    state.mark_dirty();
    apply(state)
}

fn on_dashboard(
    state: &mut AppState,
    apply: impl FnOnce(&mut AppState) -> Vec<Effect>,
) -> Vec<Effect> {
    if state.screen != Screen::Dashboard {
        return Vec::new();
    }
    apply(state)
}

fn submit_login(state: &mut AppState) -> Vec<Effect> {
    if state.screen != Screen::Login || state.login.submitting {
        return Vec::new();
    }
    state.mark_dirty();
    let login = &state.login;
    if let Err(rejection) =
        validate_login_form(login.mode, &login.email, &login.password, &login.full_name)
    {
        let flash = state.flash(FlashLevel::Error, rejection.to_string());
        state.login.error = Some(flash);
        return Vec::new();
    }

    state.login.submitting = true;
    state.login.error = None;
    let login = &state.login;
    let effect = match login.mode {
        AuthMode::SignIn => Effect::Login(Credentials {
            email: login.email.clone(),
            password: login.password.clone(),
        }),
        AuthMode::Register => Effect::Register(Registration {
            email: login.email.clone(),
            password: login.password.clone(),
            full_name: login.full_name.clone(),
        }),
    };
    vec![effect]
}

fn open_dashboard(state: &mut AppState, stored: StoredSession) -> Vec<Effect> {
    if state.screen == Screen::Exited {
        return Vec::new();
    }
    state.mark_dirty();
    match stored {
        StoredSession::Missing => {
            go_to_login(state);
            Vec::new()
        }
        StoredSession::Corrupt => {
            go_to_login(state);
            vec![Effect::ClearSession]
        }
        StoredSession::Present(session) => {
            let check = state.next_seq();
            state.screen = Screen::Dashboard;
            state.dashboard = Dashboard {
                user: Some(session.user),
                session_check: Some(check),
                ..Dashboard::default()
            };
            vec![Effect::ValidateSession { check }]
        }
    }
}

/// Leaving the dashboard discards everything it held. An error already shown
/// on the login screen stays.
fn go_to_login(state: &mut AppState) {
    if state.screen != Screen::Login {
        state.login.error = None;
    }
    state.screen = Screen::Login;
    state.dashboard = Dashboard::default();
    state.login.submitting = false;
    state.login.password.clear();
    state.mark_dirty();
}
