use std::sync::Once;

use career_core::{
    update, AppState, AuthMode, AuthResponse, Credentials, Effect, Msg, Registration,
    RequestFailure, Screen, Session, SessionUser, StoredSession,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(career_logging::initialize_for_tests);
}

fn fill_form(state: AppState, email: &str, password: &str) -> AppState {
    let (state, _) = update(state, Msg::EmailChanged(email.to_string()));
    let (state, _) = update(state, Msg::PasswordChanged(password.to_string()));
    state
}

fn auth_ok() -> AuthResponse {
    AuthResponse {
        access_token: "tok-123".to_string(),
        token_type: "bearer".to_string(),
        user_id: "u-1".to_string(),
        email: "ada@example.com".to_string(),
    }
}

#[test]
fn sign_in_submit_emits_login_effect_and_blocks_resubmit() {
    init_logging();
    let state = fill_form(AppState::new(), " ada@example.com ", "secret1");

    let (state, effects) = update(state, Msg::LoginSubmitted);
    assert_eq!(
        effects,
        vec![Effect::Login(Credentials {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
        })]
    );
    assert!(state.view().login.submitting);
    assert!(state.is_busy());

    let (_state, effects) = update(state, Msg::LoginSubmitted);
    assert!(effects.is_empty());
}

#[test]
fn successful_login_persists_session_then_opens_dashboard() {
    init_logging();
    let state = fill_form(AppState::new(), "ada@example.com", "secret1");
    let (state, _) = update(state, Msg::LoginSubmitted);

    let (state, effects) = update(state, Msg::AuthCompleted(Ok(auth_ok())));

    assert_eq!(
        effects,
        vec![
            Effect::PersistSession(Session {
                token: "tok-123".to_string(),
                user: SessionUser {
                    user_id: "u-1".to_string(),
                    email: "ada@example.com".to_string(),
                    full_name: None,
                },
            }),
            Effect::OpenDashboard,
        ]
    );
    assert_eq!(state.screen(), Screen::Dashboard);
    assert_eq!(state.view().login.password_len, 0);
}

#[test]
fn unsaved_session_returns_to_login_with_an_error() {
    init_logging();
    let state = fill_form(AppState::new(), "ada@example.com", "secret1");
    let (state, _) = update(state, Msg::LoginSubmitted);
    let (state, _) = update(state, Msg::AuthCompleted(Ok(auth_ok())));

    let (state, effects) = update(
        state,
        Msg::SessionPersistFailed("permission denied".to_string()),
    );
    assert!(effects.is_empty());
    assert_eq!(state.screen(), Screen::Login);

    // The dashboard read that follows finds nothing and must keep the error.
    let (state, effects) = update(state, Msg::DashboardOpened(StoredSession::Missing));
    assert!(effects.is_empty());
    assert_eq!(state.screen(), Screen::Login);
    let error = state.view().login.error.expect("error shown");
    assert_eq!(
        error.text,
        "Signed in, but the session could not be saved: permission denied"
    );
}

#[test]
fn registration_requires_full_name_and_keeps_it_in_session() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::AuthModeToggled);
    assert_eq!(state.view().login.mode, AuthMode::Register);
    let state = fill_form(state, "ada@example.com", "secret1");

    let (state, effects) = update(state, Msg::LoginSubmitted);
    assert!(effects.is_empty());
    assert!(state.view().login.error.is_some());

    let (state, _) = update(state, Msg::FullNameChanged("Ada Lovelace".to_string()));
    let (state, effects) = update(state, Msg::LoginSubmitted);
    assert_eq!(
        effects,
        vec![Effect::Register(Registration {
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            full_name: "Ada Lovelace".to_string(),
        })]
    );

    let (_state, effects) = update(state, Msg::AuthCompleted(Ok(auth_ok())));
    match &effects[0] {
        Effect::PersistSession(session) => {
            assert_eq!(session.user.full_name.as_deref(), Some("Ada Lovelace"));
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn empty_fields_and_short_password_never_reach_the_network() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::LoginSubmitted);
    assert!(effects.is_empty());
    assert!(state.view().login.error.is_some());

    let state = fill_form(state, "ada@example.com", "12345");
    let (state, effects) = update(state, Msg::LoginSubmitted);
    assert!(effects.is_empty());
    assert_eq!(
        state.view().login.error.unwrap().text,
        "Password must be at least 6 characters"
    );
}

#[test]
fn failure_prefers_server_detail_then_transport_then_generic() {
    init_logging();
    let submit = || {
        let state = fill_form(AppState::new(), "ada@example.com", "secret1");
        update(state, Msg::LoginSubmitted).0
    };

    let failure = RequestFailure {
        status: Some(401),
        detail: Some("Incorrect email or password".to_string()),
        message: "HTTP 401 Unauthorized".to_string(),
    };
    let (state, effects) = update(submit(), Msg::AuthCompleted(Err(failure)));
    assert!(effects.is_empty());
    assert_eq!(state.screen(), Screen::Login);
    assert!(!state.view().login.submitting);
    assert_eq!(
        state.view().login.error.unwrap().text,
        "Incorrect email or password"
    );

    let failure = RequestFailure {
        status: None,
        detail: None,
        message: "connection refused".to_string(),
    };
    let (state, _) = update(submit(), Msg::AuthCompleted(Err(failure)));
    assert_eq!(state.view().login.error.unwrap().text, "connection refused");

    let failure = RequestFailure {
        status: Some(500),
        detail: None,
        message: String::new(),
    };
    let (state, _) = update(submit(), Msg::AuthCompleted(Err(failure)));
    assert_eq!(
        state.view().login.error.unwrap().text,
        "An error occurred. Please try again."
    );
}

#[test]
fn toggling_mode_clears_the_error() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::LoginSubmitted);
    assert!(state.view().login.error.is_some());

    let (state, _) = update(state, Msg::AuthModeToggled);
    assert!(state.view().login.error.is_none());
}

#[test]
fn stray_auth_result_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::AuthCompleted(Ok(auth_ok())));
    assert_eq!(next, state);
    assert!(effects.is_empty());
}
