use career_core::{update, AppState, AuthResponse, Msg, RecommendationResult};

#[test]
fn late_results_without_a_request_are_dropped() {
    let state = AppState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::AuthCompleted(Ok(AuthResponse {
            access_token: "tok".to_string(),
            token_type: "bearer".to_string(),
            user_id: "u-1".to_string(),
            email: "ada@example.com".to_string(),
        })),
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(
        state.clone(),
        Msg::RecommendCompleted(Ok(RecommendationResult::default())),
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
