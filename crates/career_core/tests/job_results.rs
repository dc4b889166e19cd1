use career_core::{
    JobMatch, JobResultsView, RecommendationResult, SkillChip, SkillGapView,
    NO_RECOMMENDATIONS_MESSAGE, NO_RESULTS_MESSAGE,
};
use pretty_assertions::assert_eq;

fn job(id: &str, pct: f64, required: &[&str], have: &[&str], missing: &[&str]) -> JobMatch {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    JobMatch {
        job_id: id.to_string(),
        job_title: format!("Job {id}"),
        match_score: Some(pct / 100.0),
        match_percentage: pct,
        required_skills: strings(required),
        user_skills: strings(have),
        missing_skills: strings(missing),
        skill_gap_count: missing.len(),
    }
}

#[test]
fn absent_result_renders_unavailable() {
    assert_eq!(
        JobResultsView::build(None),
        JobResultsView::Unavailable {
            message: NO_RECOMMENDATIONS_MESSAGE
        }
    );
}

#[test]
fn missing_recommendations_field_renders_unavailable() {
    let malformed: RecommendationResult =
        serde_json::from_str(r#"{"user_skills": ["rust"], "total_jobs_found": 3}"#).unwrap();
    assert_eq!(
        JobResultsView::build(Some(&malformed)),
        JobResultsView::Unavailable {
            message: NO_RECOMMENDATIONS_MESSAGE
        }
    );
}

#[test]
fn empty_recommendations_render_no_results_and_no_cards() {
    let result = RecommendationResult {
        user_skills: vec!["rust".to_string()],
        total_jobs_found: 0,
        recommendations: Some(Vec::new()),
    };
    match JobResultsView::build(Some(&result)) {
        JobResultsView::Listing {
            cards,
            empty_message,
            total_jobs_found,
        } => {
            assert!(cards.is_empty());
            assert_eq!(empty_message, Some(NO_RESULTS_MESSAGE));
            assert_eq!(total_jobs_found, 0);
        }
        other => panic!("unexpected view {other:?}"),
    }
}

#[test]
fn cards_keep_server_order_and_partition_skills() {
    let result = RecommendationResult {
        user_skills: vec!["rust".to_string(), "sql".to_string()],
        total_jobs_found: 2,
        recommendations: Some(vec![
            job("b", 40.0, &["rust", "go", "SQL"], &["rust", "sql"], &["go"]),
            job("a", 90.0, &["sql"], &["rust", "sql"], &[]),
        ]),
    };
    let JobResultsView::Listing {
        cards,
        empty_message,
        ..
    } = JobResultsView::build(Some(&result))
    else {
        panic!("expected listing");
    };
    assert!(empty_message.is_none());
    assert_eq!(
        cards.iter().map(|c| c.job_id.as_str()).collect::<Vec<_>>(),
        vec!["b", "a"]
    );

    let first = &cards[0];
    assert_eq!(first.match_label, "40.0% Match");
    assert_eq!(first.bar_percent, 40);
    assert_eq!(
        first.required,
        vec![
            SkillChip {
                name: "rust".to_string(),
                matched: true
            },
            SkillChip {
                name: "go".to_string(),
                matched: false
            },
            // Skill names are compared exactly.
            SkillChip {
                name: "SQL".to_string(),
                matched: false
            },
        ]
    );
    assert_eq!(
        first.gap,
        SkillGapView::Missing {
            count: 1,
            skills: vec!["go".to_string()]
        }
    );
}

#[test]
fn empty_missing_skills_is_a_perfect_match() {
    let card = career_core::JobCardView::from_job(&job("a", 100.0, &["sql"], &["sql"], &[]));
    assert_eq!(card.gap, SkillGapView::PerfectMatch);
    assert_eq!(card.match_label, "100.0% Match");
}

#[test]
fn partial_job_payload_still_renders() {
    let result: RecommendationResult = serde_json::from_str(
        r#"{"total_jobs_found": 1, "recommendations": [{"job_id": "x", "job_title": "Tester"}]}"#,
    )
    .unwrap();
    let JobResultsView::Listing { cards, .. } = JobResultsView::build(Some(&result)) else {
        panic!("expected listing");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].match_label, "0.0% Match");
    assert_eq!(cards[0].gap, SkillGapView::PerfectMatch);
}
