//! End-to-end tests for the decision engine over its real adapters.

use std::sync::Arc;

use tempfile::TempDir;

use decision_engine::adapters::{InMemoryHistorySink, InMemoryProfileRepository};
use decision_engine::application::{DecisionEngine, EngineState};
use decision_engine::config::{EngineConfig, StorageBackend, StorageConfig};
use decision_engine::domain::analysis::{
    AnalysisError, Analyzer, QuestionComplexity, TimeOfDay,
};
use decision_engine::domain::decision::{Algorithm, DecisionRequest, HistoryLimits, SeededRandom};
use decision_engine::domain::foundation::SessionId;
use decision_engine::ports::ProfileRepository;

/// 2024-04-09T09:00:00Z, a Tuesday morning.
const TUESDAY_MORNING_MS: i64 = 1_712_653_200_000;

fn opts(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seeded_engine(state: EngineState) -> DecisionEngine {
    let config = EngineConfig {
        random_seed: Some(2024),
        ..Default::default()
    };
    DecisionEngine::new(&config, state).unwrap()
}

struct BrokenComplexity;

impl Analyzer<str> for BrokenComplexity {
    type Signal = QuestionComplexity;

    fn analyze(&self, _input: &str) -> Result<QuestionComplexity, AnalysisError> {
        Err(AnalysisError::stage_failed("complexity", "tokenizer unavailable"))
    }
}

#[tokio::test]
async fn job_offer_question_returns_one_of_the_options() {
    let engine = seeded_engine(EngineState::in_memory(HistoryLimits::default()));
    let request = DecisionRequest::new("Should I take the new job offer?", opts(&["No", "Yes"]))
        .with_timestamp(TUESDAY_MORNING_MS);

    let result = engine.make_decision(request).await;

    assert!(["No", "Yes"].contains(&result.decision.as_str()));
    assert!((0.0..=1.0).contains(&result.confidence.value()));
    let other = if result.decision == "No" { "Yes" } else { "No" };
    assert_eq!(result.alternatives, vec![other.to_string()]);
    assert_eq!(result.factors.temporal.as_ref().unwrap().time_of_day, TimeOfDay::Morning);
}

#[tokio::test]
async fn focus_question_without_options_gets_guidance() {
    let engine = seeded_engine(EngineState::in_memory(HistoryLimits::default()));

    let result = engine
        .make_decision(
            DecisionRequest::new("What should I focus on today?", vec![])
                .with_timestamp(TUESDAY_MORNING_MS),
        )
        .await;

    assert_eq!(result.algorithm, Algorithm::OpenEnded);
    assert_eq!(result.confidence.value(), 0.75);
    assert!(result.alternatives.is_empty());
}

#[tokio::test]
async fn pick_one_of_four() {
    let engine = seeded_engine(EngineState::in_memory(HistoryLimits::default()));
    let options = opts(&["A", "B", "C", "D"]);

    let result = engine
        .make_decision(DecisionRequest::new("Pick one", options.clone()).with_timestamp(TUESDAY_MORNING_MS))
        .await;

    assert!(options.contains(&result.decision));
    assert_eq!(result.alternatives.len(), 3);
    assert!(!result.alternatives.contains(&result.decision));
}

#[tokio::test]
async fn forced_analysis_failure_is_never_an_error() {
    let engine = seeded_engine(EngineState::in_memory(HistoryLimits::default()))
        .with_complexity_analyzer(Arc::new(BrokenComplexity));

    for options in [vec![], opts(&["No", "Yes"]), opts(&["A", "B", "C"])] {
        let result = engine
            .make_decision(DecisionRequest::new("Anything?", options.clone()))
            .await;

        assert_eq!(result.algorithm, Algorithm::Fallback);
        assert!((0.0..=1.0).contains(&result.confidence.value()));
        if !options.is_empty() {
            assert!(options.contains(&result.decision));
        }
    }
}

#[tokio::test]
async fn history_trims_to_half_after_passing_cap() {
    let history = Arc::new(InMemoryHistorySink::default());
    let state = EngineState::new(history.clone(), Arc::new(InMemoryProfileRepository::new()));
    let engine = seeded_engine(state);

    for n in 0..1000 {
        engine
            .make_decision(DecisionRequest::new(format!("Question {}", n), opts(&["x", "y"])))
            .await;
        assert!(history.len().await <= 1000);
    }
    assert_eq!(history.len().await, 1000);

    engine
        .make_decision(DecisionRequest::new("One more", opts(&["x", "y"])))
        .await;
    assert_eq!(history.len().await, 500);
}

#[tokio::test]
async fn repeated_question_builds_a_pattern() {
    let engine = seeded_engine(EngineState::in_memory(HistoryLimits::default()));
    let ask = || {
        DecisionRequest::new("Tea or coffee?", opts(&["Tea", "Coffee"]))
            .with_timestamp(TUESDAY_MORNING_MS)
            .with_session("regular")
    };

    for _ in 0..3 {
        engine.make_decision(ask()).await;
    }
    let result = engine.make_decision(ask()).await;

    let pattern = result.factors.pattern.unwrap();
    assert_eq!(pattern.match_count, 3);
    assert!(pattern.recommendation_strength > 0.5);
    assert_eq!(pattern.historical_accuracy, 1.0);
}

#[tokio::test]
async fn filesystem_backend_persists_history_and_profiles() {
    let temp_dir = TempDir::new().unwrap();
    let storage = StorageConfig {
        backend: StorageBackend::Filesystem,
        data_dir: temp_dir.path().to_path_buf(),
    };
    let session = SessionId::new("desk-7").unwrap();

    {
        let engine = seeded_engine(EngineState::from_config(&storage, HistoryLimits::default()));
        for question in ["Walk or bus?", "Lunch now?"] {
            engine
                .make_decision(DecisionRequest::new(question, opts(&["No", "Yes"])).with_session("desk-7"))
                .await;
        }
    }

    let state = EngineState::from_config(&storage, HistoryLimits::default());
    let records = state.history.read_recent(10).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.session_id == session));

    let profile = state.profiles.get(&session).await.unwrap().unwrap();
    assert_eq!(profile.decision_count, 2);
    assert_eq!(profile.recent_contexts.len(), 2);
}

#[tokio::test]
async fn result_serializes_with_camel_case_fields() {
    let engine = seeded_engine(EngineState::in_memory(HistoryLimits::default()));

    let result = engine
        .make_decision(
            DecisionRequest::new("Stay or go?", opts(&["Stay", "Go"]))
                .with_timestamp(TUESDAY_MORNING_MS)
                .with_session("json"),
        )
        .await;
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["algorithm"], "binary");
    assert_eq!(json["sessionId"], "json");
    assert!(json["followUpSuggestions"].is_array());
    assert!(json["processingDurationMs"].is_u64());
    assert!(json["factors"]["temporal"]["combinedFactors"].is_object());
}

#[tokio::test]
async fn concurrent_sessions_do_not_interfere() {
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let state = EngineState::new(Arc::new(InMemoryHistorySink::default()), profiles.clone());
    let engine = Arc::new(
        seeded_engine(state).with_random_source(Arc::new(SeededRandom::from_seed(5))),
    );

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let engine = engine.clone();
            tokio::spawn(async move {
                engine
                    .make_decision(
                        DecisionRequest::new("Which?", opts(&["A", "B", "C"]))
                            .with_session(format!("user-{}", n)),
                    )
                    .await
            })
        })
        .collect();
    for handle in handles {
        let result = handle.await.unwrap();
        assert!(!result.is_fallback());
    }

    assert_eq!(profiles.profile_count().await, 8);
}
