//! DecisionEngine - orchestrates analysis, scoring, narrative and recording.
//!
//! One call runs to completion: resolve identity and clock, fetch history and
//! profile, run the analyzers, score, refine, narrate, record. Any error or
//! panic between fetching and narrating produces the fallback result instead;
//! `make_decision` never fails. A timeout only covers fetching through
//! narrating; recording always completes for a computed result.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::domain::analysis::{
    AnalysisError, ComplexityAssessor, OptimalWindow, PatternMatcher, PatternQuery,
    SentimentAnalyzer, SharedComplexityAnalyzer, SharedPatternAnalyzer, SharedSentimentAnalyzer,
    SharedTemporalAnalyzer, TemporalProcessor,
};
use crate::domain::decision::fallback::FALLBACK_REASONING;
use crate::domain::decision::scoring::{
    contextual_urgency, score_binary, score_multi_choice, score_open_ended,
};
use crate::domain::decision::{
    fallback_decision, generate_follow_ups, generate_reasoning, refine_confidence, Algorithm,
    DecisionFactors, DecisionRecord, DecisionRequest, DecisionResult, DecisionSignals,
    HistoryLimits, OptionShape, RandomSource, ScoredDecision, SeededRandom,
};
use crate::domain::foundation::{self, Confidence, SessionId, Timestamp};
use crate::domain::profile::UserProfile;
use crate::ports::PersistenceError;

use super::{EngineState, UserProfileStore};

/// Internal failures; each one ends in the fallback result.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid engine configuration: {0}")]
    InvalidConfig(#[from] foundation::ValidationError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error("Persistence failed: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Analysis panicked: {0}")]
    Panicked(String),

    #[error("Decision timed out after {0} ms")]
    TimedOut(u128),
}

/// Everything a successful evaluation produces.
struct Evaluation {
    signals: DecisionSignals,
    scored: ScoredDecision,
    confidence: Confidence,
    reasoning: String,
    follow_ups: Vec<String>,
}

/// Result of the timed part of a decision.
enum Outcome {
    Decided {
        result: DecisionResult,
        signals: DecisionSignals,
    },
    FellBack(DecisionResult),
}

pub struct DecisionEngine {
    state: EngineState,
    profiles: UserProfileStore,
    sentiment: SharedSentimentAnalyzer,
    temporal: SharedTemporalAnalyzer,
    complexity: SharedComplexityAnalyzer,
    pattern: SharedPatternAnalyzer,
    processor: TemporalProcessor,
    rng: Arc<dyn RandomSource>,
    limits: HistoryLimits,
    engine_version: String,
    timeout: Option<Duration>,
}

impl DecisionEngine {
    /// Builds an engine with the standard analyzers.
    pub fn new(config: &EngineConfig, state: EngineState) -> Result<Self, EngineError> {
        let processor = config.temporal_processor()?;
        let limits = config.history_limits()?;

        Ok(Self {
            profiles: UserProfileStore::new(state.profiles.clone()),
            state,
            sentiment: Arc::new(SentimentAnalyzer::new()),
            temporal: Arc::new(processor),
            complexity: Arc::new(ComplexityAssessor::new()),
            pattern: Arc::new(PatternMatcher::new()),
            processor,
            rng: Arc::new(SeededRandom::from_optional_seed(config.random_seed)),
            limits,
            engine_version: config.engine_version.clone(),
            timeout: config.decision_timeout(),
        })
    }

    pub fn with_sentiment_analyzer(mut self, analyzer: SharedSentimentAnalyzer) -> Self {
        self.sentiment = analyzer;
        self
    }

    pub fn with_temporal_analyzer(mut self, analyzer: SharedTemporalAnalyzer) -> Self {
        self.temporal = analyzer;
        self
    }

    pub fn with_complexity_analyzer(mut self, analyzer: SharedComplexityAnalyzer) -> Self {
        self.complexity = analyzer;
        self
    }

    pub fn with_pattern_analyzer(mut self, analyzer: SharedPatternAnalyzer) -> Self {
        self.pattern = analyzer;
        self
    }

    pub fn with_random_source(mut self, rng: Arc<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn profiles(&self) -> &UserProfileStore {
        &self.profiles
    }

    /// Produces a result for any request, applying the configured timeout.
    pub async fn make_decision(&self, request: DecisionRequest) -> DecisionResult {
        match self.timeout {
            Some(timeout) => self.make_decision_with_timeout(request, timeout).await,
            None => {
                let started = Instant::now();
                let (session_id, timestamp) = resolve_identity(&request);
                let outcome = self.compute(&request, session_id, timestamp, started).await;
                self.finish(&request, outcome).await
            }
        }
    }

    /// Like [`make_decision`](Self::make_decision), returning the fallback
    /// result when fetching and evaluation outlast `timeout`.
    ///
    /// Recording runs after the deadline check, so a computed result is
    /// always returned and always the one that lands in history.
    pub async fn make_decision_with_timeout(
        &self,
        request: DecisionRequest,
        timeout: Duration,
    ) -> DecisionResult {
        let started = Instant::now();
        let (session_id, timestamp) = resolve_identity(&request);

        let computing = self.compute(&request, session_id.clone(), timestamp, started);
        match tokio::time::timeout(timeout, computing).await {
            Ok(outcome) => self.finish(&request, outcome).await,
            Err(_) => {
                let err = EngineError::TimedOut(timeout.as_millis());
                self.fallback(&request, session_id, timestamp, started, DecisionFactors::default(), err)
            }
        }
    }

    /// Best upcoming day after `from`, with two runners-up.
    pub fn optimal_window(&self, from: NaiveDate) -> Result<OptimalWindow, EngineError> {
        Ok(self.processor.calculate_optimal_window(from)?)
    }

    /// Fetch, analysis, scoring and narrative. Nothing is persisted here.
    async fn compute(
        &self,
        request: &DecisionRequest,
        session_id: SessionId,
        timestamp: Timestamp,
        started: Instant,
    ) -> Outcome {
        debug!(
            session_id = %session_id,
            options = request.options.len(),
            "Decision request received"
        );

        let (history, profile) = match self.fetch_context(&session_id).await {
            Ok(context) => context,
            Err(err) => {
                let result =
                    self.fallback(request, session_id, timestamp, started, DecisionFactors::default(), err);
                return Outcome::FellBack(result);
            }
        };

        let mut factors = DecisionFactors::default();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            self.evaluate(request, timestamp, history, &profile, &mut factors)
        }))
        .unwrap_or_else(|payload| Err(EngineError::Panicked(panic_message(payload.as_ref()))));

        let evaluation = match outcome {
            Ok(evaluation) => evaluation,
            Err(err) => {
                return Outcome::FellBack(self.fallback(request, session_id, timestamp, started, factors, err));
            }
        };

        let Evaluation {
            signals,
            scored,
            confidence,
            reasoning,
            follow_ups,
        } = evaluation;

        let result = DecisionResult {
            decision: scored.decision,
            reasoning,
            confidence,
            algorithm: scored.algorithm,
            factors,
            alternatives: scored.alternatives,
            follow_up_suggestions: follow_ups,
            processing_duration_ms: elapsed_ms(started),
            engine_version: self.engine_version.clone(),
            session_id,
            timestamp,
        };
        Outcome::Decided { result, signals }
    }

    /// Records a computed decision; fallback results pass through untouched.
    async fn finish(&self, request: &DecisionRequest, outcome: Outcome) -> DecisionResult {
        let (result, signals) = match outcome {
            Outcome::Decided { result, signals } => (result, signals),
            Outcome::FellBack(result) => return result,
        };

        self.record(&request.question, &signals, &result).await;

        info!(
            session_id = %result.session_id,
            algorithm = %result.algorithm,
            confidence = result.confidence.value(),
            duration_ms = result.processing_duration_ms,
            "Decision made"
        );
        result
    }

    async fn fetch_context(
        &self,
        session_id: &SessionId,
    ) -> Result<(Vec<DecisionRecord>, UserProfile), EngineError> {
        let (history, profile) = futures::try_join!(
            self.state.history.read_recent(self.limits.cap()),
            self.profiles.get_profile(session_id),
        )?;
        debug!(session_id = %session_id, history_len = history.len(), "Context fetched");
        Ok((history, profile))
    }

    /// Synchronous analysis, scoring and narrative. Fills `factors` as each
    /// signal becomes available so a failure can still report the earlier ones.
    fn evaluate(
        &self,
        request: &DecisionRequest,
        timestamp: Timestamp,
        history: Vec<DecisionRecord>,
        profile: &UserProfile,
        factors: &mut DecisionFactors,
    ) -> Result<Evaluation, EngineError> {
        let question = request.question.as_str();

        let temporal = self.temporal.analyze(&timestamp)?;
        factors.temporal = Some(temporal.clone());

        let sentiment = self.sentiment.analyze(question)?;
        factors.sentiment = Some(sentiment.clone());

        let pattern = self.pattern.analyze(&PatternQuery {
            question: request.question.clone(),
            options: request.options.clone(),
            history,
            now: timestamp,
        })?;
        factors.pattern = Some(pattern.clone());

        let complexity = self.complexity.analyze(question)?;
        factors.complexity = Some(complexity);

        let personal_alignment = self
            .profiles
            .calculate_personal_alignment(&temporal, complexity, profile);
        factors.personal_alignment = Some(personal_alignment);

        let urgency = contextual_urgency(question, &temporal);
        factors.contextual_urgency = Some(urgency);

        let signals = DecisionSignals {
            temporal,
            sentiment,
            pattern,
            complexity,
            personal_alignment,
            contextual_urgency: urgency,
        };

        let rng = self.rng.as_ref();
        let scored = match request.shape() {
            OptionShape::OpenEnded => score_open_ended(rng),
            OptionShape::Binary => score_binary(&request.options, &signals, rng)?,
            OptionShape::MultiChoice => score_multi_choice(&request.options, &signals, rng)?,
        };
        factors.score = scored.score;
        factors.option_scores = scored.option_scores.clone();

        let confidence = match scored.algorithm {
            Algorithm::OpenEnded => Confidence::new(scored.raw_confidence),
            _ => refine_confidence(scored.raw_confidence, &signals),
        };
        debug!(
            algorithm = %scored.algorithm,
            raw_confidence = scored.raw_confidence,
            confidence = confidence.value(),
            "Scored"
        );

        let reasoning = generate_reasoning(&signals, confidence);
        let follow_ups = generate_follow_ups(confidence, signals.sentiment.polarity);

        Ok(Evaluation {
            signals,
            scored,
            confidence,
            reasoning,
            follow_ups,
        })
    }

    /// Appends the record and updates the profile; failures are only logged.
    async fn record(&self, question: &str, signals: &DecisionSignals, result: &DecisionResult) {
        let record = DecisionRecord::from_result(question, result);
        if let Err(err) = self.state.history.append(&record).await {
            warn!(session_id = %result.session_id, error = %err, "Failed to record decision");
        }
        if let Err(err) = self.profiles.update(&result.session_id, signals, result).await {
            warn!(session_id = %result.session_id, error = %err, "Failed to update profile");
        }
    }

    fn fallback(
        &self,
        request: &DecisionRequest,
        session_id: SessionId,
        timestamp: Timestamp,
        started: Instant,
        mut factors: DecisionFactors,
        err: EngineError,
    ) -> DecisionResult {
        warn!(session_id = %session_id, error = %err, "Falling back to default decision");

        let scored = fallback_decision(&request.options, self.rng.as_ref());
        let confidence = Confidence::new(scored.raw_confidence);
        let polarity = factors.sentiment.as_ref().map_or(0.0, |s| s.polarity);
        factors.fallback_reason = Some(err.to_string());

        DecisionResult {
            decision: scored.decision,
            reasoning: FALLBACK_REASONING.to_string(),
            confidence,
            algorithm: scored.algorithm,
            factors,
            alternatives: scored.alternatives,
            follow_up_suggestions: generate_follow_ups(confidence, polarity),
            processing_duration_ms: elapsed_ms(started),
            engine_version: self.engine_version.clone(),
            session_id,
            timestamp,
        }
    }
}

/// Caller's session or a fresh one; caller's timestamp when representable, else now.
fn resolve_identity(request: &DecisionRequest) -> (SessionId, Timestamp) {
    let session_id = request
        .context
        .session_id
        .as_deref()
        .and_then(|raw| SessionId::new(raw).ok())
        .unwrap_or_else(SessionId::generate);
    let timestamp = request
        .context
        .timestamp
        .and_then(|millis| Timestamp::from_millis(millis).ok())
        .unwrap_or_else(Timestamp::now);
    (session_id, timestamp)
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
