//! Temporal Processor - clock-derived decision factors.
//!
//! Every categorical reading of the clock (time of day, weekday, season and a
//! lunar-phase proxy) maps through a static table to named factors in
//! `[0, 1]`. The tables are averaged into `combined_factors`, which in turn
//! feed the overall score and the decision bias.
//!
//! # Edge Cases
//! - Factors missing from every table read as neutral (0.5) in the bias blend
//! - Timestamps before the reference new moon still bucket correctly
//!   (`rem_euclid` keeps the cycle age positive)

use std::collections::BTreeMap;
use std::fmt;

use chrono::{
    DateTime, Datelike, Days, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc, Weekday,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

use super::{AnalysisError, Analyzer};

/// 2000-01-06T18:14:00Z, a known new moon.
const REFERENCE_NEW_MOON_MS: i64 = 947_182_440_000;

const LUNAR_CYCLE_DAYS: f64 = 29.5;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Number of days evaluated by the optimal-window lookahead.
pub const LOOKAHEAD_DAYS: u64 = 7;

/// Neutral value for a factor no table defines.
const NEUTRAL_FACTOR: f64 = 0.5;

/// Bucketed hour of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    /// morning [5,12), afternoon [12,17), evening [17,22), night otherwise.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            17..=21 => Self::Evening,
            _ => Self::Night,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }

    fn factors(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Morning => &[
                ("clarity", 0.8),
                ("energy", 0.85),
                ("optimism", 0.7),
                ("focus", 0.8),
            ],
            Self::Afternoon => &[
                ("clarity", 0.7),
                ("energy", 0.6),
                ("productivity", 0.8),
                ("stress", 0.5),
            ],
            Self::Evening => &[
                ("clarity", 0.55),
                ("energy", 0.4),
                ("reflection", 0.8),
                ("riskTolerance", 0.45),
            ],
            Self::Night => &[
                ("clarity", 0.4),
                ("energy", 0.25),
                ("creativity", 0.75),
                ("riskTolerance", 0.6),
                ("stress", 0.4),
            ],
        }
    }

    fn bias_bonus(&self) -> f64 {
        match self {
            Self::Morning => 0.05,
            Self::Afternoon => 0.02,
            Self::Evening => -0.02,
            Self::Night => -0.05,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monday => "monday",
            Self::Tuesday => "tuesday",
            Self::Wednesday => "wednesday",
            Self::Thursday => "thursday",
            Self::Friday => "friday",
            Self::Saturday => "saturday",
            Self::Sunday => "sunday",
        }
    }

    fn factors(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Monday => &[("motivation", 0.8), ("stress", 0.6), ("energy", 0.7)],
            Self::Tuesday => &[("productivity", 0.85), ("focus", 0.8), ("clarity", 0.75)],
            Self::Wednesday => &[("productivity", 0.75), ("clarity", 0.7), ("stress", 0.5)],
            Self::Thursday => &[("motivation", 0.65), ("optimism", 0.65), ("energy", 0.6)],
            Self::Friday => &[("optimism", 0.8), ("energy", 0.65), ("riskTolerance", 0.6)],
            Self::Saturday => &[("creativity", 0.8), ("stress", 0.25), ("riskTolerance", 0.65)],
            Self::Sunday => &[("reflection", 0.85), ("stress", 0.2), ("optimism", 0.65)],
        }
    }

    fn bias_bonus(&self) -> f64 {
        match self {
            Self::Monday => 0.03,
            Self::Tuesday => 0.05,
            Self::Wednesday => 0.02,
            Self::Thursday => 0.01,
            Self::Friday => -0.02,
            Self::Saturday => -0.03,
            Self::Sunday => -0.04,
        }
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => Self::Monday,
            Weekday::Tue => Self::Tuesday,
            Weekday::Wed => Self::Wednesday,
            Weekday::Thu => Self::Thursday,
            Weekday::Fri => Self::Friday,
            Weekday::Sat => Self::Saturday,
            Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// Northern-hemisphere meteorological seasons.
    pub fn from_month(month: u32) -> Self {
        match month {
            3..=5 => Self::Spring,
            6..=8 => Self::Summer,
            9..=11 => Self::Autumn,
            _ => Self::Winter,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    fn factors(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Spring => &[("optimism", 0.8), ("energy", 0.75), ("growth", 0.85)],
            Self::Summer => &[("energy", 0.85), ("optimism", 0.75), ("riskTolerance", 0.7)],
            Self::Autumn => &[("reflection", 0.75), ("clarity", 0.7), ("stability", 0.7)],
            Self::Winter => &[("reflection", 0.8), ("energy", 0.4), ("riskTolerance", 0.35)],
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoonPhase {
    New,
    Waxing,
    Full,
    Waning,
}

impl MoonPhase {
    /// Buckets the age of the lunar cycle (days since new moon).
    ///
    /// Four equal arcs centred on 0, 1/4, 1/2 and 3/4 of the cycle.
    pub fn from_cycle_age(age_days: f64) -> Self {
        let arc = LUNAR_CYCLE_DAYS / 4.0;
        let age = age_days.rem_euclid(LUNAR_CYCLE_DAYS);
        match ((age + arc / 2.0) / arc).floor() as u32 % 4 {
            0 => Self::New,
            1 => Self::Waxing,
            2 => Self::Full,
            _ => Self::Waning,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Waxing => "waxing",
            Self::Full => "full",
            Self::Waning => "waning",
        }
    }

    fn factors(&self) -> &'static [(&'static str, f64)] {
        match self {
            Self::New => &[("intention", 0.8), ("clarity", 0.5), ("riskTolerance", 0.45)],
            Self::Waxing => &[("growth", 0.75), ("motivation", 0.7), ("optimism", 0.65)],
            Self::Full => &[("clarity", 0.8), ("energy", 0.75), ("stress", 0.55)],
            Self::Waning => &[("reflection", 0.8), ("energy", 0.45), ("riskTolerance", 0.4)],
        }
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Clock-derived factors for one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemporalFactors {
    pub time_of_day: TimeOfDay,
    pub day_of_week: DayOfWeek,
    pub season: Season,
    pub moon_phase: MoonPhase,
    /// Factor name to mean value across the tables defining it.
    pub combined_factors: BTreeMap<String, f64>,
    /// Mean of all combined factors.
    pub overall_score: f64,
    /// Signed nudge in [-0.5, 0.5].
    pub decision_bias: f64,
}

impl TemporalFactors {
    /// Returns the named combined factor, or 0.5 when no table defines it.
    pub fn factor(&self, name: &str) -> f64 {
        self.combined_factors
            .get(name)
            .copied()
            .unwrap_or(NEUTRAL_FACTOR)
    }
}

/// One day evaluated by the optimal-window lookahead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayForecast {
    pub date: NaiveDate,
    pub day_of_week: DayOfWeek,
    pub season: Season,
    pub moon_phase: MoonPhase,
    pub overall_score: f64,
    pub decision_bias: f64,
}

/// Static lookahead report: the best upcoming day and two runners-up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimalWindow {
    pub evaluated_from: NaiveDate,
    pub best: DayForecast,
    pub runners_up: Vec<DayForecast>,
}

/// Derives [`TemporalFactors`] from wall-clock time.
#[derive(Debug, Clone, Copy)]
pub struct TemporalProcessor {
    offset: FixedOffset,
    window_time: NaiveTime,
}

impl TemporalProcessor {
    /// Creates a processor reading the clock at a fixed UTC offset.
    ///
    /// `window_hour` is the local hour used by the optimal-window lookahead.
    pub fn new(utc_offset_minutes: i32, window_hour: u32) -> Result<Self, ValidationError> {
        let offset = utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| {
                ValidationError::out_of_range(
                    "utc_offset_minutes",
                    -1440.0,
                    1440.0,
                    f64::from(utc_offset_minutes),
                )
            })?;
        let window_time = NaiveTime::from_hms_opt(window_hour, 0, 0).ok_or_else(|| {
            ValidationError::out_of_range("optimal_window_hour", 0.0, 23.0, f64::from(window_hour))
        })?;

        Ok(Self {
            offset,
            window_time,
        })
    }

    /// Analyses a single instant.
    pub fn factors_at(&self, timestamp: &Timestamp) -> TemporalFactors {
        let local = timestamp.as_datetime().with_timezone(&self.offset);

        let time_of_day = TimeOfDay::from_hour(local.hour());
        let day_of_week = DayOfWeek::from(local.weekday());
        let season = Season::from_month(local.month());
        let moon_phase = moon_phase_at(timestamp);

        let combined_factors = combine(&[
            time_of_day.factors(),
            day_of_week.factors(),
            season.factors(),
            moon_phase.factors(),
        ]);

        let overall_score = if combined_factors.is_empty() {
            NEUTRAL_FACTOR
        } else {
            combined_factors.values().sum::<f64>() / combined_factors.len() as f64
        };

        let neutral = |name: &str| combined_factors.get(name).copied().unwrap_or(NEUTRAL_FACTOR) - 0.5;
        let decision_bias = (neutral("clarity") * 0.30
            + neutral("energy") * 0.25
            + neutral("optimism") * 0.25
            + neutral("riskTolerance") * 0.20
            + time_of_day.bias_bonus()
            + day_of_week.bias_bonus())
        .clamp(-0.5, 0.5);

        TemporalFactors {
            time_of_day,
            day_of_week,
            season,
            moon_phase,
            combined_factors,
            overall_score,
            decision_bias,
        }
    }

    /// Evaluates the next seven calendar days at the configured hour.
    ///
    /// Days are ranked by overall score (ties keep chronological order); the
    /// top day is returned with the two runners-up.
    pub fn calculate_optimal_window(&self, from: NaiveDate) -> Result<OptimalWindow, AnalysisError> {
        let mut forecasts: Vec<DayForecast> = (1..=LOOKAHEAD_DAYS)
            .filter_map(|offset| from.checked_add_days(Days::new(offset)))
            .filter_map(|date| {
                let local = NaiveDateTime::new(date, self.window_time);
                let instant: DateTime<FixedOffset> =
                    self.offset.from_local_datetime(&local).single()?;
                let factors = self.factors_at(&Timestamp::from_datetime(instant.with_timezone(&Utc)));
                Some(DayForecast {
                    date,
                    day_of_week: factors.day_of_week,
                    season: factors.season,
                    moon_phase: factors.moon_phase,
                    overall_score: factors.overall_score,
                    decision_bias: factors.decision_bias,
                })
            })
            .collect();

        forecasts.sort_by(|a, b| {
            b.overall_score
                .partial_cmp(&a.overall_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut ranked = forecasts.into_iter();
        let best = ranked
            .next()
            .ok_or_else(|| AnalysisError::stage_failed("temporal", "no representable days ahead"))?;

        Ok(OptimalWindow {
            evaluated_from: from,
            best,
            runners_up: ranked.take(2).collect(),
        })
    }
}

impl Default for TemporalProcessor {
    fn default() -> Self {
        Self {
            offset: Utc.fix(),
            window_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default(),
        }
    }
}

impl Analyzer<Timestamp> for TemporalProcessor {
    type Signal = TemporalFactors;

    fn analyze(&self, input: &Timestamp) -> Result<TemporalFactors, AnalysisError> {
        Ok(self.factors_at(input))
    }
}

fn moon_phase_at(timestamp: &Timestamp) -> MoonPhase {
    let days = (timestamp.as_millis() - REFERENCE_NEW_MOON_MS) as f64 / MS_PER_DAY;
    MoonPhase::from_cycle_age(days)
}

fn combine(tables: &[&[(&'static str, f64)]]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<&'static str, (f64, u32)> = BTreeMap::new();
    for table in tables {
        for (name, value) in table.iter() {
            let entry = sums.entry(*name).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    sums.into_iter()
        .map(|(name, (sum, count))| (name.to_string(), sum / f64::from(count)))
        .collect()
}
