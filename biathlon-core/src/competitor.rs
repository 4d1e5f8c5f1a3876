//! Per-competitor race state
//!
//! One [`Competitor`] is created the first time an event mentions its id and
//! is mutated by the processor as the race unfolds.

use crate::types::CompetitorId;
use chrono::{Duration, NaiveTime};

/// Mutable timing record for one athlete
#[derive(Debug, Clone, PartialEq)]
pub struct Competitor {
    pub id: CompetitorId,
    /// True until a start inside the start window is registered
    pub not_started: bool,
    /// True until the configured number of laps is completed
    pub not_finished: bool,

    /// Start time assigned by the draw
    pub planned_start: NaiveTime,
    /// Time of the last start event
    pub actual_start: Option<NaiveTime>,
    /// Time the last required lap was completed
    pub finish_time: Option<NaiveTime>,

    /// Hits over the whole race
    pub total_hits: u32,
    /// Hits since the last arrival at a firing range
    pub current_hits: u32,

    /// Entry time of the currently open penalty loop
    pub penalty_entry: Option<NaiveTime>,
    pub total_penalty_time: Duration,
    /// Accumulated penalty distance (missed shots times penalty lap length)
    pub total_penalty_distance: i64,

    /// Start of the lap currently being run
    pub lap_start: NaiveTime,
    pub lap_durations: Vec<Duration>,
    pub total_duration: Duration,
}

impl Competitor {
    pub fn new(id: CompetitorId) -> Self {
        Self {
            id,
            not_started: true,
            not_finished: true,
            planned_start: NaiveTime::default(),
            actual_start: None,
            finish_time: None,
            total_hits: 0,
            current_hits: 0,
            penalty_entry: None,
            total_penalty_time: Duration::zero(),
            total_penalty_distance: 0,
            lap_start: NaiveTime::default(),
            lap_durations: Vec::new(),
            total_duration: Duration::zero(),
        }
    }

    /// Open a penalty loop at `t`, replacing any loop already open
    pub fn enter_penalty(&mut self, t: NaiveTime) {
        self.penalty_entry = Some(t);
    }

    /// Close the open penalty loop at `t` and add `distance` to the total
    ///
    /// Without a matching entry the interval is measured from midnight.
    pub fn exit_penalty(&mut self, t: NaiveTime, distance: i64) {
        let entry = self.penalty_entry.take().unwrap_or_default();

        self.total_penalty_time = self.total_penalty_time + t.signed_duration_since(entry);
        self.total_penalty_distance += distance;
    }

    /// Close the current lap at `t`; the next lap starts at the same instant
    pub fn end_lap(&mut self, t: NaiveTime) {
        let duration = t.signed_duration_since(self.lap_start);

        self.lap_durations.push(duration);
        self.total_duration = self.total_duration + duration;
        self.lap_start = t;
    }

    pub fn laps_completed(&self) -> usize {
        self.lap_durations.len()
    }

    /// Started inside the window and completed every lap
    pub fn is_ranked(&self) -> bool {
        !self.not_started && !self.not_finished
    }
}
