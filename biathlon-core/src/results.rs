//! Final standings table
//!
//! Rows are ordered with finishers first (ascending total time) and every
//! competitor that did not start or did not finish after them. The sort is
//! stable, so non-finishers keep their id order.

use crate::clock::format_duration;
use crate::competitor::Competitor;
use crate::config::RaceConfig;
use crate::processor::SHOTS_PER_FIRING_LINE;
use crate::types::CompetitorId;
use chrono::Duration;
use serde::{Serialize, Serializer};
use std::fmt;

/// Outcome shown in the first column of a result row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceStatus {
    NotStarted,
    NotFinished,
    /// Total time over all main laps
    Finished(Duration),
}

impl fmt::Display for RaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaceStatus::NotStarted => write!(f, "NotStarted"),
            RaceStatus::NotFinished => write!(f, "NotFinished"),
            RaceStatus::Finished(total) => write!(f, "{}", format_duration(*total)),
        }
    }
}

impl Serialize for RaceStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Time spent over a distance and the resulting average speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Split {
    #[serde(serialize_with = "serialize_duration")]
    pub duration: Duration,
    pub speed: f64,
}

impl Split {
    /// Build a split; a zero duration yields an infinite or NaN speed
    pub fn new(distance: f64, duration: Duration) -> Self {
        let seconds = duration.num_milliseconds() as f64 / 1000.0;
        Self {
            duration,
            speed: distance / seconds,
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {:.3}}}", format_duration(self.duration), self.speed)
    }
}

fn serialize_duration<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_duration(*d))
}

/// One line of the standings table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub status: RaceStatus,
    pub competitor_id: CompetitorId,
    /// One entry per configured lap, `None` for laps not completed
    pub laps: Vec<Option<Split>>,
    pub penalty: Option<Split>,
    pub hits: u32,
    pub shots: u32,
}

struct OptSplit<'a>(&'a Option<Split>);

impl fmt::Display for OptSplit<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(split) => write!(f, "{}", split),
            None => write!(f, "{{,}}"),
        }
    }
}

impl fmt::Display for ResultRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} [", self.status, self.competitor_id)?;
        for (i, lap) in self.laps.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", OptSplit(lap))?;
        }
        write!(
            f,
            "] {} {}/{}",
            OptSplit(&self.penalty),
            self.hits,
            self.shots
        )
    }
}

impl ResultRow {
    /// Summarise one competitor against the race configuration
    ///
    /// The penalty column is driven by `total_penalty_distance`: it is shown
    /// only when that distance is positive, whatever time was spent in the loop.
    pub fn from_competitor(config: &RaceConfig, comp: &Competitor) -> Self {
        let status = if comp.not_started {
            RaceStatus::NotStarted
        } else if comp.not_finished {
            RaceStatus::NotFinished
        } else {
            RaceStatus::Finished(comp.total_duration)
        };

        let lap_len = f64::from(config.lap_len);
        let laps = (0..config.laps as usize)
            .map(|i| {
                comp.lap_durations
                    .get(i)
                    .map(|&duration| Split::new(lap_len, duration))
            })
            .collect();

        let penalty = (comp.total_penalty_distance > 0).then(|| {
            Split::new(comp.total_penalty_distance as f64, comp.total_penalty_time)
        });

        Self {
            status,
            competitor_id: comp.id,
            laps,
            penalty,
            hits: comp.total_hits,
            shots: SHOTS_PER_FIRING_LINE.saturating_mul(config.firing_lines),
        }
    }
}

/// Sort competitors into standings order and build their rows
pub fn build_rows<'a, I>(config: &RaceConfig, competitors: I) -> Vec<ResultRow>
where
    I: IntoIterator<Item = &'a Competitor>,
{
    let mut ordered: Vec<&Competitor> = competitors.into_iter().collect();

    // Unranked competitors all compare equal, so the stable sort keeps their order
    ordered.sort_by_key(|c| {
        if c.is_ranked() {
            (false, c.total_duration)
        } else {
            (true, Duration::zero())
        }
    });

    ordered
        .into_iter()
        .map(|c| ResultRow::from_competitor(config, c))
        .collect()
}
