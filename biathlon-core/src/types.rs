//! Core types for the biathlon results library
//!
//! This module defines the event records fed into the race processor and the
//! error type shared by every loader in the crate. The processor itself never
//! fails; errors only come from reading configuration and event files.

use chrono::NaiveTime;
use std::fmt;
use std::path::PathBuf;

/// Competitor identifier as it appears in the event log
pub type CompetitorId = u32;

/// Result type for library operations
pub type Result<T> = std::result::Result<T, BiathlonError>;

/// Errors that can occur while loading race input
#[derive(Debug, thiserror::Error)]
pub enum BiathlonError {
    #[error("Invalid time format: {0:?}")]
    InvalidTime(String),

    #[error("Invalid duration format: {0:?}")]
    InvalidDuration(String),

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(String),

    #[error("Invalid start time in config: {0:?}")]
    InvalidStartTime(String),

    #[error("Invalid start delta in config: {0:?}")]
    InvalidStartDelta(String),

    #[error("Invalid event line: {reason}")]
    InvalidEvent { reason: String },

    #[error("Failed to parse line {line_no} '{line}': {source}")]
    EventLine {
        line_no: usize,
        line: String,
        #[source]
        source: Box<BiathlonError>,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BiathlonError {
    pub(crate) fn invalid_event(reason: impl Into<String>) -> Self {
        BiathlonError::InvalidEvent {
            reason: reason.into(),
        }
    }
}

/// A single race event, already split out of its log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Wall-clock time of the event
    pub time: NaiveTime,
    /// Raw event code; see [`EventCode`] for the known values
    pub code: i32,
    /// Competitor the event refers to
    pub competitor_id: CompetitorId,
    /// Remaining whitespace-separated tokens of the line
    pub extra_params: Vec<String>,
}

impl Event {
    pub fn new(time: NaiveTime, code: i32, competitor_id: CompetitorId) -> Self {
        Self {
            time,
            code,
            competitor_id,
            extra_params: Vec::new(),
        }
    }

    /// Builder method: append an extra parameter
    pub fn with_param(mut self, param: impl Into<String>) -> Self {
        self.extra_params.push(param.into());
        self
    }

    /// Interpreted event kind, `None` for codes outside the known range
    pub fn kind(&self) -> Option<EventCode> {
        EventCode::from_code(self.code)
    }
}

/// The fixed set of incoming event codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCode {
    /// 1: competitor registered
    Registered,
    /// 2: start time set by draw, param = `HH:MM:SS.mmm`
    StartTimeAssigned,
    /// 3: competitor is on the start line
    OnStartLine,
    /// 4: competitor has started
    Started,
    /// 5: competitor is on the firing range, param = range number
    OnFiringRange,
    /// 6: target hit, param = target number
    TargetHit,
    /// 7: competitor left the firing range
    LeftFiringRange,
    /// 8: competitor entered the penalty laps
    EnteredPenalty,
    /// 9: competitor left the penalty laps
    LeftPenalty,
    /// 10: competitor ended a main lap
    LapEnded,
    /// 11: competitor can't continue, params = free-text reason
    CannotContinue,
}

impl EventCode {
    /// Map a numeric code from the event log to its kind
    pub fn from_code(code: i32) -> Option<Self> {
        let kind = match code {
            1 => EventCode::Registered,
            2 => EventCode::StartTimeAssigned,
            3 => EventCode::OnStartLine,
            4 => EventCode::Started,
            5 => EventCode::OnFiringRange,
            6 => EventCode::TargetHit,
            7 => EventCode::LeftFiringRange,
            8 => EventCode::EnteredPenalty,
            9 => EventCode::LeftPenalty,
            10 => EventCode::LapEnded,
            11 => EventCode::CannotContinue,
            _ => return None,
        };
        Some(kind)
    }

    /// Numeric code as written in the event log
    pub fn code(self) -> i32 {
        match self {
            EventCode::Registered => 1,
            EventCode::StartTimeAssigned => 2,
            EventCode::OnStartLine => 3,
            EventCode::Started => 4,
            EventCode::OnFiringRange => 5,
            EventCode::TargetHit => 6,
            EventCode::LeftFiringRange => 7,
            EventCode::EnteredPenalty => 8,
            EventCode::LeftPenalty => 9,
            EventCode::LapEnded => 10,
            EventCode::CannotContinue => 11,
        }
    }
}

impl fmt::Display for EventCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventCode::Registered => "Registered",
            EventCode::StartTimeAssigned => "StartTimeAssigned",
            EventCode::OnStartLine => "OnStartLine",
            EventCode::Started => "Started",
            EventCode::OnFiringRange => "OnFiringRange",
            EventCode::TargetHit => "TargetHit",
            EventCode::LeftFiringRange => "LeftFiringRange",
            EventCode::EnteredPenalty => "EnteredPenalty",
            EventCode::LeftPenalty => "LeftPenalty",
            EventCode::LapEnded => "LapEnded",
            EventCode::CannotContinue => "CannotContinue",
        };
        write!(f, "{}({})", name, self.code())
    }
}
