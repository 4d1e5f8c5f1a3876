//! Race event processor
//!
//! Walks the event log once, in the order given, updating per-competitor
//! state and producing the narrated output log. Events that cannot be
//! interpreted are skipped rather than aborting the pass.

use crate::clock::{format_clock, parse_clock};
use crate::competitor::Competitor;
use crate::config::RaceConfig;
use crate::results::{build_rows, ResultRow};
use crate::types::{CompetitorId, Event, EventCode};
use chrono::NaiveTime;
use std::collections::BTreeMap;

/// Shots fired at every visit to a firing line
pub const SHOTS_PER_FIRING_LINE: u32 = 5;

/// Narrated log and result table of a processed race
#[derive(Debug, Clone, PartialEq)]
pub struct RaceReport {
    pub logs: Vec<String>,
    pub results: Vec<ResultRow>,
}

impl RaceReport {
    /// Result rows rendered as text lines
    pub fn result_lines(&self) -> Vec<String> {
        self.results.iter().map(ToString::to_string).collect()
    }
}

/// Consumes race events and owns all competitor state
pub struct RaceProcessor {
    config: RaceConfig,
    /// Keyed by id so enumeration order is deterministic
    competitors: BTreeMap<CompetitorId, Competitor>,
    logs: Vec<String>,
}

impl RaceProcessor {
    pub fn new(config: RaceConfig) -> Self {
        Self {
            config,
            competitors: BTreeMap::new(),
            logs: Vec::new(),
        }
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Narrated log lines in event order
    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn competitor(&self, id: CompetitorId) -> Option<&Competitor> {
        self.competitors.get(&id)
    }

    /// All known competitors in ascending id order
    pub fn competitors(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.values()
    }

    /// Append `[HH:MM:SS.mmm] message` to the output log
    pub fn add_log(&mut self, time: NaiveTime, message: &str) {
        self.logs.push(format!("[{}] {}", format_clock(time), message));
    }

    /// Process a whole event sequence in order
    pub fn process_events(&mut self, events: &[Event]) {
        log::info!("Processing {} events", events.len());

        for event in events {
            self.process_event(event);
        }

        log::info!(
            "Processed events for {} competitors, {} log lines",
            self.competitors.len(),
            self.logs.len()
        );
    }

    /// Apply a single event and log it if it produces a message
    pub fn process_event(&mut self, event: &Event) {
        if let Some(message) = self.apply(event) {
            self.add_log(event.time, &message);
        }
    }

    fn apply(&mut self, event: &Event) -> Option<String> {
        let config = &self.config;
        let id = event.competitor_id;
        let comp = self
            .competitors
            .entry(id)
            .or_insert_with(|| Competitor::new(id));

        let Some(kind) = event.kind() else {
            log::warn!("Ignoring unknown event code {} for competitor {}", event.code, id);
            return None;
        };
        log::debug!("[{}] {} competitor={}", format_clock(event.time), kind, id);

        match kind {
            EventCode::Registered => Some(format!("The competitor({}) registered", id)),

            EventCode::StartTimeAssigned => {
                let [param] = event.extra_params.as_slice() else {
                    log::warn!("Start time event for competitor {} needs exactly one parameter", id);
                    return None;
                };
                match parse_clock(param) {
                    Ok(planned) => {
                        comp.planned_start = planned;
                        comp.lap_start = planned;
                        Some(format!(
                            "The start time of competitor({}) was set by a draw to {}",
                            id, param
                        ))
                    }
                    Err(e) => {
                        log::warn!("Skipping start time for competitor {}: {}", id, e);
                        None
                    }
                }
            }

            EventCode::OnStartLine => Some(format!("The competitor({}) is on the start line", id)),

            EventCode::Started => {
                comp.actual_start = Some(event.time);

                // A window that runs past midnight never closes on the same day
                let (window_end, wrapped) =
                    comp.planned_start.overflowing_add_signed(config.start_delta);
                let late = match wrapped {
                    0 => event.time > window_end,
                    w => w < 0,
                };

                if late {
                    Some(format!("The competitor({}) is disqualified", id))
                } else {
                    comp.not_started = false;
                    Some(format!("The competitor({}) has started", id))
                }
            }

            EventCode::OnFiringRange => {
                comp.current_hits = 0;
                match event.extra_params.as_slice() {
                    [range] => Some(format!(
                        "The competitor({}) is on the firing range({})",
                        id, range
                    )),
                    _ => None,
                }
            }

            EventCode::TargetHit => {
                comp.total_hits += 1;
                comp.current_hits += 1;
                event.extra_params.first().map(|target| {
                    format!("The target({}) has been hit by competitor({})", target, id)
                })
            }

            EventCode::LeftFiringRange => {
                Some(format!("The competitor({}) left the firing range", id))
            }

            EventCode::EnteredPenalty => {
                comp.enter_penalty(event.time);
                Some(format!("The competitor({}) entered the penalty laps", id))
            }

            EventCode::LeftPenalty => {
                let missed = i64::from(SHOTS_PER_FIRING_LINE) - i64::from(comp.current_hits);
                comp.exit_penalty(event.time, missed * i64::from(config.penalty_len));
                Some(format!("The competitor({}) left the penalty laps", id))
            }

            EventCode::LapEnded => {
                let required = config.laps as usize;
                if comp.laps_completed() < required {
                    comp.end_lap(event.time);
                    if comp.laps_completed() == required {
                        comp.not_finished = false;
                        comp.finish_time = Some(event.time);
                    }
                } else {
                    log::warn!("Competitor {} ended a lap beyond the configured {}", id, required);
                }
                Some(format!("The competitor({}) ended the main lap", id))
            }

            EventCode::CannotContinue => {
                let reason = event.extra_params.join(" ");
                Some(format!("The competitor({}) can`t continue: {}", id, reason))
            }
        }
    }

    /// Ranked result rows: finishers by total time, then everyone else
    pub fn result_rows(&self) -> Vec<ResultRow> {
        build_rows(&self.config, self.competitors.values())
    }

    /// Result table rendered as text lines
    pub fn generate_results(&self) -> Vec<String> {
        self.result_rows().iter().map(ToString::to_string).collect()
    }

    /// Consume the processor, keeping the log and the result table
    pub fn into_report(self) -> RaceReport {
        let results = self.result_rows();
        RaceReport {
            logs: self.logs,
            results,
        }
    }
}

/// Run the full pipeline over already-loaded input
pub fn run(config: RaceConfig, events: &[Event]) -> RaceReport {
    let mut processor = RaceProcessor::new(config);
    processor.process_events(events);
    processor.into_report()
}
