//! Biathlon Race Results Library
//!
//! Turns a chronological log of biathlon race events into a narrated event
//! log and a final standings table with lap times, penalty loop times and
//! shooting accuracy.
//!
//! # Architecture
//!
//! - Loads race parameters from JSON or TOML config files
//! - Parses `[HH:MM:SS.mmm] code competitorId [params...]` event lines
//! - Replays events through a per-competitor state machine
//! - Ranks competitors and formats the result table
//!
//! Printing and writing report files is left to the application layer
//! (biathlon-cli).
//!
//! # Example Usage
//!
//! ```no_run
//! use biathlon_core::{load_config, load_events, RaceProcessor};
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.json")).unwrap();
//! let events = load_events(Path::new("events.txt")).unwrap();
//!
//! let mut processor = RaceProcessor::new(config);
//! processor.process_events(&events);
//!
//! for line in processor.logs() {
//!     println!("{}", line);
//! }
//! for row in processor.generate_results() {
//!     println!("{}", row);
//! }
//! ```

// Public modules
pub mod clock;
pub mod competitor;
pub mod config;
pub mod events;
pub mod processor;
pub mod results;
pub mod types;

// Re-export main types for convenience
pub use competitor::Competitor;
pub use config::{load_config, RaceConfig};
pub use events::{load_events, parse_event_line, parse_events};
pub use processor::{run, RaceProcessor, RaceReport, SHOTS_PER_FIRING_LINE};
pub use results::{RaceStatus, ResultRow, Split};
pub use types::{BiathlonError, CompetitorId, Event, EventCode, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_basics() {
        // Smoke test: an empty race has no log and no rows
        let processor = RaceProcessor::new(RaceConfig::new());
        assert!(processor.logs().is_empty());
        assert!(processor.generate_results().is_empty());
    }
}
