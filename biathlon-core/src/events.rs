//! Event log parser
//!
//! Each non-blank line of an event log has the form
//! `[HH:MM:SS.mmm] eventCode competitorId [extra params...]`.

use crate::clock::parse_clock;
use crate::types::{BiathlonError, CompetitorId, Event, Result};
use std::fs;
use std::path::Path;

/// Parse a single event line
pub fn parse_event_line(line: &str) -> Result<Event> {
    let line = line.trim();

    let rest = line
        .strip_prefix('[')
        .ok_or_else(|| BiathlonError::invalid_event("missing '[' before timestamp"))?;
    let (time_str, event_part) = rest
        .split_once(']')
        .ok_or_else(|| BiathlonError::invalid_event("missing ']' after timestamp"))?;

    let time = parse_clock(time_str)?;

    let mut tokens = event_part.split_whitespace();
    let (Some(code_str), Some(id_str)) = (tokens.next(), tokens.next()) else {
        return Err(BiathlonError::invalid_event("not enough tokens"));
    };

    let code: i32 = code_str
        .parse()
        .map_err(|_| BiathlonError::invalid_event(format!("invalid event ID: {}", code_str)))?;
    let competitor_id: CompetitorId = id_str
        .parse()
        .map_err(|_| BiathlonError::invalid_event(format!("invalid competitor ID: {}", id_str)))?;

    Ok(Event {
        time,
        code,
        competitor_id,
        extra_params: tokens.map(str::to_string).collect(),
    })
}

/// Parse every non-blank line of an event log held in memory
pub fn parse_events(content: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();

    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let event = parse_event_line(line).map_err(|e| BiathlonError::EventLine {
            line_no: idx + 1,
            line: line.to_string(),
            source: Box::new(e),
        })?;
        events.push(event);
    }

    Ok(events)
}

/// Load and parse an event log file
pub fn load_events(path: &Path) -> Result<Vec<Event>> {
    log::info!("Loading events: {:?}", path);

    let content = fs::read_to_string(path).map_err(|source| BiathlonError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let events = parse_events(&content)?;
    log::info!("Loaded {} events from {:?}", events.len(), path);
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::io::Write;

    #[test]
    fn test_parse_event_with_param() {
        let event = parse_event_line("[12:34:56.789] 1 1001 start").unwrap();

        assert_eq!(event.time, NaiveTime::from_hms_milli_opt(12, 34, 56, 789).unwrap());
        assert_eq!(event.code, 1);
        assert_eq!(event.competitor_id, 1001);
        assert_eq!(event.extra_params, vec!["start"]);
    }

    #[test]
    fn test_parse_event_without_params() {
        let event = parse_event_line("[12:34:56.789] 1 1001").unwrap();
        assert!(event.extra_params.is_empty());
    }

    #[test]
    fn test_parse_event_multiword_params() {
        let event = parse_event_line("[09:59:03.872] 11 1 Lost in the forest").unwrap();
        assert_eq!(event.code, 11);
        assert_eq!(event.extra_params, vec!["Lost", "in", "the", "forest"]);
    }

    #[test]
    fn test_parse_event_unknown_code_is_kept() {
        let event = parse_event_line("[09:00:00.000] 42 3").unwrap();
        assert_eq!(event.code, 42);
        assert_eq!(event.kind(), None);
    }

    #[test]
    fn test_parse_event_errors() {
        assert!(matches!(
            parse_event_line("[invalid time] 1 1001 start"),
            Err(BiathlonError::InvalidTime(_))
        ));
        assert!(parse_event_line("12:34:56.789 1 1001").is_err());
        assert!(parse_event_line("[12:34:56.789 1 1001").is_err());
        assert!(parse_event_line("[12:34:56.789] 1").is_err());
        assert!(parse_event_line("[12:34:56.789] x 1001").is_err());
        assert!(parse_event_line("[12:34:56.789] 1 abc").is_err());
    }

    #[test]
    fn test_parse_events_skips_blank_lines() {
        let content = "\n[09:05:59.867] 1 1\n   \n[09:15:00.841] 2 1 09:30:00.000\n";
        let events = parse_events(content).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].extra_params, vec!["09:30:00.000"]);
    }

    #[test]
    fn test_parse_events_reports_line_number() {
        let content = "[09:05:59.867] 1 1\n[bad] 1 2\n";
        match parse_events(content) {
            Err(BiathlonError::EventLine { line_no, line, .. }) => {
                assert_eq!(line_no, 2);
                assert_eq!(line, "[bad] 1 2");
            }
            other => panic!("expected line error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_events_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[10:00:00.000] 1 1").unwrap();
        writeln!(file, "[10:00:01.000] 3 1").unwrap();

        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].code, 3);
    }

    #[test]
    fn test_load_events_missing_file() {
        assert!(matches!(
            load_events(Path::new("invalid_events.txt")),
            Err(BiathlonError::Io { .. })
        ));
    }
}
