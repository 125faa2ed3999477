//! Duration and time-of-day normalization.
//!
//! Upstream data is third-party and frequently malformed, so nothing here
//! returns an error: bad intervals read as zero minutes and unreadable
//! timestamps yield a neutral convenience score.

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};
use once_cell::sync::Lazy;
use regex::Regex;

static INTERVAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?").expect("interval pattern is valid"));

/// Score used when a departure time cannot be read
pub const NEUTRAL_CONVENIENCE: u8 = 50;

/// One linear piece of the departure convenience curve, `[start, end)` in hours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvenienceBand {
    pub start_hour: f64,
    pub end_hour: f64,
    pub score_at_start: f64,
    pub score_at_end: f64,
}

const fn band(start_hour: f64, end_hour: f64, score_at_start: f64, score_at_end: f64) -> ConvenienceBand {
    ConvenienceBand { start_hour, end_hour, score_at_start, score_at_end }
}

/// Departure desirability by local time of day. Ordering contract for
/// rankings: changing a breakpoint changes user-visible ordering.
pub const CONVENIENCE_CURVE: [ConvenienceBand; 10] = [
    band(0.0, 5.0, 30.0, 30.0),    // overnight
    band(5.0, 7.0, 50.0, 90.0),    // early morning ramp
    band(7.0, 8.0, 90.0, 100.0),   // morning peak
    band(8.0, 9.0, 100.0, 90.0),
    band(9.0, 12.0, 90.0, 70.0),   // late morning
    band(12.0, 17.0, 70.0, 85.0),  // afternoon
    band(17.0, 18.0, 85.0, 95.0),  // evening peak
    band(18.0, 19.0, 95.0, 85.0),
    band(19.0, 22.0, 85.0, 40.0),  // evening
    band(22.0, 24.0, 30.0, 30.0),  // late night
];

/// Parse a `PT{h}H{m}M` interval into minutes. Unparseable input is 0.
pub fn parse_interval_to_minutes(raw: &str) -> u32 {
    let Some(caps) = INTERVAL.captures(raw) else {
        if !raw.is_empty() {
            tracing::debug!(duration = raw, "unparseable duration, treating as 0 minutes");
        }
        return 0;
    };

    let part = |idx: usize| -> Option<u32> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    match (part(1), part(2)) {
        (Some(hours), Some(minutes)) => hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .unwrap_or(0),
        _ => 0,
    }
}

/// Read a supplier timestamp as local wall-clock time.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]` without offset, or RFC 3339 with an
/// offset (in which case the wall-clock time at that offset is kept).
pub fn parse_local_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.naive_local()))
}

pub fn departure_hour(raw: &str) -> Option<u32> {
    parse_local_timestamp(raw).map(|dt| dt.hour())
}

/// Convenience score for a time of day, 0-100
pub fn convenience_for_time(time: NaiveTime) -> u8 {
    let hour = time.hour() as f64 + time.minute() as f64 / 60.0;

    let score = CONVENIENCE_CURVE
        .iter()
        .find(|b| hour >= b.start_hour && hour < b.end_hour)
        .map(|b| {
            let progress = (hour - b.start_hour) / (b.end_hour - b.start_hour);
            b.score_at_start + (b.score_at_end - b.score_at_start) * progress
        })
        .unwrap_or(NEUTRAL_CONVENIENCE as f64);

    score.round().clamp(0.0, 100.0) as u8
}

/// Convenience score for a raw departure timestamp
pub fn departure_convenience_score(raw: &str) -> u8 {
    parse_local_timestamp(raw)
        .map(|dt| convenience_for_time(dt.time()))
        .unwrap_or(NEUTRAL_CONVENIENCE)
}

/// 22:00-04:59
pub fn is_red_eye_hour(hour: u32) -> bool {
    hour >= 22 || hour < 5
}

/// 05:00-06:59
pub fn is_early_departure_hour(hour: u32) -> bool {
    (5..7).contains(&hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval_to_minutes("PT2H"), 120);
        assert_eq!(parse_interval_to_minutes("PT45M"), 45);
        assert_eq!(parse_interval_to_minutes("PT7H35M"), 455);
        assert_eq!(parse_interval_to_minutes(""), 0);
        assert_eq!(parse_interval_to_minutes("two hours"), 0);
        assert_eq!(parse_interval_to_minutes("PT"), 0);
        assert_eq!(parse_interval_to_minutes("PT99999999999H"), 0);
    }

    #[test]
    fn test_parse_local_timestamp_formats() {
        let plain = parse_local_timestamp("2025-06-15T08:30:00").unwrap();
        assert_eq!((plain.hour(), plain.minute()), (8, 30));

        let short = parse_local_timestamp("2025-06-15T17:05").unwrap();
        assert_eq!(short.hour(), 17);

        // Offset timestamps keep their local wall-clock hour
        let offset = parse_local_timestamp("2025-06-15T23:15:00-05:00").unwrap();
        assert_eq!(offset.hour(), 23);

        assert!(parse_local_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_convenience_peaks() {
        let morning = departure_convenience_score("2025-06-15T08:00:00");
        assert!((90..=100).contains(&morning));
        assert_eq!(morning, 100);

        assert_eq!(departure_convenience_score("2025-06-15T07:00:00"), 90);
        assert_eq!(departure_convenience_score("2025-06-15T08:30:00"), 95);

        let evening = departure_convenience_score("2025-06-15T18:00:00");
        assert!((85..=95).contains(&evening));
    }

    #[test]
    fn test_convenience_night_band() {
        let night = departure_convenience_score("2025-06-15T03:00:00");
        assert!((20..=40).contains(&night));
        assert_eq!(departure_convenience_score("2025-06-15T23:30:00"), 30);
    }

    #[test]
    fn test_convenience_interpolates_mid_bands() {
        // 10:30 is halfway through 09-12 (90 -> 70)
        assert_eq!(departure_convenience_score("2025-06-15T10:30:00"), 80);
        // 06:00 is halfway through 05-07 (50 -> 90)
        assert_eq!(departure_convenience_score("2025-06-15T06:00:00"), 70);
        // 20:30 is halfway through 19-22 (85 -> 40)
        assert_eq!(departure_convenience_score("2025-06-15T20:30:00"), 63);
    }

    #[test]
    fn test_unreadable_timestamp_is_neutral() {
        assert_eq!(departure_convenience_score("soon"), NEUTRAL_CONVENIENCE);
    }

    #[test]
    fn test_hour_bands() {
        assert!(is_red_eye_hour(23));
        assert!(is_red_eye_hour(2));
        assert!(!is_red_eye_hour(5));
        assert!(is_early_departure_hour(6));
        assert!(!is_early_departure_hour(7));
    }
}
