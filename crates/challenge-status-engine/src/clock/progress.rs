use chrono::{DateTime, Utc};

/// Percentage of the `start..end` window elapsed at `now`, two decimals.
///
/// Not clamped: before `start` is negative, after `end` exceeds 100.
/// A zero-length window reads 100 once `now >= end`, else 0.
pub fn percent_complete(start: DateTime<Utc>, end: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let span = (end - start).num_milliseconds();
    if span == 0 {
        return if now >= end { 100.0 } else { 0.0 };
    }
    let elapsed = (now - start).num_milliseconds();
    round_hundredths(elapsed as f64 / span as f64 * 100.0)
}

/// Like [`percent_complete`], but reads 0 when either bound is absent.
pub fn percent_complete_between(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> f64 {
    match (start, end) {
        (Some(s), Some(e)) => percent_complete(s, e, now),
        _ => 0.0,
    }
}

/// Half-up rounding on the hundredths digit (ties go towards +inf).
fn round_hundredths(v: f64) -> f64 {
    (v * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn now() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2026-10-19T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    #[test]
    fn halfway() {
        let ms = Duration::milliseconds(1000);
        let p = percent_complete(now() - ms, now() + ms, now());
        assert!((p - 50.0).abs() < 0.01, "{p}");
    }

    #[test]
    fn rounds_to_two_decimals() {
        let p = percent_complete(now() - Duration::seconds(1), now() + Duration::seconds(2), now());
        assert_eq!(p, 33.33);
        let p = percent_complete(now() - Duration::seconds(2), now() + Duration::seconds(1), now());
        assert_eq!(p, 66.67);
    }

    #[test]
    fn not_clamped() {
        let start = now() + Duration::hours(1);
        let end = now() + Duration::hours(2);
        assert_eq!(percent_complete(start, end, now()), -100.0);
        let start = now() - Duration::hours(2);
        let end = now() - Duration::hours(1);
        assert_eq!(percent_complete(start, end, now()), 200.0);
    }

    #[test]
    fn degenerate_window() {
        let t = now();
        assert_eq!(percent_complete(t, t, now()), 100.0);
        assert_eq!(percent_complete(t, t, now() + Duration::seconds(1)), 100.0);
        assert_eq!(percent_complete(t, t, now() - Duration::seconds(1)), 0.0);
        assert!(percent_complete(t, t, now()).is_finite());
    }

    #[test]
    fn missing_bound_is_zero() {
        assert_eq!(percent_complete_between(None, Some(now()), now()), 0.0);
        assert_eq!(percent_complete_between(Some(now()), None, now()), 0.0);
        let p = percent_complete_between(
            Some(now() - Duration::hours(1)),
            Some(now() + Duration::hours(3)),
            now(),
        );
        assert_eq!(p, 25.0);
    }
}
