use chrono::{DateTime, Local, Utc};

/// Sidebar label for a session's last update, relative to `now`.
pub fn relative_time(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if hours < 24 {
        format!("{hours}h ago")
    } else if days < 7 {
        format!("{days}d ago")
    } else {
        then.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// Time of day shown under a message bubble.
pub fn clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn recent_updates_read_as_just_now() {
        assert_eq!(relative_time(now() - Duration::seconds(30), now()), "Just now");
        // Clock skew puts the server slightly ahead.
        assert_eq!(relative_time(now() + Duration::seconds(5), now()), "Just now");
    }

    #[test]
    fn buckets_by_minutes_hours_days() {
        assert_eq!(relative_time(now() - Duration::minutes(5), now()), "5m ago");
        assert_eq!(relative_time(now() - Duration::minutes(59), now()), "59m ago");
        assert_eq!(relative_time(now() - Duration::minutes(60), now()), "1h ago");
        assert_eq!(relative_time(now() - Duration::hours(23), now()), "23h ago");
        assert_eq!(relative_time(now() - Duration::days(6), now()), "6d ago");
    }

    #[test]
    fn older_updates_show_the_date() {
        let label = relative_time(now() - Duration::days(30), now());
        assert_eq!(label.len(), 10);
        assert!(label.starts_with("2024-02-1"));
    }
}
