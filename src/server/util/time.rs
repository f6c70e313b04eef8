use chrono::{DateTime, Datelike, TimeZone, Utc};

/// Midnight UTC on the first day of the month containing `now`.
pub fn start_of_month(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

/// Won share of `total` as a rounded percentage, 0 when there are no leads.
pub fn conversion_rate(won: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((won as f64 / total as f64) * 100.0).round() as u32
}
