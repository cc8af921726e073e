// Formato de fechas del backend (RFC 3339, o ISO sin zona)

use chrono::{DateTime, NaiveDateTime};

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").ok()
}

/// "Mar 1, 2024". Si no se puede parsear se devuelve tal cual.
pub fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

/// "Mar 1, 2024 10:00"
pub fn format_datetime(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%b %-d, %Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}
