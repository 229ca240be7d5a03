pub fn format_iso8601_date(iso_date: &str) -> String {
    if let Ok(datetime) = iso_date.parse::<chrono::DateTime<chrono::Utc>>() {
        datetime.format("%Y-%m-%d").to_string()
    } else {
        iso_date.to_string()
    }
}

// Formats each x1000 step
pub fn format_number(number: i64) -> String {
    let num_str = number.to_string();
    let mut result = String::new();
    let len = num_str.len();

    for (i, c) in num_str.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}

pub fn format_message_time(timestamp: &chrono::DateTime<chrono::Utc>) -> String {
    timestamp.format("%H:%M").to_string()
}

pub fn format_iso8601_duration(duration: &str) -> String {
    // Truncated values like "1H" put the unit marker before the "PT"
    // prefix ends, so out-of-range slices fall back to 0.
    fn component(duration: &str, start: usize, end: usize) -> u32 {
        duration
            .get(start..end)
            .and_then(|s| s.parse().ok())
            .unwrap_or(0)
    }

    let hours = duration.find('H').map_or(0, |h| component(duration, 2, h));
    let minutes = duration.find('M').map_or(0, |m| {
        let start = duration.find('H').map_or(2, |h| h + 1);
        component(duration, start, m)
    });
    let seconds = duration.find('S').map_or(0, |s| {
        let start = duration
            .find('M')
            .map_or_else(|| duration.find('H').map_or(2, |h| h + 1), |m| m + 1);
        component(duration, start, s)
    });
    if hours != 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_well_formed_durations() {
        assert_eq!(format_iso8601_duration("PT1H2M3S"), "01:02:03");
        assert_eq!(format_iso8601_duration("PT4M20S"), "04:20");
        assert_eq!(format_iso8601_duration("PT45S"), "00:45");
    }

    #[test]
    fn malformed_durations_do_not_panic() {
        assert_eq!(format_iso8601_duration("1H"), "00:00");
        assert_eq!(format_iso8601_duration("M"), "00:00");
        assert_eq!(format_iso8601_duration(""), "00:00");
    }
}
