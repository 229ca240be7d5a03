pub fn extract_youtube_video_id(url: &str) -> Option<String> {
    if let Some(captures) = regex::Regex::new(
        r"(?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/)([a-zA-Z0-9_-]{11})",
    )
    .ok()?
    .captures(url)
    {
        return captures.get(1).map(|m| m.as_str().to_string());
    }
    None
}

/// Parse ISO8601 duration string (PT1H2M3S) to total seconds
pub fn parse_iso8601_duration_to_seconds(duration_str: &str) -> i64 {
    if duration_str.is_empty() {
        return 0;
    }

    if !duration_str.starts_with("PT") {
        return 0;
    }

    let duration_part = &duration_str[2..];
    let mut total_seconds = 0.0;
    let mut current_number = String::new();

    for ch in duration_part.chars() {
        if ch.is_ascii_digit() || ch == '.' {
            current_number.push(ch);
        } else {
            if let Ok(num) = current_number.parse::<f64>() {
                match ch {
                    'H' => total_seconds += num * 3600.0,
                    'M' => total_seconds += num * 60.0,
                    'S' => total_seconds += num,
                    _ => {}
                }
            }
            current_number.clear();
        }
    }

    total_seconds as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_video_id_from_common_url_shapes() {
        let id = Some("dQw4w9WgXcQ".to_string());
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            id
        );
        assert_eq!(extract_youtube_video_id("https://youtu.be/dQw4w9WgXcQ"), id);
        assert_eq!(
            extract_youtube_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ"),
            id
        );
    }

    #[test]
    fn rejects_non_video_urls() {
        assert_eq!(extract_youtube_video_id("https://example.com/watch?v=x"), None);
        assert_eq!(extract_youtube_video_id("not a url"), None);
    }

    #[test]
    fn parses_durations() {
        assert_eq!(parse_iso8601_duration_to_seconds("PT4M13S"), 253);
        assert_eq!(parse_iso8601_duration_to_seconds("PT1H2M3S"), 3723);
        assert_eq!(parse_iso8601_duration_to_seconds("PT45S"), 45);
        assert_eq!(parse_iso8601_duration_to_seconds(""), 0);
        assert_eq!(parse_iso8601_duration_to_seconds("4M13S"), 0);
    }
}
