use std::time::Duration;

/// Converts a Duration to a human-readable string with at most 2 units
/// e.g., "1 m, 5 s", "1 s, 133 ms", "10 ms"
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();
    if total_ms == 0 {
        return "0 ms".to_string();
    }

    const UNITS: [(u128, &str); 4] = [
        (60 * 60 * 1_000, "h"),
        (60 * 1_000, "m"),
        (1_000, "s"),
        (1, "ms"),
    ];

    let mut rest = total_ms;
    let mut parts = Vec::with_capacity(2);
    for (ms_per_unit, name) in UNITS {
        let amount = rest / ms_per_unit;
        rest %= ms_per_unit;
        if amount > 0 {
            parts.push(format!("{} {}", amount, name));
            if parts.len() == 2 {
                break;
            }
        }
    }

    parts.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(0)), "0 ms");
        assert_eq!(format_duration(Duration::from_millis(10)), "10 ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1 s, 500 ms");
        assert_eq!(format_duration(Duration::from_secs(65)), "1 m, 5 s");
        assert_eq!(format_duration(Duration::from_secs(3600 + 120)), "1 h, 2 m");

        // Only the first two non-zero units
        assert_eq!(format_duration(Duration::from_millis(3_661_001)), "1 h, 1 m");
        assert_eq!(format_duration(Duration::from_millis(59999)), "59 s, 999 ms");
    }
}
