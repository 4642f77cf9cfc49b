use crate::models::SensorReading;

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = false;

use crate::log_info;

/// Parse one non-empty, trimmed device line into a partial reading.
///
/// Two wire formats, tried in fixed order:
/// 1. Tagged: comma-separated `T:<number>`, `W:<number>`, `S:<0|1>` tokens,
///    any order, any subset. Unrecognized tokens are skipped individually.
/// 2. Positional: `temperature,weight,seal` in fixed order, chosen only when
///    the line contains a comma but no tagged token matched. Empty positions
///    stay absent; `seal` is sealed only for the literal `1`.
///
/// A line matching neither yields an empty reading; parse failure is
/// silent and non-fatal. Numbers that fail to parse are dropped per-field.
///
/// The format heuristic (tag prefix presence) can misread a positional line
/// whose first value starts with `T:`, `W:` or `S:`; that ambiguity is part
/// of the device protocol and is kept as-is.
pub fn parse_line(line: &str) -> SensorReading {
    let mut reading = SensorReading::new();

    for token in line.split(',') {
        let token = token.trim();
        if let Some(value) = token.strip_prefix("T:") {
            if let Ok(temperature) = value.trim().parse::<f64>() {
                reading.temperature = Some(temperature);
            }
        } else if let Some(value) = token.strip_prefix("W:") {
            if let Ok(weight) = value.trim().parse::<f64>() {
                reading.weight = Some(weight);
            }
        } else if let Some(value) = token.strip_prefix("S:") {
            reading.sealed = Some(value.trim() == "1");
        }
    }

    if !tagged_prefix_present(line) && line.contains(',') {
        reading = parse_positional(line);
    }

    if reading.is_empty() {
        log_info!("device line matched no format, dropping: {line:?}");
    }

    reading
}

fn tagged_prefix_present(line: &str) -> bool {
    line.split(',')
        .map(str::trim)
        .any(|token| {
            token.starts_with("T:") || token.starts_with("W:") || token.starts_with("S:")
        })
}

fn parse_positional(line: &str) -> SensorReading {
    let mut reading = SensorReading::new();
    let mut values = line.split(',').map(str::trim);

    if let Some(value) = values.next() {
        if let Ok(temperature) = value.parse::<f64>() {
            reading.temperature = Some(temperature);
        }
    }
    if let Some(value) = values.next() {
        if let Ok(weight) = value.parse::<f64>() {
            reading.weight = Some(weight);
        }
    }
    if let Some(value) = values.next() {
        if !value.is_empty() {
            reading.sealed = Some(value == "1");
        }
    }

    reading
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_full_line() {
        let reading = parse_line("T:25.5,W:450,S:1");
        assert_eq!(reading.temperature, Some(25.5));
        assert_eq!(reading.weight, Some(450.0));
        assert_eq!(reading.sealed, Some(true));
    }

    #[test]
    fn tagged_subset_in_any_order() {
        let reading = parse_line("S:1,T:4.5");
        assert_eq!(reading.temperature, Some(4.5));
        assert_eq!(reading.weight, None);
        assert_eq!(reading.sealed, Some(true));
    }

    #[test]
    fn tagged_seal_zero_means_unsealed() {
        let reading = parse_line("S:0");
        assert_eq!(reading.sealed, Some(false));
    }

    #[test]
    fn tagged_unrecognized_tokens_are_skipped_individually() {
        let reading = parse_line("T:4.5,X:99,W:450");
        assert_eq!(reading.temperature, Some(4.5));
        assert_eq!(reading.weight, Some(450.0));
        assert_eq!(reading.sealed, None);
    }

    #[test]
    fn tagged_bad_number_drops_that_field_only() {
        let reading = parse_line("T:abc,W:450,S:1");
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.weight, Some(450.0));
        assert_eq!(reading.sealed, Some(true));
    }

    #[test]
    fn positional_full_line() {
        let reading = parse_line("4.5,450,1");
        assert_eq!(reading.temperature, Some(4.5));
        assert_eq!(reading.weight, Some(450.0));
        assert_eq!(reading.sealed, Some(true));
    }

    #[test]
    fn positional_empty_position_stays_absent() {
        let reading = parse_line("4.5,,1");
        assert_eq!(reading.temperature, Some(4.5));
        assert_eq!(reading.weight, None);
        assert_eq!(reading.sealed, Some(true));
    }

    #[test]
    fn positional_seal_anything_but_one_is_unsealed() {
        assert_eq!(parse_line("4.5,450,0").sealed, Some(false));
        assert_eq!(parse_line("4.5,450,yes").sealed, Some(false));
        assert_eq!(parse_line("4.5,450,").sealed, None);
    }

    #[test]
    fn positional_not_selected_when_any_tag_matches() {
        // One tagged token wins; remaining tokens go through the tagged path
        // and are ignored there.
        let reading = parse_line("W:450,7,1");
        assert_eq!(reading.weight, Some(450.0));
        assert_eq!(reading.temperature, None);
        assert_eq!(reading.sealed, None);
    }

    #[test]
    fn unmatched_line_yields_empty_reading() {
        let reading = parse_line("READY");
        assert!(reading.is_empty());
    }
}
