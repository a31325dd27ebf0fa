use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("time slot '{0}' is missing an AM/PM marker")]
    MissingMeridiem(String),

    #[error("time slot '{0}' is missing the hh:mm separator")]
    MissingColon(String),

    #[error("time slot '{0}' has a non-numeric hour or minute")]
    NotNumeric(String),

    #[error("time slot '{0}' has an hour outside 1-12")]
    HourOutOfRange(String),

    #[error("time slot '{0}' has a minute outside 0-59")]
    MinuteOutOfRange(String),
}

/// Parses a 12-hour display slot such as "09:00 AM" into minutes since
/// midnight. The meridiem may be concatenated directly after the time
/// ("09:00AM"), which some front-desk forms produce.
///
/// Malformed input is always an error. Silently defaulting an unparseable
/// slot has previously produced wrong queue ordering, so callers must
/// propagate this instead of substituting a value.
pub fn parse_clock_time(input: &str) -> Result<u32, TimeParseError> {
    let upper = input.trim().to_ascii_uppercase();

    let (clock, is_pm) = if let Some(rest) = upper.strip_suffix("AM") {
        (rest.trim_end(), false)
    } else if let Some(rest) = upper.strip_suffix("PM") {
        (rest.trim_end(), true)
    } else {
        return Err(TimeParseError::MissingMeridiem(input.to_string()));
    };

    let (hour_part, minute_part) = clock
        .split_once(':')
        .ok_or_else(|| TimeParseError::MissingColon(input.to_string()))?;

    let hour: u32 = hour_part
        .trim()
        .parse()
        .map_err(|_| TimeParseError::NotNumeric(input.to_string()))?;
    let minute: u32 = minute_part
        .trim()
        .parse()
        .map_err(|_| TimeParseError::NotNumeric(input.to_string()))?;

    if hour == 0 || hour > 12 {
        return Err(TimeParseError::HourOutOfRange(input.to_string()));
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteOutOfRange(input.to_string()));
    }

    let hour24 = match (is_pm, hour) {
        (true, 12) => 12,
        (true, h) => h + 12,
        (false, 12) => 0,
        (false, h) => h,
    };

    Ok(hour24 * 60 + minute)
}

/// Formats an estimated wait for display.
///
/// Waits up to an hour are shown in whole minutes; anything longer
/// collapses to hours and minutes with the minutes part omitted when zero.
pub fn format_wait_time(minutes: i64) -> String {
    if minutes <= 0 {
        return "Your turn now".to_string();
    }
    if minutes <= 60 {
        return format!("{} minutes", minutes);
    }

    let hours = minutes / 60;
    let rem = minutes % 60;
    if rem == 0 {
        format!("{}h", hours)
    } else {
        format!("{}h {}m", hours, rem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn parses_morning_slot() {
        assert_eq!(parse_clock_time("09:00 AM"), Ok(540));
    }

    #[test]
    fn parses_noon_and_midnight_edges() {
        assert_eq!(parse_clock_time("12:00 PM"), Ok(720));
        assert_eq!(parse_clock_time("12:30 AM"), Ok(30));
    }

    #[test]
    fn parses_concatenated_meridiem() {
        assert_eq!(parse_clock_time("09:00AM"), Ok(540));
        assert_eq!(parse_clock_time("02:15pm"), Ok(14 * 60 + 15));
    }

    #[test]
    fn parses_afternoon_slot() {
        assert_eq!(parse_clock_time("11:45 PM"), Ok(23 * 60 + 45));
    }

    #[test]
    fn rejects_missing_meridiem() {
        assert_matches!(
            parse_clock_time("09:00"),
            Err(TimeParseError::MissingMeridiem(_))
        );
    }

    #[test]
    fn rejects_missing_colon() {
        assert_matches!(
            parse_clock_time("0900 AM"),
            Err(TimeParseError::MissingColon(_))
        );
    }

    #[test]
    fn rejects_non_numeric_parts() {
        assert_matches!(
            parse_clock_time("ab:00 AM"),
            Err(TimeParseError::NotNumeric(_))
        );
        assert_matches!(
            parse_clock_time("09:xx PM"),
            Err(TimeParseError::NotNumeric(_))
        );
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert_matches!(
            parse_clock_time("13:00 PM"),
            Err(TimeParseError::HourOutOfRange(_))
        );
        assert_matches!(
            parse_clock_time("00:30 AM"),
            Err(TimeParseError::HourOutOfRange(_))
        );
        assert_matches!(
            parse_clock_time("09:60 AM"),
            Err(TimeParseError::MinuteOutOfRange(_))
        );
    }

    #[test]
    fn formats_zero_and_negative_as_now() {
        assert_eq!(format_wait_time(0), "Your turn now");
        assert_eq!(format_wait_time(-5), "Your turn now");
    }

    #[test]
    fn formats_short_waits_exactly() {
        assert_eq!(format_wait_time(20), "20 minutes");
        assert_eq!(format_wait_time(30), "30 minutes");
    }

    #[test]
    fn formats_mid_waits_in_minutes() {
        assert_eq!(format_wait_time(40), "40 minutes");
        assert_eq!(format_wait_time(45), "45 minutes");
        assert_eq!(format_wait_time(60), "60 minutes");
    }

    #[test]
    fn formats_long_waits_as_hours() {
        assert_eq!(format_wait_time(90), "1h 30m");
        assert_eq!(format_wait_time(120), "2h");
        assert_eq!(format_wait_time(61), "1h 1m");
    }
}
