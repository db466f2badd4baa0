use chrono::{DateTime, Datelike, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

const INDIAN_DATE_FORMAT: &str = "%d/%m/%Y";
const INDIAN_DATE_LENGTH: usize = 10;
const MAX_DATE_DIGITS: usize = 8;
const FIRST_VALID_YEAR: i32 = 1900;

/// Formats tried, in order, when a date does not come as `DD/MM/YYYY`.
const GENERIC_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];
const GENERIC_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

static INDIAN_DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{2})/([0-9]{2})/([0-9]{4})$").unwrap());

/// Feedback given on a date while it is being typed.
/// It stays neutral until the date is complete.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DateInputFeedback {
    Valid,
    Invalid,
    Neutral,
}

/// Render a date as `DD/MM/YYYY`.
///
/// Dates already written that way are returned as is.
/// Anything that can't be read as a date is returned unchanged,
/// as backends sometimes send formats nobody expected.
pub fn to_indian_format(input: &str) -> String {
    if input.is_empty() || INDIAN_DATE_PATTERN.is_match(input) {
        return input.to_owned();
    }

    match parse_generic_date(input) {
        Some(date) => date.format(INDIAN_DATE_FORMAT).to_string(),
        None => input.to_owned(),
    }
}

fn parse_generic_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();
    GENERIC_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
        .or_else(|| {
            GENERIC_DATE_TIME_FORMATS.iter().find_map(|format| {
                NaiveDateTime::parse_from_str(input, format)
                    .ok()
                    .map(|date_time| date_time.date())
            })
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|date_time| date_time.date_naive())
        })
        .or_else(|| {
            DateTime::parse_from_rfc2822(input)
                .ok()
                .map(|date_time| date_time.date_naive())
        })
}

/// Turn a `DD/MM/YYYY` date into the `YYYY-MM-DD` form the backend expects.
/// Parts are moved around positionally: nothing is validated here.
pub fn to_backend_format(input: &str) -> String {
    match input.split('/').collect::<Vec<_>>().as_slice() {
        [day, month, year] => format!("{year}-{month}-{day}"),
        _ => input.to_owned(),
    }
}

/// Whether the input is a real calendar date written as `DD/MM/YYYY`,
/// between 1900 and the current year.
pub fn is_valid_indian_date(input: &str) -> bool {
    is_valid_indian_date_until(input, Local::now().year())
}

fn is_valid_indian_date_until(input: &str, last_valid_year: i32) -> bool {
    let Some(captures) = INDIAN_DATE_PATTERN.captures(input) else {
        return false;
    };
    let (Ok(day), Ok(month), Ok(year)) = (
        captures[1].parse::<u32>(),
        captures[2].parse::<u32>(),
        captures[3].parse::<i32>(),
    ) else {
        return false;
    };

    if !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
        || !(FIRST_VALID_YEAR..=last_valid_year).contains(&year)
    {
        return false;
    }

    NaiveDate::from_ymd_opt(year, month, day).is_some()
}

/// Mask the digits typed so far as `DD/MM/YYYY`.
/// Separators only appear once a digit follows them, and extra digits are dropped.
pub fn format_as_user_types(raw_digits: &str) -> String {
    let mut formatted = String::with_capacity(INDIAN_DATE_LENGTH);
    raw_digits
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DATE_DIGITS)
        .enumerate()
        .for_each(|(index, digit)| {
            if index == 2 || index == 4 {
                formatted.push('/');
            }
            formatted.push(digit);
        });

    formatted
}

pub fn date_input_feedback(formatted: &str) -> DateInputFeedback {
    if formatted.len() != INDIAN_DATE_LENGTH {
        DateInputFeedback::Neutral
    } else if is_valid_indian_date(formatted) {
        DateInputFeedback::Valid
    } else {
        DateInputFeedback::Invalid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parameterized::{ide, parameterized};

    ide!();

    // region to_indian_format
    #[parameterized(
        input = {
            "2020-02-29",
            "29/02/2020",
            "1990/08/15",
            "1990-08-15T10:30:00",
            "1990-08-15 23:59:59.123",
            "1990-08-15T23:30:00+05:30",
            "Wed, 15 Aug 1990 10:00:00 +0000",
            "5 August 1990",
            "Aug 5, 1990",
            "1990-08-15T10:30",
            "1990-08-15 10:30",
            "Aug 15 1990",
        },
        expected = {
            "29/02/2020",
            "29/02/2020",
            "15/08/1990",
            "15/08/1990",
            "15/08/1990",
            "15/08/1990",
            "15/08/1990",
            "05/08/1990",
            "05/08/1990",
            "15/08/1990",
            "15/08/1990",
            "15/08/1990",
        }
    )]
    fn should_convert_to_indian_format(input: &str, expected: &str) {
        assert_eq!(expected, to_indian_format(input));
    }

    #[parameterized(input = {"", "not a date", "2020-13-45", "32/13/2020x"})]
    fn should_return_input_when_not_a_date(input: &str) {
        assert_eq!(input, to_indian_format(input));
    }

    #[test]
    fn should_keep_unvalidated_indian_pattern() {
        assert_eq!("31/02/2020", to_indian_format("31/02/2020"));
    }
    // endregion

    // region to_backend_format
    #[parameterized(
        input = {"29/02/2020", "15/08/1990", "99/99/9999", "", "2020-02-29", "1/2"},
        expected = {"2020-02-29", "1990-08-15", "9999-99-99", "", "2020-02-29", "1/2"}
    )]
    fn should_convert_to_backend_format(input: &str, expected: &str) {
        assert_eq!(expected, to_backend_format(input));
    }

    #[parameterized(date = {"29/02/2020", "15/08/1990", "01/01/1900", "31/12/1999"})]
    fn should_come_back_to_indian_format(date: &str) {
        assert!(is_valid_indian_date(date));
        assert_eq!(date, to_indian_format(&to_backend_format(date)));
    }
    // endregion

    // region is_valid_indian_date
    #[parameterized(
        input = {
            "29/02/2020",
            "15/08/1990",
            "01/01/1900",
            "29/02/2021",
            "31/04/2021",
            "31/02/2020",
            "00/01/2000",
            "32/01/2000",
            "01/00/2000",
            "01/13/2000",
            "31/12/1899",
            "1/1/2000",
            "2000-01-01",
            "01/01/2000 ",
            "",
        },
        expected = {
            true,
            true,
            true,
            false,
            false,
            false,
            false,
            false,
            false,
            false,
            false,
            false,
            false,
            false,
            false,
        }
    )]
    fn should_validate_indian_date(input: &str, expected: bool) {
        assert_eq!(expected, is_valid_indian_date(input));
    }

    #[test]
    fn should_reject_dates_after_current_year() {
        let current_year = Local::now().year();
        assert!(is_valid_indian_date(&format!("01/01/{current_year}")));
        assert!(!is_valid_indian_date(&format!(
            "01/01/{}",
            current_year + 1
        )));
    }

    #[test]
    fn should_use_given_last_valid_year() {
        assert!(is_valid_indian_date_until("31/12/2025", 2025));
        assert!(!is_valid_indian_date_until("01/01/2026", 2025));
    }

    #[test]
    fn should_reject_non_ascii_digits() {
        assert!(!is_valid_indian_date("१५/०८/१९९०"));
    }
    // endregion

    // region format_as_user_types
    #[parameterized(
        input = {"", "2", "29", "290", "2902", "29022", "29022020", "290220201234", "29/02/20", "2a9b0c2"},
        expected = {"", "2", "29", "29/0", "29/02", "29/02/2", "29/02/2020", "29/02/2020", "29/02/20", "29/02"}
    )]
    fn should_format_as_user_types(input: &str, expected: &str) {
        assert_eq!(expected, format_as_user_types(input));
    }
    // endregion

    // region date_input_feedback
    #[parameterized(
        input = {"", "29/02", "29/02/2020", "29/02/2021", "99/99/9999"},
        expected = {
            DateInputFeedback::Neutral,
            DateInputFeedback::Neutral,
            DateInputFeedback::Valid,
            DateInputFeedback::Invalid,
            DateInputFeedback::Invalid,
        }
    )]
    fn should_give_date_input_feedback(input: &str, expected: DateInputFeedback) {
        assert_eq!(expected, date_input_feedback(input));
    }
    // endregion
}
