//! Shared utility functions for CSES crates.

/// Date utility functions
pub mod dates {
    use chrono::NaiveDate;

    /// ISO date format used for object-store timestamps and feature properties.
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Date format submitted by the web date pickers: "mm-dd-yyyy".
    pub const PICKER_FORMAT: &str = "%m-%d-%Y";

    /// Earliest date the pickers offer.
    pub const PICKER_MIN: &str = "01-01-1980";

    /// Latest date the pickers offer.
    pub const PICKER_MAX: &str = "12-30-2020";

    /// Initial start date shown by the start picker.
    pub const PICKER_INITIAL_START: &str = "01-01-2019";

    /// Initial end date shown by the end picker.
    pub const PICKER_INITIAL_END: &str = "06-11-2019";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// Parse a picker date in "mm-dd-yyyy" format
    pub fn parse_picker_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), PICKER_FORMAT)?)
    }

    /// Parse either a picker date or an ISO date.
    ///
    /// Feature properties carry ISO dates once the station layer has
    /// stamped them, while raw requests carry picker dates.
    pub fn parse_request_date(s: &str) -> anyhow::Result<NaiveDate> {
        let value = super::request::first_value(s);
        parse_picker_date(value).or_else(|_| {
            parse_date(value).map_err(|_| {
                anyhow::anyhow!("expected mm-dd-yyyy or yyyy-mm-dd, got '{}'", value)
            })
        })
    }

    /// Parse the date part of a timestamp cell, ignoring any time of day.
    ///
    /// Accepts "2019-01-01", "2019-01-01 00:00:00" and "2019-01-01T00:00:00".
    pub fn parse_timestamp_date(s: &str) -> anyhow::Result<NaiveDate> {
        let trimmed = s.trim();
        let day = trimmed
            .split(|c: char| c == ' ' || c == 'T')
            .next()
            .unwrap_or(trimmed);
        parse_date(day)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_and_parse() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
            let formatted = format_date(&date);
            assert_eq!(formatted, "2023-06-15");
            let parsed = parse_date(&formatted).unwrap();
            assert_eq!(parsed, date);
        }

        #[test]
        fn test_parse_picker_date() {
            let date = parse_picker_date("06-11-2019").unwrap();
            assert_eq!(date, NaiveDate::from_ymd_opt(2019, 6, 11).unwrap());
            assert!(parse_picker_date("2019-06-11").is_err());
        }

        #[test]
        fn test_parse_request_date_accepts_both_forms() {
            let expected = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
            assert_eq!(parse_request_date("01-01-2019").unwrap(), expected);
            assert_eq!(parse_request_date("2019-01-01").unwrap(), expected);
            assert_eq!(parse_request_date("[01-01-2019]").unwrap(), expected);
            assert!(parse_request_date("January 1st").is_err());
            assert!(parse_request_date("").is_err());
        }

        #[test]
        fn test_parse_timestamp_date() {
            let expected = NaiveDate::from_ymd_opt(2020, 1, 4).unwrap();
            assert_eq!(parse_timestamp_date("2020-01-04").unwrap(), expected);
            assert_eq!(parse_timestamp_date("2020-01-04 00:00:00").unwrap(), expected);
            assert_eq!(parse_timestamp_date("2020-01-04T12:00:00").unwrap(), expected);
            assert!(parse_timestamp_date("04/01/2020").is_err());
        }

        #[test]
        fn test_picker_bounds_parse() {
            let min = parse_picker_date(PICKER_MIN).unwrap();
            let max = parse_picker_date(PICKER_MAX).unwrap();
            let start = parse_picker_date(PICKER_INITIAL_START).unwrap();
            let end = parse_picker_date(PICKER_INITIAL_END).unwrap();
            assert!(min < start && start < end && end < max);
        }
    }
}

/// Helpers for raw request values handed over by the web layer.
pub mod request {
    /// Unwrap a request value that may arrive list-wrapped.
    ///
    /// Select inputs and pickers submit values such as `[01-01-2019]` or
    /// `['AL', 'GA']`; only the first entry is used.
    pub fn first_value(raw: &str) -> &str {
        raw.trim()
            .trim_matches(|c: char| c == '[' || c == ']')
            .split(", ")
            .next()
            .unwrap_or("")
            .trim()
            .trim_matches(|c: char| c == '\'' || c == '"')
    }

    /// Like [`first_value`], but `None` for absent or blank values.
    pub fn non_empty(raw: Option<&str>) -> Option<&str> {
        raw.map(first_value).filter(|v| !v.is_empty())
    }

}
