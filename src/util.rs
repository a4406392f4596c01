//! Small shared helpers with no better home.

use chrono::NaiveDate;

/// Wire format for dates exchanged with the backend.
pub const WIRE_DATE_FMT: &str = "%Y-%m-%d";
/// Display format for dates shown in the UI.
pub const DISPLAY_DATE_FMT: &str = "%d/%m/%Y";

/// Format a date for display (DD/MM/YYYY).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FMT).to_string()
}

/// What: Parse a user-typed date accepting both display and wire formats.
///
/// Inputs:
/// - `text`: Raw input, `DD/MM/YYYY` or `YYYY-MM-DD`
///
/// Output:
/// - `Some(NaiveDate)` when either format parses, `None` otherwise
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let t = text.trim();
    NaiveDate::parse_from_str(t, DISPLAY_DATE_FMT)
        .or_else(|_| NaiveDate::parse_from_str(t, WIRE_DATE_FMT))
        .ok()
}

/// Current calendar year, used as the default school year in forms.
pub fn current_year() -> i32 {
    use chrono::Datelike;
    chrono::Local::now().year()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Dates parse in both accepted formats and round-trip to display
    ///
    /// - Input: `2010-05-03` and `03/05/2010`
    /// - Output: Same date; display form `03/05/2010`
    fn date_parses_both_formats() {
        let wire = parse_date("2010-05-03").unwrap();
        let display = parse_date("03/05/2010").unwrap();
        assert_eq!(wire, display);
        assert_eq!(format_date(wire), "03/05/2010");
        assert!(parse_date("not a date").is_none());
    }
}
