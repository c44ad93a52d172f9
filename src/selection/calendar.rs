//! Calendar-date comparisons in a fixed UTC offset

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};

/// Calendar in which "same day", "same month" and friends are judged
#[derive(Debug, Clone, Copy)]
pub struct Calendar {
    offset: FixedOffset,
}

impl Calendar {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    pub fn same_day(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local(a).date_naive() == self.local(b).date_naive()
    }

    pub fn same_weekday(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local(a).weekday() == self.local(b).weekday()
    }

    pub fn same_day_of_month(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local(a).day() == self.local(b).day()
    }

    /// Same month and day-of-month, any year
    pub fn same_anniversary(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        let (a, b) = (self.local(a), self.local(b));
        a.month() == b.month() && a.day() == b.day()
    }

    /// Same calendar month of the same year
    pub fn same_month(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        let (a, b) = (self.local(a), self.local(b));
        a.year() == b.year() && a.month() == b.month()
    }

    pub fn same_year(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        self.local(a).year() == self.local(b).year()
    }

    /// Less than seven days apart and on the same weekday
    pub fn same_week(&self, a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
        (a - b).abs() < Duration::days(7) && self.same_weekday(a, b)
    }

    /// Parse a client-supplied timestamp.
    ///
    /// RFC 3339 values carry their own offset; naive date-times are read in
    /// this calendar's offset. A bare `YYYY-MM-DD` is midnight UTC.
    pub fn parse_timestamp(&self, raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return self
                .offset
                .from_local_datetime(&naive)
                .single()
                .map(|dt| dt.with_timezone(&Utc));
        }

        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_same_day_is_calendar_not_rolling() {
        let cal = Calendar::utc();
        assert!(cal.same_day(at("2024-03-10T00:00:00Z"), at("2024-03-10T23:59:59Z")));
        // Two minutes apart but across midnight
        assert!(!cal.same_day(at("2024-03-10T23:59:00Z"), at("2024-03-11T00:01:00Z")));
    }

    #[test]
    fn test_offset_moves_day_boundary() {
        let east = Calendar::new(FixedOffset::east_opt(2 * 3600).unwrap());
        // 23:30 UTC on the 10th is 01:30 on the 11th at +02:00
        assert!(east.same_day(at("2024-03-10T23:30:00Z"), at("2024-03-11T08:00:00Z")));
        assert!(!Calendar::utc().same_day(at("2024-03-10T23:30:00Z"), at("2024-03-11T08:00:00Z")));
    }

    #[test]
    fn test_weekday_and_month_helpers() {
        let cal = Calendar::utc();
        // 2024-03-04 and 2024-03-11 are both Mondays
        assert!(cal.same_weekday(at("2024-03-04T10:00:00Z"), at("2024-03-11T18:00:00Z")));
        assert!(cal.same_day_of_month(at("2024-01-15T10:00:00Z"), at("2024-06-15T01:00:00Z")));
        assert!(cal.same_anniversary(at("2020-07-04T10:00:00Z"), at("2024-07-04T01:00:00Z")));
        assert!(!cal.same_anniversary(at("2020-07-04T10:00:00Z"), at("2024-08-04T01:00:00Z")));
        assert!(cal.same_month(at("2024-02-01T00:00:00Z"), at("2024-02-29T23:00:00Z")));
        assert!(!cal.same_month(at("2023-02-01T00:00:00Z"), at("2024-02-01T00:00:00Z")));
        assert!(cal.same_year(at("2024-01-01T00:00:00Z"), at("2024-12-31T23:59:59Z")));
    }

    #[test]
    fn test_same_week_needs_recency_and_weekday() {
        let cal = Calendar::utc();
        let now = at("2024-03-11T12:00:00Z");
        assert!(cal.same_week(at("2024-03-11T01:00:00Z"), now));
        // Same weekday exactly a week earlier is not within seven days
        assert!(!cal.same_week(at("2024-03-04T12:00:00Z"), now));
        // Recent but a different weekday
        assert!(!cal.same_week(at("2024-03-10T12:00:00Z"), now));
    }

    #[test]
    fn test_parse_timestamp() {
        let cal = Calendar::utc();
        assert_eq!(
            cal.parse_timestamp("2024-03-11T12:00:00.000Z"),
            Some(at("2024-03-11T12:00:00Z"))
        );
        assert_eq!(
            cal.parse_timestamp("2024-03-11T12:00:00+02:00"),
            Some(at("2024-03-11T10:00:00Z"))
        );
        assert_eq!(
            cal.parse_timestamp("2024-03-11T12:00:00"),
            Some(at("2024-03-11T12:00:00Z"))
        );
        assert_eq!(cal.parse_timestamp("yesterday"), None);
    }

    #[test]
    fn test_parse_date_only_is_utc_midnight() {
        let expected = Some(at("2024-03-11T00:00:00Z"));
        assert_eq!(Calendar::utc().parse_timestamp("2024-03-11"), expected);

        let east = Calendar::new(FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(east.parse_timestamp(" 2024-03-11 "), expected);
        assert_eq!(east.parse_timestamp("2024-13-01"), None);
    }
}
