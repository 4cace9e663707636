use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Converts a record timestamp to its calendar day.
///
/// This is the single source of truth for deriving a report date from a
/// timestamp. Use this whenever you need the "business date" of a record;
/// the source data carries wall-clock instants with no timezone, so the
/// day is a plain truncation.
pub fn calendar_day(timestamp: NaiveDateTime) -> NaiveDate {
    timestamp.date()
}

/// Converts a timestamp to a calendar day after shifting it back by the
/// given number of days.
///
/// Some advertisers report events with a fixed lag; their timestamps must be
/// shifted before date attribution so the event lands on the day the traffic
/// actually occurred.
pub fn shifted_calendar_day(timestamp: NaiveDateTime, shift_days: i64) -> NaiveDate {
    calendar_day(timestamp - Duration::days(shift_days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(date: (i32, u32, u32), time: (u32, u32, u32)) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(date.0, date.1, date.2)
            .unwrap()
            .and_hms_opt(time.0, time.1, time.2)
            .unwrap()
    }

    #[test]
    fn test_calendar_day_truncates_time() {
        let stamp = ts((2024, 3, 15), (23, 59, 59));
        assert_eq!(
            calendar_day(stamp),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
        );
    }

    #[test]
    fn test_shifted_day_crosses_month_boundary() {
        let stamp = ts((2024, 3, 1), (0, 30, 0));
        assert_eq!(
            shifted_calendar_day(stamp, 1),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }
}
