
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};

/// Local time of day the progress of the current day is exported at.
pub const AUTO_EXPORT_TIME: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 0) {
    Some(time) => time,
    None => NaiveTime::MIN,
};

/// Resolves a wall clock time on `date` in `tz`. Times skipped by a transition are taken as UTC.
pub fn at_time<Tz: TimeZone>(tz: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let naive = date.and_time(time);
    tz.from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

pub fn beginning_of_day<Tz: TimeZone>(date: DateTime<Tz>) -> DateTime<Tz> {
    at_time(&date.timezone(), date.date_naive(), NaiveTime::MIN)
}

/// Returns start of the next day.
pub fn next_day_start<Tz: TimeZone>(date: DateTime<Tz>) -> DateTime<Tz> {
    let tomorrow = (date.clone() + Duration::days(1)).date_naive();
    at_time(&date.timezone(), tomorrow, NaiveTime::MIN)
}

/// Returns the next auto export moment that is strictly after `date`.
pub fn next_auto_export<Tz: TimeZone>(date: DateTime<Tz>) -> DateTime<Tz> {
    let today = at_time(&date.timezone(), date.date_naive(), AUTO_EXPORT_TIME);
    if today > date {
        today
    } else {
        let tomorrow = (date.clone() + Duration::days(1)).date_naive();
        at_time(&date.timezone(), tomorrow, AUTO_EXPORT_TIME)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Utc};

    use super::{beginning_of_day, next_auto_export, next_day_start};

    #[test]
    fn test_next_day_start() {
        let now = Utc.with_ymd_and_hms(2024, 2, 28, 13, 5, 0).unwrap();
        assert_eq!(
            next_day_start(now),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );

        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        assert_eq!(
            next_day_start(midnight),
            Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_next_day_start_uses_local_midnight() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(
            next_day_start(now),
            tz.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_auto_export_same_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 8, 0, 0).unwrap();
        assert_eq!(
            next_auto_export(now),
            Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 0).unwrap()
        );
    }

    #[test]
    fn test_auto_export_rearms_for_tomorrow() {
        let exact = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 0).unwrap();
        assert_eq!(
            next_auto_export(exact),
            Utc.with_ymd_and_hms(2024, 1, 6, 23, 59, 0).unwrap()
        );

        let late = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 30).unwrap();
        assert_eq!(
            next_auto_export(late),
            Utc.with_ymd_and_hms(2024, 1, 6, 23, 59, 0).unwrap()
        );
    }

    #[test]
    fn test_beginning_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 5, 17, 42, 11).unwrap();
        assert_eq!(
            beginning_of_day(now),
            Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap()
        );
    }
}
