use std::fmt::Display;

use chrono::{DateTime, Duration, Utc};

use super::PROGRAM_DAYS;

const MS_PER_SECOND: i64 = 1000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
/// Days are a fixed 24 hours of elapsed time, so daylight saving shifts are not accounted for.
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until the program starts, split up for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub remaining: Duration,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Countdown {
    pub fn from_remaining(remaining: Duration) -> Self {
        let ms = remaining.num_milliseconds().max(0);
        Self {
            remaining,
            days: ms.div_euclid(MS_PER_DAY),
            hours: ms.div_euclid(MS_PER_HOUR) % 24,
            minutes: ms.div_euclid(MS_PER_MINUTE) % 60,
            seconds: ms.div_euclid(MS_PER_SECOND) % 60,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    NotStarted(Countdown),
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub day_index: i64,
    pub state: ProgramState,
}

impl Resolution {
    /// The day to render, present only while the program is running.
    pub fn active_day(&self) -> Option<i64> {
        match self.state {
            ProgramState::InProgress => Some(self.day_index),
            _ => None,
        }
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

impl Display for Resolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.state {
            ProgramState::NotStarted(countdown) => write!(f, "Bootcamp starts in: {countdown}"),
            ProgramState::InProgress => write!(f, "Day {} of {PROGRAM_DAYS}", self.day_index),
            ProgramState::Completed => write!(f, "Bootcamp Completed 🎉"),
        }
    }
}

/// Computes which day of the program `now` falls into.
///
/// The day index is `floor((now - start) / 24h) + 1`, which makes `start` itself day 1 and any
/// instant before it day 0 or less. Both instants are floored to whole milliseconds first, so
/// anything before `start` is never counted as day 1.
pub fn resolve_day(now: DateTime<Utc>, start: DateTime<Utc>) -> Resolution {
    let elapsed_ms = now.timestamp_millis() - start.timestamp_millis();
    let day_index = elapsed_ms.div_euclid(MS_PER_DAY) + 1;

    let state = if day_index < 1 {
        ProgramState::NotStarted(Countdown::from_remaining(Duration::milliseconds(-elapsed_ms)))
    } else if day_index <= PROGRAM_DAYS {
        ProgramState::InProgress
    } else {
        ProgramState::Completed
    };

    Resolution { day_index, state }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

    use super::{resolve_day, Countdown, ProgramState};

    fn start() -> DateTime<Utc> {
        Utc.from_utc_datetime(
            &NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_start_instant_is_day_one() {
        let resolution = resolve_day(start(), start());
        assert_eq!(resolution.day_index, 1);
        assert_eq!(resolution.state, ProgramState::InProgress);
        assert_eq!(resolution.active_day(), Some(1));
    }

    #[test]
    fn test_last_moment_of_day_one() {
        let now = start() + Duration::days(1) - Duration::milliseconds(1);
        assert_eq!(resolve_day(now, start()).day_index, 1);
        assert_eq!(resolve_day(now + Duration::milliseconds(1), start()).day_index, 2);
    }

    #[test]
    fn test_ninety_full_days_is_completed() {
        let resolution = resolve_day(start() + Duration::days(90), start());
        assert_eq!(resolution.day_index, 91);
        assert_eq!(resolution.state, ProgramState::Completed);
        assert_eq!(resolution.active_day(), None);

        let last = resolve_day(start() + Duration::days(90) - Duration::seconds(1), start());
        assert_eq!(last.day_index, 90);
        assert_eq!(last.state, ProgramState::InProgress);
    }

    #[test]
    fn test_before_start_counts_down() {
        let now = start() - Duration::milliseconds(1);
        let resolution = resolve_day(now, start());
        assert_eq!(resolution.day_index, 0);
        let ProgramState::NotStarted(countdown) = resolution.state else {
            panic!("expected countdown, got {:?}", resolution.state);
        };
        assert_eq!(countdown.remaining, Duration::milliseconds(1));
    }

    #[test]
    fn test_sub_millisecond_before_start_is_not_started() {
        let now = start() - Duration::nanoseconds(500_000);
        let resolution = resolve_day(now, start());
        assert_eq!(resolution.day_index, 0);
        let ProgramState::NotStarted(countdown) = resolution.state else {
            panic!("expected countdown, got {:?}", resolution.state);
        };
        assert_eq!(countdown.remaining, Duration::milliseconds(1));

        let just_after = start() + Duration::nanoseconds(500_000);
        assert_eq!(resolve_day(just_after, start()).state, ProgramState::InProgress);
    }

    #[test]
    fn test_countdown_strictly_decreases() {
        let mut previous = None;
        for offset in (1..=72).rev() {
            let now = start() - Duration::minutes(offset * 37);
            let ProgramState::NotStarted(countdown) = resolve_day(now, start()).state else {
                panic!("program should not have started");
            };
            assert!(countdown.remaining > Duration::zero());
            if let Some(previous) = previous {
                assert!(countdown.remaining < previous);
            }
            previous = Some(countdown.remaining);
        }
    }

    #[test]
    fn test_countdown_decomposition() {
        let remaining = Duration::days(2)
            + Duration::hours(3)
            + Duration::minutes(4)
            + Duration::seconds(5)
            + Duration::milliseconds(600);
        let countdown = Countdown::from_remaining(remaining);
        assert_eq!(
            (countdown.days, countdown.hours, countdown.minutes, countdown.seconds),
            (2, 3, 4, 5)
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(resolve_day(start() + Duration::days(4), start()).to_string(), "Day 5 of 90");
        assert_eq!(
            resolve_day(start() + Duration::days(90), start()).to_string(),
            "Bootcamp Completed 🎉"
        );
        let now = start() - Duration::hours(25) - Duration::seconds(3);
        assert_eq!(
            resolve_day(now, start()).to_string(),
            "Bootcamp starts in: 1d 1h 0m 3s"
        );
    }

    #[test]
    fn test_far_before_start_has_negative_index() {
        let resolution = resolve_day(start() - Duration::days(10), start());
        assert_eq!(resolution.day_index, -9);
        assert!(matches!(resolution.state, ProgramState::NotStarted(_)));
    }
}
