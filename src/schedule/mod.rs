//! The fixed 90-day plan. Every day belongs to exactly one [Phase] and all days of a phase share
//! the same ordered task list.

pub mod resolver;

use std::collections::HashMap;

/// Number of days in the program. Days are numbered from 1.
pub const PROGRAM_DAYS: i64 = 90;

/// Shown in place of tasks for days outside of the program.
pub const NO_TASKS_PLACEHOLDER: &str = "No tasks defined for today.";

const NO_TASKS: &[&str] = &[NO_TASKS_PLACEHOLDER];

/// A contiguous range of days sharing one task template. Bounds are inclusive.
#[derive(Debug, PartialEq, Eq)]
pub struct Phase {
    pub number: u8,
    pub first_day: i64,
    pub last_day: i64,
    pub tasks: &'static [&'static str],
}

impl Phase {
    pub fn contains(&self, day: i64) -> bool {
        self.first_day <= day && day <= self.last_day
    }
}

pub static PHASES: [Phase; 4] = [
    Phase {
        number: 1,
        first_day: 1,
        last_day: 15,
        tasks: &[
            "6:00 AM - 7:00 AM: Wake up & morning routine",
            "7:00 AM - 8:00 AM: Workout",
            "8:00 AM - 12:00 PM: College",
            "3:00 PM - 5:00 PM: LeetCode - 2 problems",
            "6:00 PM - 6:30 PM: Reflection / journaling",
        ],
    },
    Phase {
        number: 2,
        first_day: 16,
        last_day: 45,
        tasks: &[
            "5:45 AM - 6:30 AM: Wake up & meditation",
            "6:30 AM - 7:30 AM: Cardio / strength",
            "8:00 AM - 12:00 PM: College",
            "3:00 PM - 6:00 PM: LeetCode - 3 problems",
            "6:30 PM - 7:00 PM: Reflection / journaling",
        ],
    },
    Phase {
        number: 3,
        first_day: 46,
        last_day: 75,
        tasks: &[
            "5:30 AM - 6:15 AM: Wake up & meditation",
            "6:15 AM - 7:30 AM: Intense workout (strength + cardio)",
            "8:00 AM - 12:00 PM: College",
            "3:00 PM - 6:00 PM: LeetCode - 3 problems (medium)",
            "6:30 PM - 7:00 PM: Reflection / journaling",
        ],
    },
    Phase {
        number: 4,
        first_day: 76,
        last_day: 90,
        tasks: &[
            "5:30 AM - 6:00 AM: Wake up & meditation",
            "6:00 AM - 7:30 AM: Full-body workout + cardio",
            "8:00 AM - 12:00 PM: College",
            "3:00 PM - 6:00 PM: LeetCode - 3–4 problems (medium/hard)",
            "6:30 PM - 7:00 PM: Evening reflection",
        ],
    },
];

/// Lookup from day to the tasks planned for it. Built once and never modified afterwards.
#[derive(Debug, Clone)]
pub struct ScheduleTable {
    days: HashMap<i64, &'static Phase>,
}

impl Default for ScheduleTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleTable {
    pub fn new() -> Self {
        let mut days = HashMap::new();
        for phase in PHASES.iter() {
            for day in phase.first_day..=phase.last_day {
                days.insert(day, phase);
            }
        }
        Self { days }
    }

    /// Returns tasks for `day`. Days without a plan get a single placeholder entry.
    pub fn get_tasks(&self, day: i64) -> &'static [&'static str] {
        self.phase_for(day).map_or(NO_TASKS, |phase| phase.tasks)
    }

    pub fn phase_for(&self, day: i64) -> Option<&'static Phase> {
        self.days.get(&day).copied()
    }

    pub fn has_schedule(&self, day: i64) -> bool {
        self.days.contains_key(&day)
    }
}
