use ansi_term::{Colour, Style};

use crate::{
    schedule::{
        resolver::{ProgramState, Resolution},
        PROGRAM_DAYS,
    },
    tracker::DayView,
};

pub const SAVED_MESSAGE: &str = "Progress saved ✅";

pub fn render_day(view: &DayView) -> String {
    let mut output = Style::new()
        .bold()
        .paint(format!("Day {} Checklist", view.day))
        .to_string();
    output.push('\n');

    if !view.has_schedule {
        if let Some((placeholder, _)) = view.tasks.first() {
            output.push_str(placeholder);
            output.push('\n');
        }
        return output;
    }

    for (index, (task, completed)) in view.tasks.iter().enumerate() {
        let line = if *completed {
            Colour::Green
                .strikethrough()
                .paint(format!("[x] {index}: {task}"))
                .to_string()
        } else {
            format!("[ ] {index}: {task}")
        };
        output.push_str(&line);
        output.push('\n');
    }
    output
}

/// Renders whatever should be shown for a day that is not running.
pub fn render_inactive(resolution: &Resolution) -> Option<String> {
    match resolution.state {
        ProgramState::NotStarted(countdown) => Some(format!(
            "{}\nBootcamp starts in: {countdown}\n",
            Style::new().bold().paint("Countdown to Day 1")
        )),
        ProgramState::InProgress => None,
        ProgramState::Completed => Some(format!(
            "{}\nCongratulations! You finished the {PROGRAM_DAYS}-day bootcamp.\n",
            Style::new().bold().paint("Bootcamp Completed 🎉")
        )),
    }
}
