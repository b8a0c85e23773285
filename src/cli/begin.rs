use std::fmt::Display;

use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use chrono_english::parse_date_string;
use clap::{CommandFactory, Parser, ValueEnum};

use crate::{config::ProgramConfig, utils::time::beginning_of_day};

use super::Args;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

#[derive(Debug, Parser)]
pub struct BeginCommand {
    #[arg(
        long,
        short,
        help = "Moment day 1 starts. Examples are \"today\", \"tomorrow\", \"15/03/2025\", \"6:00 16/03/2025\". Defaults to the beginning of today"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, help = "Replace an already recorded start")]
    force: bool,
}

/// Records the program start into the application directory.
pub async fn process_begin_command(
    BeginCommand {
        date,
        date_style,
        force,
    }: BeginCommand,
    app_dir: &std::path::Path,
) -> Result<()> {
    let start = parse_start(date.as_deref(), date_style, Local::now())?;
    ProgramConfig { start }.save(app_dir, force).await?;
    println!(
        "Day 1 starts at {}",
        start.with_timezone(&Local).format("%x %H:%M")
    );
    Ok(())
}

fn parse_start(
    date: Option<&str>,
    date_style: DateStyle,
    now: DateTime<Local>,
) -> Result<DateTime<Utc>> {
    let Some(date) = date else {
        return Ok(beginning_of_day(now).with_timezone(&Utc));
    };
    match parse_date_string(date, now, date_style.into()) {
        Ok(v) => Ok(v.with_timezone(&Utc)),
        Err(e) => Err(Args::command()
            .error(
                clap::error::ErrorKind::ValueValidation,
                format!("Failed to validate start date {e}"),
            )
            .into()),
    }
}
