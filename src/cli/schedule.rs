use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::{Client, HttpBackend};
use crate::config::OutputFormat;
use crate::models::{Schedule, ScheduleChanges, ScheduleType};

#[derive(Subcommand, Debug)]
pub enum ScheduleCommand {
    /// Add a new schedule
    New(NewScheduleArgs),

    /// Update a schedule
    Update {
        /// Schedule ID
        #[arg(long)]
        schedule_id: i64,

        #[command(flatten)]
        changes: ScheduleChangeArgs,
    },

    /// Delete a schedule
    Delete {
        /// Schedule ID
        #[arg(long)]
        schedule_id: i64,
    },

    /// Show a schedule
    Info {
        /// Schedule ID
        #[arg(long)]
        schedule_id: i64,
    },
}

#[derive(Args, Debug)]
pub struct NewScheduleArgs {
    /// Schedule name shown in the control panel
    #[arg(long)]
    pub name: String,

    /// Schedule type (ondemand, hourly, daily, weekly, monthly)
    #[arg(long)]
    pub schedule_type: ScheduleType,

    /// Hours the backup runs at (e.g. "0,12")
    #[arg(long, default_value = "")]
    pub hours: String,

    /// Days the backup runs on (e.g. "mon,thu")
    #[arg(long, default_value = "")]
    pub days: String,
}

#[derive(Args, Debug, Default)]
pub struct ScheduleChangeArgs {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub schedule_type: Option<ScheduleType>,

    #[arg(long)]
    pub hours: Option<String>,

    #[arg(long)]
    pub days: Option<String>,
}

pub fn execute<B: HttpBackend>(
    client: &Client<B>,
    command: ScheduleCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        ScheduleCommand::New(args) => {
            let schedule = Schedule::new(args.name, args.schedule_type, args.hours, args.days);
            let schedule = client.create(schedule)?;
            super::created(&schedule, output_format)
        }
        ScheduleCommand::Update {
            schedule_id,
            changes,
        } => {
            let mut schedule = client.get::<Schedule>(schedule_id)?;
            ScheduleChanges {
                name: changes.name,
                schedule_type: changes.schedule_type,
                hours: changes.hours,
                days: changes.days,
            }
            .apply(&mut schedule)?;
            super::push(client, &schedule, output_format)
        }
        ScheduleCommand::Delete { schedule_id } => super::remove::<Schedule, _>(client, schedule_id),
        ScheduleCommand::Info { schedule_id } => {
            super::show::<Schedule, _>(client, schedule_id, output_format)
        }
    }
}
