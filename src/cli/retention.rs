use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::{Client, HttpBackend};
use crate::config::OutputFormat;
use crate::models::{Retention, RetentionChanges, RetentionType};

#[derive(Subcommand, Debug)]
pub enum RetentionCommand {
    /// Add a new retention policy
    New(NewRetentionArgs),

    /// Update a retention policy
    Update {
        /// Retention ID
        #[arg(long)]
        retention_id: i64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        retention_type: Option<RetentionType>,

        #[arg(long)]
        count: Option<i64>,
    },

    /// Delete a retention policy
    Delete {
        /// Retention ID
        #[arg(long)]
        retention_id: i64,
    },

    /// Show a retention policy
    Info {
        /// Retention ID
        #[arg(long)]
        retention_id: i64,
    },
}

#[derive(Args, Debug)]
pub struct NewRetentionArgs {
    /// Retention name shown in the control panel
    #[arg(long)]
    pub name: String,

    /// Retention type (bydays, bycount)
    #[arg(long)]
    pub retention_type: RetentionType,

    /// Number of days or backups to keep
    #[arg(long)]
    pub count: i64,
}

pub fn execute<B: HttpBackend>(
    client: &Client<B>,
    command: RetentionCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        RetentionCommand::New(args) => {
            let retention = Retention::new(args.name, args.retention_type, args.count);
            let retention = client.create(retention)?;
            super::created(&retention, output_format)
        }
        RetentionCommand::Update {
            retention_id,
            name,
            retention_type,
            count,
        } => {
            let mut retention = client.get::<Retention>(retention_id)?;
            RetentionChanges {
                name,
                retention_type,
                count,
            }
            .apply(&mut retention)?;
            super::push(client, &retention, output_format)
        }
        RetentionCommand::Delete { retention_id } => {
            super::remove::<Retention, _>(client, retention_id)
        }
        RetentionCommand::Info { retention_id } => {
            super::show::<Retention, _>(client, retention_id, output_format)
        }
    }
}
