use anyhow::Result;
use clap::Subcommand;

use crate::api::{Client, HttpBackend};
use crate::format;

#[derive(Subcommand, Debug)]
pub enum BackupCommand {
    /// Print all backup encryption keys in JSON format
    Keys,
}

pub fn execute<B: HttpBackend>(client: &Client<B>, command: BackupCommand) -> Result<()> {
    match command {
        BackupCommand::Keys => {
            let keys = client.backup_keys()?;
            format::print_raw(&keys);
        }
    }

    Ok(())
}
