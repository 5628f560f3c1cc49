use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};
use std::process::{Command, Stdio};

use crate::api::{Client, HttpBackend};
use crate::config::OutputFormat;
use crate::format;
use crate::models::{DatabaseType, Server, ServerChanges};

#[derive(Subcommand, Debug)]
pub enum ServerCommand {
    /// Add a new server
    New(NewServerArgs),

    /// Update a server
    Update {
        /// Server ID
        #[arg(long)]
        server_id: i64,

        #[command(flatten)]
        changes: ServerChangeArgs,
    },

    /// Delete a server
    Delete {
        /// Server ID
        #[arg(long)]
        server_id: i64,
    },

    /// Show a server
    Info {
        /// Server ID
        #[arg(long)]
        server_id: i64,
    },

    /// Install the backup agent on this host, or print the install script
    Install {
        /// Server ID
        #[arg(long)]
        server_id: i64,

        /// Print the install script instead of executing it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args, Debug)]
pub struct NewServerArgs {
    /// Server name shown in the control panel
    #[arg(long)]
    pub name: String,

    /// Database type (mysql, mariadb, percona_server, mongodb, postgresql)
    #[arg(long)]
    pub db_type: DatabaseType,

    /// Server can be backed up but can't receive restores
    #[arg(long)]
    pub readonly: bool,

    /// Database host the agent connects to
    #[arg(long, default_value = "localhost")]
    pub db_host: String,

    /// Database port the agent connects to
    #[arg(long)]
    pub db_port: String,

    /// Database user the agent connects as
    #[arg(long, default_value = "")]
    pub db_user: String,

    /// Database password the agent connects with
    #[arg(long, default_value = "")]
    pub db_pass: String,
}

#[derive(Args, Debug, Default)]
pub struct ServerChangeArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Must match the stored type; it can't be changed
    #[arg(long)]
    pub db_type: Option<DatabaseType>,

    #[arg(long)]
    pub readonly: Option<bool>,

    #[arg(long)]
    pub db_host: Option<String>,

    #[arg(long)]
    pub db_port: Option<String>,

    #[arg(long)]
    pub db_user: Option<String>,

    #[arg(long)]
    pub db_pass: Option<String>,
}

impl From<ServerChangeArgs> for ServerChanges {
    fn from(args: ServerChangeArgs) -> Self {
        ServerChanges {
            name: args.name,
            db_type: args.db_type,
            readonly: args.readonly,
            db_host: args.db_host,
            db_port: args.db_port,
            db_user: args.db_user,
            db_pass: args.db_pass,
        }
    }
}

pub fn execute<B: HttpBackend>(
    client: &Client<B>,
    command: ServerCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        ServerCommand::New(args) => {
            let server = Server::new(
                args.name,
                args.db_type,
                args.readonly,
                args.db_host,
                args.db_port,
                args.db_user,
                args.db_pass,
            );
            let server = client.create(server)?;
            super::created(&server, output_format)
        }
        ServerCommand::Update { server_id, changes } => {
            let mut server = client.get::<Server>(server_id)?;
            ServerChanges::from(changes).apply(&mut server)?;
            super::push(client, &server, output_format)
        }
        ServerCommand::Delete { server_id } => super::remove::<Server, _>(client, server_id),
        ServerCommand::Info { server_id } => super::show::<Server, _>(client, server_id, output_format),
        ServerCommand::Install { server_id, dry_run } => install(client, server_id, dry_run),
    }
}

fn install<B: HttpBackend>(client: &Client<B>, server_id: i64, dry_run: bool) -> Result<()> {
    let script = client.server_install(server_id)?;

    if dry_run {
        format::print_raw(&script);
        return Ok(());
    }

    if !nix::unistd::Uid::effective().is_root() {
        anyhow::bail!("You need root privileges to execute this command");
    }

    tracing::info!("Running install script for server {}", server_id);
    pipe_script(Command::new("bash"), &script)
}

/// Feed `script` to the interpreter on stdin and wait for it. The child is
/// always reaped, and its exit status wins over a broken pipe.
pub(crate) fn pipe_script(mut interpreter: Command, script: &[u8]) -> Result<()> {
    let mut child = interpreter
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .context("Failed to start script interpreter")?;

    // The handle is dropped at the end of this statement, closing the pipe.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(script),
        None => Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdin not captured")),
    };

    let status = child.wait().context("Failed to wait for script interpreter")?;
    if !status.success() {
        anyhow::bail!("Install script failed: {}", status);
    }
    written.context("Failed to pipe install script to interpreter")?;

    Ok(())
}
