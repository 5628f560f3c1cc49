use anyhow::Result;
use clap::{Args, Subcommand};

use crate::api::{Client, HttpBackend};
use crate::config::OutputFormat;
use crate::models::{Storage, StorageChanges, StorageType};

#[derive(Subcommand, Debug)]
pub enum StorageCommand {
    /// Add a new backup storage
    New(NewStorageArgs),

    /// Update a backup storage
    Update {
        /// Storage ID
        #[arg(long)]
        storage_id: i64,

        #[command(flatten)]
        changes: StorageChangeArgs,
    },

    /// Delete a backup storage
    Delete {
        /// Storage ID
        #[arg(long)]
        storage_id: i64,
    },

    /// Show a backup storage
    Info {
        /// Storage ID
        #[arg(long)]
        storage_id: i64,
    },
}

#[derive(Args, Debug)]
pub struct NewStorageArgs {
    /// Storage name shown in the control panel
    #[arg(long)]
    pub name: String,

    /// Storage type (local, s3, google, digitalocean, alibaba)
    #[arg(long)]
    pub storage_type: StorageType,

    /// Local directory backups are written to (e.g. /data/backups)
    #[arg(long, default_value = "")]
    pub path: String,

    /// Cloud bucket backups are written to
    #[arg(long, default_value = "")]
    pub bucket: String,

    /// Cloud storage access key
    #[arg(long, default_value = "")]
    pub storage_access_key: String,

    /// Cloud storage secret key
    #[arg(long, default_value = "", hide_default_value = true)]
    pub storage_secret_key: String,

    /// Cloud region endpoint without scheme (e.g. s3.ap-south-1.amazonaws.com)
    #[arg(long, default_value = "")]
    pub region_endpoint: String,
}

#[derive(Args, Debug, Default)]
pub struct StorageChangeArgs {
    #[arg(long)]
    pub name: Option<String>,

    /// Must match the stored type; it can't be changed
    #[arg(long)]
    pub storage_type: Option<StorageType>,

    #[arg(long)]
    pub path: Option<String>,

    #[arg(long)]
    pub bucket: Option<String>,

    #[arg(long)]
    pub storage_access_key: Option<String>,

    #[arg(long)]
    pub storage_secret_key: Option<String>,

    #[arg(long)]
    pub region_endpoint: Option<String>,
}

impl From<NewStorageArgs> for Storage {
    fn from(args: NewStorageArgs) -> Self {
        if args.storage_type.is_cloud() {
            Storage::cloud(
                args.name,
                args.storage_type,
                args.bucket,
                args.region_endpoint,
                args.storage_access_key,
                args.storage_secret_key,
            )
        } else {
            Storage::local(args.name, args.path)
        }
    }
}

impl From<StorageChangeArgs> for StorageChanges {
    fn from(args: StorageChangeArgs) -> Self {
        StorageChanges {
            name: args.name,
            storage_type: args.storage_type,
            local_path: args.path,
            bucket: args.bucket,
            access_key: args.storage_access_key,
            secret_key: args.storage_secret_key,
            region_endpoint: args.region_endpoint,
        }
    }
}

pub fn execute<B: HttpBackend>(
    client: &Client<B>,
    command: StorageCommand,
    output_format: OutputFormat,
) -> Result<()> {
    match command {
        StorageCommand::New(args) => {
            let storage = Storage::from(args);
            let storage = client.create(storage)?;
            super::created(&storage, output_format)
        }
        StorageCommand::Update {
            storage_id,
            changes,
        } => {
            let mut storage = client.get::<Storage>(storage_id)?;
            StorageChanges::from(changes).apply(&mut storage)?;
            super::push(client, &storage, output_format)
        }
        StorageCommand::Delete { storage_id } => super::remove::<Storage, _>(client, storage_id),
        StorageCommand::Info { storage_id } => {
            super::show::<Storage, _>(client, storage_id, output_format)
        }
    }
}
