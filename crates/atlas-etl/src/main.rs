//! Atlas ETL - country analytics pipeline CLI

use anyhow::Result;
use atlas_common::logging::{init_logging, LogConfig, LogLevel};
use atlas_etl::config::EtlConfig;
use atlas_etl::countries::{CountriesClient, ExtractPipeline, LoadPipeline};
use atlas_etl::dynamo::{AnalyticsTable, TableConfig};
use atlas_etl::storage::{Storage, StorageConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "atlas-etl")]
#[command(author, version, about = "Country analytics ETL pipeline")]
struct Cli {
    /// Job to run
    #[command(subcommand)]
    job: Job,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Job {
    /// Fetch the country API and store the raw Parquet file
    Extract {
        /// Local output path for the Parquet file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the local file only, skip the S3 upload
        #[arg(long)]
        skip_upload: bool,

        /// Keep only the first N fetched records
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Read the Parquet object from S3, normalize, and load into DynamoDB
    Load,

    /// Extract then load
    Run {
        /// Local output path for the Parquet file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keep only the first N fetched records
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut log_config = LogConfig::from_env().unwrap_or_default();
    log_config.log_file_prefix = "atlas-etl".to_string();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }

    if let Err(e) = init_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(2);
    }

    if let Err(e) = dispatch(cli.job).await {
        error!(error = %e, "run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn dispatch(job: Job) -> Result<()> {
    match job {
        Job::Extract {
            output,
            skip_upload,
            limit,
        } => {
            let stats = extract(output, skip_upload, limit).await?;
            println!(
                "Extract complete: {} records, {} bytes of Parquet",
                stats.records, stats.bytes
            );
            if let Some(upload) = stats.uploaded {
                println!(
                    "Uploaded {} ({} bytes, sha256 {})",
                    upload.key, upload.size, upload.checksum
                );
            }
        },
        Job::Load => {
            let stats = load().await?;
            println!(
                "Load complete: {} records written in {} batches",
                stats.records, stats.batches
            );
        },
        Job::Run { output, limit } => {
            let extract_stats = extract(output, false, limit).await?;
            println!(
                "Extract complete: {} records, {} bytes of Parquet",
                extract_stats.records, extract_stats.bytes
            );
            let load_stats = load().await?;
            println!(
                "Load complete: {} records written in {} batches",
                load_stats.records, load_stats.batches
            );
        },
    }

    Ok(())
}

async fn extract(
    output: Option<PathBuf>,
    skip_upload: bool,
    limit: Option<usize>,
) -> Result<atlas_etl::countries::ExtractStats> {
    let mut config = EtlConfig::load()?;
    if let Some(output) = output {
        config.local_path = output;
    }
    if limit.is_some() {
        config.source.limit = limit;
    }
    config.validate()?;

    let client = CountriesClient::new(config.source.clone())?;
    let storage = if skip_upload {
        None
    } else {
        Some(Storage::new(StorageConfig::from_env()?).await?)
    };

    let pipeline = ExtractPipeline::new(client, storage, config.local_path, config.object_key);
    Ok(pipeline.run().await?)
}

async fn load() -> Result<atlas_etl::countries::LoadStats> {
    let config = EtlConfig::load()?;

    let storage = Storage::new(StorageConfig::from_env()?).await?;
    let table = AnalyticsTable::new(TableConfig::from_env()?).await?;

    let pipeline = LoadPipeline::new(storage, table, config.object_key);
    Ok(pipeline.run().await?)
}
