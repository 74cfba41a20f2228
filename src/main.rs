// SPDX-License-Identifier: GPL-3.0-or-later

use clap::{Parser, Subcommand};
use dataverse_labels::{
    LabelError,
    api::{HttpTransport, publish::publish_entity},
    data::{FormStructure, known_language_name},
    svc::{load_change_history, load_form_structure, save_form_structure},
};
use dataverse_labels::api::languages::provisioned_languages;
use std::{fs, path::PathBuf};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Inspect and edit multi-language labels on a Dataverse org.
#[derive(Parser)]
#[command(name = "dvl", version, about)]
struct Cli {
    /// Org base URL, e.g. https://org.crm.dynamics.com
    #[arg(long, env = "DVL_BASE_URL")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the languages provisioned on the org.
    Languages,
    /// Load a form's full multi-language structure and emit it as JSON.
    ExportForm {
        /// The systemform id.
        #[arg(long)]
        form_id: Uuid,
        /// Write to this file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Apply an edited structure (JSON, as produced by export-form) back to
    /// the org, optionally publishing an entity afterwards.
    ApplyForm {
        /// The systemform id.
        #[arg(long)]
        form_id: Uuid,
        /// The edited structure file.
        #[arg(long)]
        file: PathBuf,
        /// Entity logical name to publish once the save succeeds.
        #[arg(long)]
        publish: Option<String>,
    },
    /// Show a page of a record's change history.
    History {
        /// Entity logical name, e.g. account.
        #[arg(long)]
        entity: String,
        /// The record id.
        #[arg(long)]
        record_id: Uuid,
        /// Page number (1-based).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

#[tokio::main]
async fn main() -> Result<(), LabelError> {
    // a missing .env is fine; the environment itself may carry the vars...
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    let t = HttpTransport::new()?;

    match cli.command {
        Command::Languages => {
            let lcids = provisioned_languages(&t, &cli.base_url).await?;
            for lcid in lcids {
                println!("{:>6}  {}", lcid, known_language_name(lcid).unwrap_or("?"));
            }
        }
        Command::ExportForm { form_id, out } => {
            let structure = load_form_structure(&t, &cli.base_url, &form_id).await?;
            let json = serde_json::to_string_pretty(&structure)?;
            match out {
                Some(path) => fs::write(path, json)?,
                None => println!("{json}"),
            }
        }
        Command::ApplyForm {
            form_id,
            file,
            publish,
        } => {
            let raw = fs::read_to_string(file)?;
            let structure: FormStructure = serde_json::from_str(&raw)?;
            save_form_structure(&t, &cli.base_url, &form_id, &structure, None).await?;
            if let Some(entity) = publish {
                publish_entity(&t, &cli.base_url, &entity).await?;
            }
            println!("saved form {form_id}");
        }
        Command::History {
            entity,
            record_id,
            page,
        } => {
            let history =
                load_change_history(&t, &cli.base_url, &entity, &record_id, page, None).await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
    }
    Ok(())
}
