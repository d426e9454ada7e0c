//! Request form CLI
//!
//! Inspect field templates, template addresses and request articles.
//!
//! # Usage
//!
//! ```bash
//! # Fields of a legal request, German labels
//! dsr_fields fields --locale de
//!
//! # Tracking-consent fields as JSON
//! dsr_fields -o json fields --tracking
//!
//! # Address of a request template
//! dsr_fields template-url --locale fr --template access-default
//!
//! # Fill request fields from saved identity data (JSON array of fields)
//! DSR_PRIVACY_SAVE_ID_DATA=true dsr_fields fill --id-data id_data.json --always-fill
//!
//! # Article numbers
//! dsr_fields articles
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use dsr_forms::{
    fields_for, FieldDescriptor, FieldPurpose, FieldValue, FieldsInitializer, InMemoryIdData,
    PrivacyControls, RequestType, RequestsConfig, StaticCatalog, TemplateLocator,
};

#[derive(Parser)]
#[command(name = "dsr_fields")]
#[command(version = "0.1.0")]
#[command(about = "Inspect data-subject request form templates")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Pretty,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a field template
    Fields {
        /// Locale of the labels (defaults to DSR_DEFAULT_LOCALE)
        #[arg(long, short)]
        locale: Option<String>,

        /// Tracking-consent fields instead of request fields
        #[arg(long)]
        tracking: bool,
    },

    /// Print the address of a request template or template directory
    TemplateUrl {
        #[arg(long, short)]
        locale: Option<String>,

        #[arg(long, short)]
        template: Option<String>,
    },

    /// Fill a field template from saved identity data, if privacy settings allow
    Fill {
        /// JSON file holding the saved identity data elements
        #[arg(long)]
        id_data: PathBuf,

        #[arg(long, short)]
        locale: Option<String>,

        #[arg(long)]
        tracking: bool,

        /// Fill without the user asking
        #[arg(long)]
        always_fill: bool,
    },

    /// Print the article number of each request type
    Articles,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = RequestsConfig::from_env()?;

    match cli.command {
        Commands::Fields { locale, tracking } => {
            let fields = field_template(&config, locale.as_deref(), tracking);
            print_fields(&fields, cli.format)?;
        }
        Commands::Fill {
            id_data,
            locale,
            tracking,
            always_fill,
        } => {
            let raw = std::fs::read_to_string(&id_data)
                .with_context(|| format!("reading {}", id_data.display()))?;
            let elements: Vec<FieldDescriptor> = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", id_data.display()))?;

            let store = InMemoryIdData::with_elements(elements).always_filling(always_fill);
            let init =
                FieldsInitializer::new(Arc::new(PrivacyControls::from_env()), Arc::new(store));
            let result = init
                .initialize_fields(field_template(&config, locale.as_deref(), tracking))
                .await?;

            match cli.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Pretty => {
                    print_fields(&result.new_fields, cli.format)?;
                    match &result.signature {
                        Some(signature) => println!("signature: {}", signature),
                        None => println!("not filled"),
                    }
                }
            }
        }
        Commands::TemplateUrl { locale, template } => {
            let locator = TemplateLocator::new(config);
            println!(
                "{}",
                locator.template_url(locale.as_deref(), template.as_deref())
            );
        }
        Commands::Articles => match cli.format {
            OutputFormat::Json => {
                let articles: serde_json::Map<String, serde_json::Value> = RequestType::all()
                    .iter()
                    .map(|rt| (rt.as_str().to_string(), rt.article().into()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&articles)?);
            }
            OutputFormat::Pretty => {
                for rt in RequestType::all() {
                    println!("{:<14} Art. {}", rt.as_str(), rt.article());
                }
            }
        },
    }

    Ok(())
}

fn field_template(
    config: &RequestsConfig,
    locale: Option<&str>,
    tracking: bool,
) -> Vec<FieldDescriptor> {
    let locator = TemplateLocator::new(config.clone());
    let locale = locator.resolve_locale(locale);
    let purpose = if tracking {
        FieldPurpose::Tracking
    } else {
        FieldPurpose::Request
    };
    fields_for(purpose, &StaticCatalog::from_config(locator.config()), &locale)
}

fn print_fields(fields: &[FieldDescriptor], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(fields)?),
        OutputFormat::Pretty => {
            for field in fields {
                let value = match &field.value {
                    FieldValue::Text(s) => format!("{:?}", s),
                    FieldValue::Address(a) => serde_json::to_string(a)?,
                };
                println!(
                    "{:<24} {:<10} {:<9} {}",
                    field.description,
                    field.kind.as_str(),
                    if field.optional { "optional" } else { "required" },
                    value
                );
            }
        }
    }
    Ok(())
}
