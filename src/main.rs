mod backend;
mod catalog;
mod cli;
mod config;
mod error;
mod logging;
mod state;
mod tui;

use anyhow::{bail, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;

use backend::{create_backend, BackendKind, StudyContext};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.global)?;

    match cli.command {
        Some(command) => {
            logging::init_stderr()?;
            match command {
                Commands::Ask {
                    message,
                    unit,
                    topic,
                } => {
                    let context = study_context(unit.as_deref(), topic.as_deref())?;
                    let services = create_backend(BackendKind::Simulated, &config);
                    let prompt = message.join(" ");

                    tracing::info!(unit = ?context.unit, topic = ?context.topic, "asking assistant");
                    let response = services.assistant.answer(&prompt, &context).await?;

                    println!("{}", response);
                }
                Commands::Units { unit } => {
                    let units: Vec<&catalog::Unit> = match unit.as_deref() {
                        Some(id) => match catalog::unit(id) {
                            Some(found) => vec![found],
                            None => bail!("unknown unit '{}'", id),
                        },
                        None => catalog::UNITS.iter().collect(),
                    };
                    for unit in units {
                        println!("{}", unit.name);
                        for topic in catalog::topics_for(unit.id) {
                            println!("  - {}", topic);
                        }
                    }
                }
                Commands::Config => {
                    println!("{}", serde_json::to_string_pretty(&config)?);
                }
            }
        }
        None => {
            let log_path = config.log_path();
            logging::init_file(&log_path)?;
            tracing::info!(log = %log_path.display(), "logging to file");
            tui::run(config).await?;
        }
    }

    Ok(())
}

/// Resolve `--unit` and `--topic` against the catalog.
fn study_context(unit: Option<&str>, topic: Option<&str>) -> Result<StudyContext> {
    let Some(id) = unit else {
        return Ok(StudyContext::default());
    };
    let Some(found) = catalog::unit(id) else {
        bail!("unknown unit '{}'", id);
    };
    let topic = match topic {
        Some(t) => match catalog::topics_for(id).iter().find(|known| **known == t) {
            Some(known) => Some(known.to_string()),
            None => bail!("'{}' is not a topic of {}", t, found.name),
        },
        None => None,
    };
    Ok(StudyContext {
        unit: Some(found.name.to_string()),
        topic,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_study_context_from_flags() -> Result<()> {
        assert_eq!(study_context(None, None)?, StudyContext::default());

        let context = study_context(Some("2"), Some("BST"))?;
        assert_eq!(context.unit.as_deref(), Some("Unit 2: Trees and Graphs"));
        assert_eq!(context.topic.as_deref(), Some("BST"));

        assert!(study_context(Some("9"), None).is_err());
        assert!(study_context(Some("1"), Some("BST")).is_err());
        Ok(())
    }
}
