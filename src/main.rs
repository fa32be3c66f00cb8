use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pipewright::client::ConfigApi;
use pipewright::config::Settings;
use pipewright::error::Result;
use pipewright::pipeline::{lint_pipeline, validate_for_save, PipelineConfig, TemplateKind};
use pipewright::rules::{check_stage_references, WorkflowRule};

#[derive(Parser)]
#[command(name = "pipewright")]
#[command(about = "Pipeline and workflow-rule configuration toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Starter pipeline templates
    Template {
        #[command(subcommand)]
        action: TemplateActions,
    },
    /// Validate a pipeline configuration file (save gate + lint)
    Validate {
        /// Path to a pipeline configuration JSON file
        file: PathBuf,
    },
    /// Check workflow rules against a pipeline's stages
    Lint {
        /// Path to a pipeline configuration JSON file
        pipeline: PathBuf,
        /// Path to a JSON file with an array of workflow rules
        #[arg(short, long)]
        rules: PathBuf,
    },
    /// Manage pipeline configurations on the persistence API
    Pipelines {
        #[command(subcommand)]
        action: PipelineActions,
    },
    /// Manage workflow rules on the persistence API
    Rules {
        #[command(subcommand)]
        action: RuleActions,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
enum TemplateActions {
    /// List available templates
    List,
    /// Write a starter configuration to a file (or stdout)
    Init {
        /// Template kind: peak | standard | scratch
        kind: String,
        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Organization to scope the configuration to
        #[arg(long, env = "PIPEWRIGHT_ORG_ID")]
        org: Option<String>,
    },
}

#[derive(Subcommand)]
enum PipelineActions {
    /// List pipeline configurations for the configured organization
    List,
    /// Fetch one configuration by id and write it to a file (or stdout)
    Pull {
        id: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate and persist a configuration file
    Push {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum RuleActions {
    /// List workflow rules for the configured organization
    List,
    /// Validate and persist a workflow rule file
    Push {
        file: PathBuf,
    },
    /// Delete a workflow rule by id
    Delete {
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pipewright=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.external_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Template { action } => match action {
            TemplateActions::List => {
                for kind in TemplateKind::ALL {
                    println!("{:<10} {}", kind.name(), kind.description());
                }
                Ok(())
            }
            TemplateActions::Init { kind, output, org } => {
                let kind: TemplateKind = kind
                    .parse()
                    .map_err(pipewright::Error::Validation)?;
                let mut config = PipelineConfig::new(org.unwrap_or_default());
                config.load_template(kind);
                write_json(output.as_deref(), &config)
            }
        },

        Commands::Validate { file } => {
            let config: PipelineConfig = read_json(&file)?;
            let issues = lint_pipeline(&config);
            for issue in &issues {
                println!("warning: {}", issue.message);
            }
            validate_for_save(&config)?;
            println!(
                "ok: '{}' with {} stages ({} active), {} warning(s)",
                config.name,
                config.stages.len(),
                config.active_stage_count(),
                issues.len()
            );
            Ok(())
        }

        Commands::Lint { pipeline, rules } => {
            let config: PipelineConfig = read_json(&pipeline)?;
            let rule_list: Vec<WorkflowRule> = read_json(&rules)?;

            let mut total = 0;
            for rule in &rule_list {
                for issue in check_stage_references(rule, &config) {
                    println!("warning: {}", issue.message);
                    total += 1;
                }
            }
            println!(
                "checked {} rule(s) against '{}': {} dangling reference(s)",
                rule_list.len(),
                config.name,
                total
            );
            Ok(())
        }

        Commands::Pipelines { action } => {
            let settings = Settings::load();
            let api = ConfigApi::new(&settings);
            match action {
                PipelineActions::List => {
                    let pipelines = api.list_pipelines(&settings.organization_id).await?;
                    for stored in pipelines {
                        let p = &stored.record;
                        println!(
                            "{:<36} {:<30} {} stages{}",
                            p.id,
                            p.name,
                            p.stages.len(),
                            if p.is_default { " (default)" } else { "" }
                        );
                    }
                    Ok(())
                }
                PipelineActions::Pull { id, output } => {
                    let stored = api.get_pipeline(&id).await?;
                    write_json(output.as_deref(), &stored.record)
                }
                PipelineActions::Push { file } => {
                    let config: PipelineConfig = read_json(&file)?;
                    let stored = api.save_pipeline(&config).await?;
                    info!("saved pipeline configuration '{}'", stored.record.name);
                    println!("{}", stored.record.id);
                    Ok(())
                }
            }
        }

        Commands::Rules { action } => {
            let settings = Settings::load();
            let api = ConfigApi::new(&settings);
            match action {
                RuleActions::List => {
                    let rules = api.list_rules(&settings.organization_id).await?;
                    for stored in rules {
                        let r = &stored.record;
                        println!(
                            "{:<36} {:<30} {:<13} {} action(s){}",
                            r.id,
                            r.name,
                            r.trigger.kind(),
                            r.actions.len(),
                            if r.is_active { "" } else { " (inactive)" }
                        );
                    }
                    Ok(())
                }
                RuleActions::Push { file } => {
                    let rule: WorkflowRule = read_json(&file)?;
                    let stored = api.save_rule(&rule).await?;
                    info!("saved workflow rule '{}'", stored.record.name);
                    println!("{}", stored.record.id);
                    Ok(())
                }
                RuleActions::Delete { id } => {
                    api.delete_rule(&id).await?;
                    println!("deleted {}", id);
                    Ok(())
                }
            }
        }

        Commands::Completions { shell } => {
            let shell = match shell {
                CompletionShell::Bash => Shell::Bash,
                CompletionShell::Zsh => Shell::Zsh,
                CompletionShell::Fish => Shell::Fish,
            };
            let mut cmd = Cli::command();
            generate(shell, &mut cmd, "pipewright", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &std::path::Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_json<T: serde::Serialize>(path: Option<&std::path::Path>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            std::fs::write(path, json)?;
            info!("wrote {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}
