use agent_catalog::orchestrator::registry::summarize;
use agent_catalog::orchestrator::{AgentSummary, SharedRegistry};
use agent_catalog::{
    build_model_runtime_from_env, EngineConfig, EnrichmentConfig, EnrichmentContext,
    EnrichmentPipeline, ExecutionEngine, ExecutionError, Registry, TaskType,
};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{Map as JsonMap, Value};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "agent-catalog",
    about = "Browse, run and enrich the bundled contract-checked agents"
)]
struct Cli {
    /// Print compact JSON instead of pretty-printed output.
    #[arg(long, global = true, default_value_t = false)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List agents as `{id, name, taskType, category}`.
    List {
        /// Only agents of this task type (AI, Hybrid, Human).
        #[arg(long)]
        task_type: Option<TaskType>,
        /// Only agents under this category, e.g. "Skill 19".
        #[arg(long)]
        category: Option<String>,
    },
    /// Case-insensitive search over names and categories.
    Search { query: String },
    /// Metadata, persona and contract documents of one agent.
    Describe { id: String },
    /// Counts by category and task type.
    Stats,
    /// Execute an agent under its input/output contracts.
    Run {
        id: String,
        /// Raw JSON input.
        #[arg(long, default_value = "{}")]
        input: String,
    },
    /// Execute an agent and ask the configured model for insights.
    Enhance {
        id: String,
        /// Raw JSON input.
        #[arg(long, default_value = "{}")]
        input: String,
        /// Recent conversation context for the prompt.
        #[arg(long)]
        memory: Option<String>,
        /// JSON object of user preferences for the prompt.
        #[arg(long)]
        preferences: Option<String>,
        /// Use the offline echo runtime when no model credentials are configured.
        #[arg(long, default_value_t = false)]
        offline_fallback: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    let registry = Registry::builtin()
        .context("Agent registry initialization failed")?
        .shared();
    let engine_config = EngineConfig::from_env()?;
    let engine = ExecutionEngine::new(registry.clone()).with_entropy(engine_config.entropy());

    match cli.command {
        Commands::List {
            task_type,
            category,
        } => print(&list(&registry, task_type, category.as_deref()), cli.compact),
        Commands::Search { query } => {
            let hits: Vec<_> = registry
                .search(&query)
                .into_iter()
                .map(|agent| summarize(agent.as_ref()))
                .collect();
            print(&hits, cli.compact)
        }
        Commands::Describe { id } => match registry.describe(&id) {
            Some(detail) => print(&detail, cli.compact),
            None => bail!("agent not found: {id}"),
        },
        Commands::Stats => print(&registry.stats(), cli.compact),
        Commands::Run { id, input } => {
            let input = parse_json(&input, "--input")?;
            let result = engine.run(&id, &input).map_err(report)?;
            print(&result, cli.compact)
        }
        Commands::Enhance {
            id,
            input,
            memory,
            preferences,
            offline_fallback,
        } => {
            let input = parse_json(&input, "--input")?;
            let mut context = EnrichmentContext::default();
            if let Some(memory) = memory {
                context = context.with_memory(memory);
            }
            if let Some(raw) = preferences {
                context = context.with_preferences(parse_object(&raw, "--preferences")?);
            }

            let runtime = build_model_runtime_from_env(offline_fallback)
                .context("Model runtime initialization failed")?;
            let pipeline = EnrichmentPipeline::new(engine, EnrichmentConfig::from_env()?);
            info!(
                agent_id = %id,
                runtime = runtime.name(),
                model = %pipeline.config().model,
                "Enhancing agent output"
            );
            let enriched = pipeline
                .enhance(&id, &input, runtime.as_ref(), &context)
                .await
                .map_err(report)?;
            print(&enriched, cli.compact)
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

fn list(
    registry: &SharedRegistry,
    task_type: Option<TaskType>,
    category: Option<&str>,
) -> Vec<AgentSummary> {
    let mut hits = match category {
        Some(category) => registry.filter_by_category(category),
        None => registry.iter().collect(),
    };
    if let Some(kind) = task_type {
        let typed = registry.filter_by_type(kind);
        hits.retain(|agent| typed.iter().any(|other| other.meta().id == agent.meta().id));
    }
    hits.into_iter().map(|agent| summarize(agent.as_ref())).collect()
}

fn report(err: ExecutionError) -> anyhow::Error {
    warn!(
        agent_id = err.agent_id(),
        kind = err.kind(),
        violations = err.violations().len(),
        "Agent call failed"
    );
    err.into()
}

fn parse_json(raw: &str, flag: &str) -> anyhow::Result<Value> {
    serde_json::from_str(raw).with_context(|| format!("{flag} must be valid JSON"))
}

fn parse_object(raw: &str, flag: &str) -> anyhow::Result<JsonMap<String, Value>> {
    match parse_json(raw, flag)? {
        Value::Object(map) => Ok(map),
        other => bail!("{flag} must be a JSON object, got {other}"),
    }
}

fn print<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_run_with_input() {
        let cli = Cli::parse_from([
            "agent-catalog",
            "run",
            "PRO-001",
            "--input",
            r#"{"event_id":"evt-1"}"#,
        ]);
        match cli.command {
            Commands::Run { id, input } => {
                assert_eq!(id, "PRO-001");
                assert_eq!(parse_json(&input, "--input").unwrap()["event_id"], "evt-1");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn cli_parses_task_type_filter() {
        let cli = Cli::parse_from(["agent-catalog", "list", "--task-type", "ai", "--compact"]);
        assert!(cli.compact);
        assert!(matches!(
            cli.command,
            Commands::List {
                task_type: Some(TaskType::Ai),
                category: None
            }
        ));
    }

    #[test]
    fn cli_help_is_emitted_as_error_kind() {
        // Clap returns DisplayHelp as an error; asserting keeps this headless and fast.
        let err = Cli::command()
            .try_get_matches_from(["agent-catalog", "--help"])
            .expect_err("help should short-circuit");
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn list_filters_combine() {
        let registry = Registry::builtin().unwrap().shared();
        assert_eq!(list(&registry, None, None).len(), 20);
        assert_eq!(list(&registry, Some(TaskType::Ai), Some("skill 20")).len(), 10);
        assert!(list(&registry, Some(TaskType::Human), None).is_empty());
    }

    #[test]
    fn list_matches_registry_category_filter() {
        let registry = Registry::builtin().unwrap().shared();
        let listed: Vec<_> = list(&registry, None, Some(" SKILL 19 "))
            .into_iter()
            .map(|summary| summary.id)
            .collect();
        let filtered: Vec<_> = registry
            .filter_by_category("Skill 19")
            .iter()
            .map(|agent| agent.meta().id.clone())
            .collect();
        assert_eq!(listed, filtered);
        assert_eq!(listed.first().map(String::as_str), Some("PRO-001"));
    }

    #[test]
    fn reported_errors_keep_the_execution_error() {
        let err = report(ExecutionError::AgentNotFound {
            agent_id: "PRO-999".into(),
        });
        let inner = err.downcast_ref::<ExecutionError>().expect("typed error kept");
        assert_eq!(inner.agent_id(), "PRO-999");
    }

    #[test]
    fn preferences_must_be_objects() {
        assert!(parse_object(r#"{"tone":"formal"}"#, "--preferences").is_ok());
        let err = parse_object("[1]", "--preferences").unwrap_err();
        assert!(err.to_string().contains("JSON object"));
    }
}
