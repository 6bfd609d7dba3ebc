//! CLI entrypoint for Insight Router
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use insight_application::{
    Clock, EventLogger, ExecutionParams, ExecutionProgress, NoEventLogger, NoProgress,
    ProviderAdapter, ProviderAdapters, ResponseParser, RouterDependencies, StateStore,
    SystemClock, TaskRouter,
};
use insight_domain::{OutputFormat, ProviderId, RouterConfigPatch, TaskRegistry};
use insight_infrastructure::{
    ConfigLoader, FileConfig, FileStateStore, HttpProviderAdapter, JsonlEventLogger,
    MemoryStateStore, RegexResponseParser,
};
use insight_presentation::{Cli, Command, ConfigAction, ConsoleFormatter, ProgressReporter};
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting Insight Router");

    // === Configuration ===
    let file_config = ConfigLoader::load(cli.config.as_deref())
        .map_err(|e| anyhow!("Failed to load configuration: {}", e))?;

    let registry = TaskRegistry::with_defaults();
    let issues = file_config.validate(&registry);
    for issue in &issues {
        if issue.is_error() {
            eprintln!("config error: {}", issue.message);
        } else {
            warn!("{}", issue);
        }
    }
    let error_count = issues.iter().filter(|issue| issue.is_error()).count();
    if error_count > 0 {
        bail!("Invalid configuration ({} error(s))", error_count);
    }

    if !file_config.output.color {
        ConsoleFormatter::disable_color();
    }
    let format = cli
        .output
        .map(OutputFormat::from)
        .or(file_config.output.format)
        .unwrap_or_default();

    // `config show --sources` needs no router
    if let Command::Config {
        action: ConfigAction::Show { sources: true },
    } = &cli.command
    {
        for source in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", source);
        }
        println!();
    }

    // === Dependency Injection ===
    let router = build_router(&cli, &file_config, registry)?;

    let token = CancellationToken::new();
    let router = router.with_cancellation(token.clone());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling in-flight requests");
            token.cancel();
        }
    });

    let progress: Box<dyn ExecutionProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    match cli.command {
        Command::Tasks => {
            let tasks = router.get_task_definitions();
            emit(format, &tasks, || ConsoleFormatter::format_tasks(&tasks));
        }
        Command::Route { task, routing } => {
            let decision = router.route(&task, &routing.to_options());
            emit(format, &decision, || {
                ConsoleFormatter::format_decision(&task, &decision)
            });
        }
        Command::Run {
            task,
            payload,
            routing,
        } => {
            let payload = parse_payload(payload.as_deref())?;
            let outcome = router
                .get_single_insight_with_progress(
                    &task,
                    &payload,
                    &routing.to_options(),
                    progress.as_ref(),
                )
                .await?;
            emit(format, &outcome, || ConsoleFormatter::format_outcome(&outcome));
        }
        Command::Consensus { task, payload } => {
            let payload = parse_payload(payload.as_deref())?;
            let insight = router
                .get_multi_provider_insight_with_progress(&task, &payload, progress.as_ref())
                .await?;
            emit(format, &insight, || ConsoleFormatter::format_insight(&insight));
        }
        Command::Visual { brief } => {
            let asset = router.generate_visual(&brief).await?;
            emit(format, &asset, || ConsoleFormatter::format_visual(&asset));
        }
        Command::Metrics => {
            let records = router.get_performance_records();
            emit(format, &records, || ConsoleFormatter::format_records(&records));
        }
        Command::Config { action } => match action {
            ConfigAction::Show { .. } => {
                let config = router.get_config();
                emit(format, &config, || ConsoleFormatter::format_config(&config));
            }
            ConfigAction::Set { patch } => {
                let patch: RouterConfigPatch =
                    serde_json::from_str(&patch).context("Invalid configuration patch")?;
                let report = router.configure(patch)?;
                emit(format, &report, || ConsoleFormatter::format_patch_report(&report));
            }
        },
        Command::Feedback {
            task,
            provider,
            score,
        } => {
            let provider: ProviderId = provider.parse()?;
            match router.record_feedback(&task, provider, score) {
                Some(record) => {
                    emit(format, &record, || {
                        ConsoleFormatter::format_records(std::slice::from_ref(&record))
                    })
                }
                None => bail!("No performance history for {} on {}", task, provider),
            }
        }
        Command::Budget => {
            let status = router.budget_status();
            emit(format, &status, || ConsoleFormatter::format_budget(&status));
        }
    }

    Ok(())
}

/// Install the tracing subscriber. The returned guard flushes the file
/// writer and must live until exit.
fn init_logging(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "insight-router.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn build_router(cli: &Cli, config: &FileConfig, registry: TaskRegistry) -> Result<TaskRouter> {
    let store: Arc<dyn StateStore> = if cli.ephemeral {
        info!("Using in-memory state");
        Arc::new(MemoryStateStore::new())
    } else {
        let dir = cli
            .state_dir
            .clone()
            .unwrap_or_else(|| config.storage.resolve_state_dir());
        info!("Using state directory {}", dir.display());
        Arc::new(FileStateStore::new(dir))
    };

    let event_logger: Arc<dyn EventLogger> = match &config.logging.event_log {
        Some(path) => match JsonlEventLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoEventLogger),
        },
        None => Arc::new(NoEventLogger),
    };

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let parser: Arc<dyn ResponseParser> = Arc::new(RegexResponseParser::new());

    let quality: Arc<dyn ProviderAdapter> = Arc::new(HttpProviderAdapter::new(
        ProviderId::Quality,
        config.providers.quality.clone(),
        Arc::clone(&parser),
        Arc::clone(&clock),
    ));
    let fast: Arc<dyn ProviderAdapter> = Arc::new(HttpProviderAdapter::new(
        ProviderId::Fast,
        config.providers.fast.clone(),
        parser,
        Arc::clone(&clock),
    ));

    Ok(TaskRouter::new(RouterDependencies {
        registry,
        adapters: ProviderAdapters::new(quality, fast),
        store,
        clock,
        event_logger,
        initial_config: config.router.clone(),
        params: ExecutionParams::from_timeout_seconds(config.execution.timeout_seconds),
    }))
}

fn parse_payload(raw: Option<&str>) -> Result<Value> {
    match raw {
        Some(text) => serde_json::from_str(text).context("Payload is not valid JSON"),
        None => Ok(Value::Null),
    }
}

fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, text: impl FnOnce() -> String) {
    match format {
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(value)),
        OutputFormat::Text => print!("{}", text()),
    }
}
