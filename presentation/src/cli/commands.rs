//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use insight_domain::{OutputFormat, ProviderChoice, RoutingOptions};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Human-readable console output
    Text,
    /// JSON output
    Json,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Text => OutputFormat::Text,
            OutputArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for insight-router
#[derive(Parser, Debug)]
#[command(name = "insight-router")]
#[command(
    author,
    version,
    about = "Route analytics tasks to AI providers and merge their insights"
)]
#[command(long_about = r#"
Insight Router sends each analytics task to the provider most likely to
serve it well: a deep-reasoning quality provider or a cheap, fast one.
Routing learns from every execution. The consensus command runs a task on
both providers and merges their analyses.

Configuration files are loaded from (in priority order):
1. --config <path>                      Explicit config file
2. ./insight-router.toml                Project-level config
3. ~/.config/insight-router/config.toml Global config

Example:
  insight-router route market-analysis
  insight-router run quick-insights --payload '{"region": "emea"}'
  insight-router consensus strategic-plan -o json
  insight-router config set '{"quality_first": true}'
"#)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory for persisted routing state (overrides [storage] state_dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub state_dir: Option<PathBuf>,

    /// Keep routing state in memory only
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write diagnostics to a daily-rotated file in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputArg>,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the task catalogue
    Tasks,
    /// Show which provider a task would be routed to
    Route {
        /// Task identifier
        task: String,
        #[command(flatten)]
        routing: RoutingArgs,
    },
    /// Run a task on the routed provider
    Run {
        /// Task identifier
        task: String,
        /// JSON payload sent with the task
        #[arg(long, value_name = "JSON")]
        payload: Option<String>,
        #[command(flatten)]
        routing: RoutingArgs,
    },
    /// Run a task on both providers and merge the results
    Consensus {
        /// Task identifier
        task: String,
        /// JSON payload sent with the task
        #[arg(long, value_name = "JSON")]
        payload: Option<String>,
    },
    /// Generate a visual asset from a brief
    Visual {
        /// Description of the visual
        brief: String,
    },
    /// Show learned performance records
    Metrics,
    /// Show or change the routing configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Rate a provider's result for a task (0.0 to 1.0)
    Feedback {
        /// Task identifier
        task: String,
        /// Provider (quality or fast)
        provider: String,
        /// Satisfaction score
        score: f64,
    },
    /// Show spend against the daily and monthly budgets
    Budget,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the active routing configuration
    Show {
        /// Also list the configuration files that were consulted
        #[arg(long)]
        sources: bool,
    },
    /// Apply a JSON patch, e.g. '{"cost_optimization": false}'
    Set {
        /// Partial configuration as JSON
        patch: String,
    },
}

/// Flags that shape a routing decision
#[derive(Args, Debug, Default, Clone)]
pub struct RoutingArgs {
    /// Force a provider (quality, fast or auto)
    #[arg(long, value_name = "PROVIDER")]
    pub force: Option<ProviderChoice>,

    /// Favour the cheaper provider
    #[arg(long)]
    pub cost_priority: bool,

    /// Favour the more capable provider
    #[arg(long)]
    pub quality_priority: bool,
}

impl RoutingArgs {
    /// Flags left unset fall back to the router configuration.
    pub fn to_options(&self) -> RoutingOptions {
        let mut options = RoutingOptions::new();
        if let Some(force) = self.force {
            options = options.force(force);
        }
        if self.cost_priority {
            options = options.with_cost_priority(true);
        }
        if self.quality_priority {
            options = options.with_quality_priority(true);
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use insight_domain::ProviderId;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_route_flags_become_options() {
        let cli = Cli::parse_from([
            "insight-router",
            "route",
            "market-analysis",
            "--force",
            "fast",
            "--cost-priority",
        ]);
        let Command::Route { task, routing } = cli.command else {
            panic!("expected route command");
        };
        assert_eq!(task, "market-analysis");
        let options = routing.to_options();
        assert_eq!(options.force_provider, Some(ProviderChoice::Provider(ProviderId::Fast)));
        assert_eq!(options.cost_priority, Some(true));
        assert_eq!(options.quality_priority, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["insight-router", "budget", "-o", "json", "--ephemeral", "-vv"]);
        assert_eq!(cli.output, Some(OutputArg::Json));
        assert!(cli.ephemeral);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_config_set_takes_patch() {
        let cli = Cli::parse_from(["insight-router", "config", "set", r#"{"quality_first":true}"#]);
        assert!(matches!(
            cli.command,
            Command::Config {
                action: ConfigAction::Set { .. }
            }
        ));
    }
}
