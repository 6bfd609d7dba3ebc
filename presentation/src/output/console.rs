//! Console output formatter for router results

use colored::Colorize;
use insight_application::MultiProviderInsight;
use insight_domain::util::truncate_str;
use insight_domain::{
    BudgetStatus, ConsensusResult, ExecutionOutcome, PatchReport, PerformanceRecord,
    PeriodStatus, RecommendationSource, RouterConfig, RoutingDecision, RoutingReason,
    TaskDefinition, VisualAsset,
};
use serde::Serialize;

/// Formats router results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Turn off ANSI colors for all subsequent output
    pub fn disable_color() {
        colored::control::set_override(false);
    }

    /// Format any result as pretty JSON
    pub fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn format_tasks(tasks: &[TaskDefinition]) -> String {
        let mut output = Self::header("Task Catalogue");
        output.push('\n');

        for task in tasks {
            output.push_str(&format!(
                "{:<20} {:<8} {:<8} {}\n",
                task.id.bold(),
                task.complexity.as_str(),
                task.primary_provider.to_string().yellow(),
                task.description.dimmed()
            ));
        }
        output
    }

    pub fn format_decision(task_id: &str, decision: &RoutingDecision) -> String {
        let detail = match decision.reason {
            RoutingReason::Scored { quality, fast } => {
                format!("scored (quality {:.3}, fast {:.3})", quality, fast)
            }
            other => other.as_str().replace('_', " "),
        };
        format!(
            "{} {} {}\n{} {}\n",
            task_id.bold(),
            "->".cyan(),
            decision.provider.to_string().green().bold(),
            "Reason:".dimmed(),
            detail
        )
    }

    /// Format a single-provider outcome
    pub fn format_outcome(outcome: &ExecutionOutcome) -> String {
        let mut output = String::new();

        let title = format!("── {} ──", outcome.provider_id);
        if !outcome.succeeded {
            output.push_str(&format!(
                "{}\nError: {}\n",
                title.red().bold(),
                outcome.error_detail.as_deref().unwrap_or("Unknown")
            ));
            output.push_str(&Self::outcome_stats(outcome));
            return output;
        }

        output.push_str(&format!("{}\n{}\n", title.yellow().bold(), outcome.analysis_text));

        if !outcome.recommendations.is_empty() {
            output.push_str(&format!("\n{}\n", "Recommendations:".cyan().bold()));
            for rec in &outcome.recommendations {
                output.push_str(&format!("  * {}\n", rec));
            }
        }

        output.push_str(&Self::outcome_stats(outcome));
        output
    }

    /// Format the result of a dual-provider run
    pub fn format_insight(insight: &MultiProviderInsight) -> String {
        match insight {
            MultiProviderInsight::Consensus(result) => Self::format_consensus(result),
            MultiProviderInsight::Partial { outcome, failure } => {
                let mut output = Self::header("Partial Result");
                output.push_str(&format!(
                    "\n{} {} failed: {}\n\n",
                    "!".yellow().bold(),
                    failure.provider_id,
                    failure.error_detail.as_deref().unwrap_or("Unknown")
                ));
                output.push_str(&Self::format_outcome(outcome));
                output.push_str(&Self::footer());
                output
            }
        }
    }

    pub fn format_consensus(result: &ConsensusResult) -> String {
        let mut output = Self::header("Consensus");
        output.push('\n');

        output.push_str(&format!(
            "{} {:.0}%   {} {:.0}%\n",
            "Agreement:".cyan().bold(),
            result.agreement * 100.0,
            "Confidence:".cyan().bold(),
            result.confidence * 100.0
        ));

        for outcome in result.outcome_a.iter().chain(result.outcome_b.iter()) {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", outcome.provider_id).yellow().bold(),
                outcome.analysis_text
            ));
        }

        if !result.merged_recommendations.is_empty() {
            output.push_str(&Self::section_header("Recommendations"));
            for rec in &result.merged_recommendations {
                let tag = match rec.source {
                    RecommendationSource::Agreed => "[agreed]".green().bold(),
                    RecommendationSource::Only(provider) => format!("[{}]", provider).dimmed(),
                };
                output.push_str(&format!("  {} {}\n", tag, rec.text));
            }
        }

        let costs = &result.cost_comparison;
        output.push_str(&format!(
            "\n{} quality ${:.4}  fast ${:.4}  delta ${:.4}\n",
            "Cost:".dimmed(),
            costs.cost_a,
            costs.cost_b,
            costs.delta
        ));
        output.push_str(&Self::footer());
        output
    }

    pub fn format_records(records: &[PerformanceRecord]) -> String {
        if records.is_empty() {
            return format!("{}\n", "No performance history yet.".dimmed());
        }

        let mut output = Self::header("Performance Records");
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:<8} {:>7} {:>9} {:>6} {:>9} {:>8} {:>7}\n",
            "task", "provider", "cost", "latency", "conf", "success", "rating", "samples"
        ));
        for record in records {
            output.push_str(&format!(
                "{:<20} {:<8} {:>7.4} {:>7.0}ms {:>6.2} {:>8.0}% {:>8.2} {:>7}\n",
                truncate_str(&record.task_id, 20),
                record.provider_id.to_string(),
                record.avg_cost,
                record.avg_response_time_ms,
                record.avg_confidence,
                record.success_rate * 100.0,
                record.user_satisfaction,
                record.samples
            ));
        }
        output
    }

    pub fn format_config(config: &RouterConfig) -> String {
        let mut output = Self::header("Router Configuration");
        output.push('\n');
        output.push_str(&format!("{:<20} {}\n", "default provider", config.default_provider));
        output.push_str(&format!("{:<20} {}\n", "cost optimization", config.cost_optimization));
        output.push_str(&format!("{:<20} {}\n", "quality first", config.quality_first));
        output.push_str(&format!(
            "{:<20} ${:.2} / day, ${:.2} / month\n",
            "budget", config.budget_limits.daily, config.budget_limits.monthly
        ));

        if !config.per_task_override.is_empty() {
            output.push_str(&format!("\n{}\n", "Overrides:".cyan().bold()));
            for (task, provider) in &config.per_task_override {
                output.push_str(&format!("  {} -> {}\n", task, provider));
            }
        }
        output
    }

    pub fn format_patch_report(report: &PatchReport) -> String {
        let mut output = if report.changed {
            format!("{} configuration updated\n", "v".green())
        } else {
            format!("{} configuration unchanged\n", "-".dimmed())
        };
        for task in &report.ignored_overrides {
            output.push_str(&format!(
                "  {} ignored override for unknown task '{}'\n",
                "!".yellow(),
                task
            ));
        }
        output
    }

    pub fn format_budget(status: &BudgetStatus) -> String {
        let mut output = Self::header("Budget");
        output.push('\n');
        output.push_str(&Self::period_line("daily", &status.daily));
        output.push_str(&Self::period_line("monthly", &status.monthly));
        output
    }

    pub fn format_visual(asset: &VisualAsset) -> String {
        format!(
            "{} {}\n{} ${:.4}\n",
            "Asset:".cyan().bold(),
            asset.asset_ref,
            "Cost:".dimmed(),
            asset.cost
        )
    }

    fn period_line(label: &str, period: &PeriodStatus) -> String {
        let spent = format!("${:.4}", period.spent);
        let spent = if period.exceeded {
            spent.red().bold()
        } else {
            spent.green()
        };
        format!(
            "{:<8} {} of ${:.2} (remaining ${:.4})\n",
            label, spent, period.limit, period.remaining
        )
    }

    fn outcome_stats(outcome: &ExecutionOutcome) -> String {
        format!(
            "\n{}\n",
            format!(
                "confidence {:.0}% | cost ${:.4} | {} tokens | {} ms",
                outcome.confidence * 100.0,
                outcome.cost_incurred,
                outcome.tokens_used,
                outcome.response_time_ms
            )
            .dimmed()
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
