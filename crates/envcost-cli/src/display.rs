use colored::*;
use envcost_core::config::CostConfig;
use envcost_core::insights::rank_descending;
use envcost_core::report::{format_usd, ComparisonReport};

const AMOUNT_WIDTH: usize = 14;

/// Print a full comparison report to the terminal.
pub fn print_comparison(report: &ComparisonReport) {
    println!();
    println!(
        "{}",
        format!(
            " envcost v{} — Comparing {} environment(s)",
            env!("CARGO_PKG_VERSION"),
            report.environment_count()
        )
        .bold()
    );
    println!();

    print_totals_section(report);

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    print_line_items_section(report);

    println!(" {}", "=".repeat(60).dimmed());
    println!();

    println!(" {}", "Insights".bold().underline());
    for recommendation in &report.insights.recommendations {
        println!(" {} {}", "|-".dimmed(), recommendation);
    }
    println!();
}

fn print_totals_section(report: &ComparisonReport) {
    println!(" {}", "Environment Totals".bold().underline());

    let name_width = report
        .environments
        .iter()
        .map(|env| env.len())
        .max()
        .unwrap_or(0)
        .max("TOTAL".len());

    let annuals: Vec<f64> = report
        .environments
        .iter()
        .map(|env| report.totals.per_env[env].annual_total)
        .collect();
    let ranks = rank_descending(&annuals);

    for (i, env) in report.environments.iter().enumerate() {
        let totals = &report.totals.per_env[env];
        // Pad before coloring: ANSI escapes would break the alignment.
        let annual = format!("{:>AMOUNT_WIDTH$}", format_usd(totals.annual_total));
        let annual = if ranks[i] == 0 && report.environment_count() > 1 {
            annual.yellow().bold().to_string()
        } else {
            annual
        };
        println!(
            " {} {:<name_width$}  {:>AMOUNT_WIDTH$}/mo  {}/yr",
            "|-".dimmed(),
            env,
            format_usd(totals.monthly_total),
            annual,
        );
    }

    let grand = format!("{:>AMOUNT_WIDTH$}", format_usd(report.grand_annual_total()));
    println!(
        " {} {:<name_width$}  {:>AMOUNT_WIDTH$}    {}/yr",
        "|-".dimmed(),
        "TOTAL",
        "",
        grand.green().bold(),
    );
    println!();
}

fn print_line_items_section(report: &ComparisonReport) {
    println!(" {}", "Line Items".bold().underline());

    let labels = report.line_item_labels();
    let label_width = labels
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(0)
        .max("Line item".len());
    let col_widths: Vec<usize> = report
        .environments
        .iter()
        .map(|env| env.len().max(AMOUNT_WIDTH))
        .collect();

    let mut header = format!(" {:<label_width$}", "Line item");
    for (env, &width) in report.environments.iter().zip(&col_widths) {
        header.push_str(&format!("  {:>width$}", env));
    }
    println!("{}", header.bold());

    for label in &labels {
        let values: Vec<Option<f64>> = report
            .environments
            .iter()
            .map(|env| {
                let breakdown = &report.breakdowns[env];
                breakdown.contains(label).then(|| breakdown.get(label))
            })
            .collect();
        let amounts: Vec<f64> = values.iter().map(|v| v.unwrap_or(0.0)).collect();
        let ranks = rank_descending(&amounts);

        let mut row = format!(" {:<label_width$}", label);
        for ((value, rank), width) in values.iter().zip(ranks).zip(&col_widths) {
            let cell = match value {
                Some(amount) => format!("{:>width$}", format_usd(*amount), width = *width),
                None => format!("{:>width$}", "-", width = *width),
            };
            // Highlight the largest nonzero amount in each row.
            let highlight = matches!(value, Some(amount) if *amount > 0.0)
                && rank == 0
                && report.environment_count() > 1;
            let cell = if highlight {
                cell.yellow().to_string()
            } else {
                cell
            };
            row.push_str("  ");
            row.push_str(&cell);
        }
        println!("{}", row);
    }
    println!();
}

/// Print the line-item detail for a single environment.
pub fn print_breakdown(env: &str, report: &ComparisonReport) {
    let breakdown = &report.breakdowns[env];
    let totals = &report.totals.per_env[env];

    println!();
    println!(
        "{}",
        format!(
            " envcost v{} — {} breakdown",
            env!("CARGO_PKG_VERSION"),
            env
        )
        .bold()
    );
    println!();

    let label_width = breakdown.labels().map(str::len).max().unwrap_or(0);
    for (label, amount) in breakdown.iter() {
        println!(
            " {} {:<label_width$}  {:>AMOUNT_WIDTH$}",
            "|-".dimmed(),
            label,
            format_usd(amount),
        );
    }

    println!();
    println!(
        " {} Monthly usage total:   {:>AMOUNT_WIDTH$}",
        "|-".dimmed(),
        format_usd(totals.monthly_total)
    );
    println!(
        " {} Fixed annual items:    {:>AMOUNT_WIDTH$}",
        "|-".dimmed(),
        format_usd(totals.fixed_annual_total)
    );
    let annual = format!("{:>AMOUNT_WIDTH$}", format_usd(totals.annual_total));
    println!(
        " {} Annual total:          {}",
        "|-".dimmed(),
        annual.green().bold()
    );
    println!();
}

/// Print the pricing model with the effective rates.
pub fn print_formulas(config: &CostConfig) {
    let rates = &config.rates;

    println!();
    println!("{}", " envcost — Pricing Model".bold());
    println!();

    println!(" {}", "CodePipeline".bold().underline());
    println!(
        " {} Executions/month = pipelines x executions/day x 30",
        "|-".dimmed()
    );
    println!(
        " {} Transitions: ${} per stage transition",
        "|-".dimmed(),
        rates.transition_rate
    );
    println!(
        " {} Minutes: ${} per metered minute past {} free",
        "|-".dimmed(),
        rates.minute_rate,
        rates.free_minutes
    );
    println!();

    println!(" {}", "CodeBuild".bold().underline());
    println!(
        " {} ${} per build-second (duration given in minutes x 60)",
        "|-".dimmed(),
        rates.build_second_rate
    );
    println!();

    println!(" {}", "CodeArtifact".bold().underline());
    println!(
        " {} Storage: ${}/GB past {} GB free",
        "|-".dimmed(),
        rates.storage_rate,
        rates.free_storage_gb
    );
    println!(
        " {} Requests: ${} per request past {} free",
        "|-".dimmed(),
        rates.request_rate,
        rates.free_requests
    );
    println!(
        " {} Transfer: ${}/GB intra-region, ${}/GB outbound",
        "|-".dimmed(),
        rates.intra_transfer_rate,
        rates.outbound_transfer_rate
    );
    println!(
        " {} Base fee: {} per month",
        "|-".dimmed(),
        format_usd(rates.artifact_base_fee)
    );
    println!();

    println!(
        " {}",
        format!(
            "Fixed annual items ({} only)",
            config.distinguished_environment
        )
        .bold()
        .underline()
    );
    if config.fixed_annual.is_empty() {
        println!(" {} (none configured)", "|-".dimmed());
    }
    for (label, amount) in &config.fixed_annual {
        println!(
            " {} {}: {} per year",
            "|-".dimmed(),
            label,
            format_usd(*amount)
        );
    }
    println!();
}
