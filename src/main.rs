//! Debt Payoff CLI
//!
//! Command-line interface for running payoff projections from a debts CSV

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use debt_payoff::{
    debt::{load_debts, DEFAULT_DEBTS_PATH},
    payoff::{Clock, SystemClock},
    DebtSummary, PayoffConfig, PayoffPlan, Projection, Scenario, ScenarioRunner, Strategy, YearMonth,
};
use log::info;
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Months printed to the console before truncating
const CONSOLE_MONTHS: usize = 24;

#[derive(Parser, Debug)]
#[command(name = "debt-payoff", version, about = "Project avalanche and snowball debt payoff plans")]
struct Cli {
    /// Debts CSV (id,name,debt_type,balance,interest_rate,minimum_payment)
    #[arg(long, global = true, default_value = DEFAULT_DEBTS_PATH)]
    debts: PathBuf,

    /// Month to project from, YYYY-MM (default: current month)
    #[arg(long, global = true)]
    start: Option<YearMonth>,

    /// Simulation cap in months (default: PAYOFF_MAX_MONTHS or 600)
    #[arg(long, global = true)]
    max_months: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a single payoff plan
    Plan {
        /// avalanche or snowball
        #[arg(long, default_value = "avalanche")]
        strategy: Strategy,

        /// Extra monthly payment on top of minimums
        #[arg(long, default_value = "0")]
        extra: Decimal,

        /// Print the full plan as JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Write the monthly projection to this CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare strategies and the effect of an extra payment
    Compare {
        #[arg(long, default_value = "0")]
        extra: Decimal,
    },

    /// Project one plan per extra payment amount
    Sweep {
        #[arg(long, default_value = "avalanche")]
        strategy: Strategy,

        /// Comma-separated extra payments
        #[arg(long, value_delimiter = ',', default_value = "0,50,100,250,500")]
        extras: Vec<Decimal>,
    },

    /// Totals and minimum-only debt-free dates
    Summary,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

/// Execute one command; only the command's report is written to `out`
fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = PayoffConfig::from_env().with_max_months(cli.max_months);
    let start = cli.start.unwrap_or_else(|| SystemClock.current_month());
    let runner = ScenarioRunner::new(config, start);

    let debts = load_debts(&cli.debts)?;
    info!("Loaded {} debts from {}", debts.len(), cli.debts.display());

    match cli.command {
        Command::Plan { strategy, extra, json, output } => {
            let plan = runner.run(&debts, Scenario::new(strategy, extra))?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&plan)?)?;
            } else {
                print_plan(out, &plan)?;
            }
            if let Some(path) = output {
                write_projection_csv(&path, &plan.projection)?;
                info!("Monthly projection written to: {}", path.display());
            }
        }

        Command::Compare { extra } => {
            let strategies = runner.compare_strategies(&debts, extra)?;
            writeln!(out, "\nStrategy comparison (extra ${}):", extra)?;
            print_plan_header(out)?;
            print_plan_row(out, &strategies.avalanche.strategy.to_string(), &strategies.avalanche.projection)?;
            print_plan_row(out, &strategies.snowball.strategy.to_string(), &strategies.snowball.projection)?;
            writeln!(out, "  Avalanche saves ${} in interest", strategies.avalanche_interest_advantage)?;

            let baseline = runner.compare_extra_payment(&debts, Strategy::Avalanche, extra)?;
            writeln!(out, "\nExtra payment vs minimums only (avalanche):")?;
            match baseline.months_saved {
                Some(months) => writeln!(out, "  Months saved: {}", months)?,
                None => writeln!(out, "  Months saved: n/a (not paid off within cap)")?,
            }
            writeln!(out, "  Interest saved: ${}", baseline.interest_saved)?;
        }

        Command::Sweep { strategy, extras } => {
            let plans = runner.sweep_extra_payments(&debts, strategy, &extras)?;
            writeln!(out, "\nExtra payment sweep ({}):", strategy)?;
            print_plan_header(out)?;
            for plan in &plans {
                print_plan_row(out, &format!("+${}", plan.projection.extra_payment), &plan.projection)?;
            }
        }

        Command::Summary => {
            let summary = DebtSummary::compute(&runner, &debts)?;
            print_summary(out, &summary)?;
        }
    }

    Ok(())
}

fn label<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "never".to_string())
}

fn print_plan_header(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:>12} {:>8} {:>10} {:>14} {:>14}", "", "Months", "Debt-free", "Interest", "Total Paid")?;
    writeln!(out, "{}", "-".repeat(62))
}

fn print_plan_row(out: &mut impl Write, name: &str, projection: &Projection) -> io::Result<()> {
    writeln!(
        out,
        "{:>12} {:>8} {:>10} {:>14} {:>14}",
        name,
        label(projection.total_months),
        label(projection.debt_free_date),
        projection.total_interest_paid,
        projection.total_paid,
    )
}

fn print_plan(out: &mut impl Write, plan: &PayoffPlan) -> io::Result<()> {
    let projection = &plan.projection;
    writeln!(out, "\n{} plan, extra ${}/month", plan.strategy, projection.extra_payment)?;
    writeln!(out, "{}", "=".repeat(40))?;

    writeln!(out, "\nPayoff order:")?;
    writeln!(
        out,
        "{:>3} {:<24} {:>12} {:>8} {:>10} {:>10} {:>12}",
        "#", "Debt", "Balance", "APR", "Min", "Paid off", "Interest"
    )?;
    writeln!(out, "{}", "-".repeat(85))?;
    for detail in &projection.payoff_order {
        writeln!(
            out,
            "{:>3} {:<24} {:>12} {:>8} {:>10} {:>10} {:>12}",
            detail.order,
            detail.name,
            detail.original_balance,
            detail.interest_rate,
            detail.minimum_payment,
            label(detail.payoff_date),
            detail.total_interest,
        )?;
    }

    writeln!(out, "\n{:>5} {:>8} {:>12} {:>14}", "Month", "Date", "Paid", "Balance")?;
    writeln!(out, "{}", "-".repeat(42))?;
    for row in projection.monthly_projection.iter().take(CONSOLE_MONTHS) {
        writeln!(out, "{:>5} {:>8} {:>12} {:>14}", row.month, row.date, row.total_paid, row.total_balance)?;
    }
    if projection.monthly_projection.len() > CONSOLE_MONTHS {
        writeln!(out, "... ({} more months)", projection.monthly_projection.len() - CONSOLE_MONTHS)?;
    }

    writeln!(out, "\nSummary:")?;
    writeln!(out, "  Debt-free: {}", label(projection.debt_free_date))?;
    writeln!(out, "  Total Months: {}", label(projection.total_months))?;
    writeln!(out, "  Total Interest: ${}", projection.total_interest_paid)?;
    writeln!(out, "  Total Paid: ${}", projection.total_paid)?;
    for unpaid in projection.unpaid() {
        writeln!(out, "  Not paid off within cap: {}", unpaid.name)?;
    }
    Ok(())
}

fn print_summary(out: &mut impl Write, summary: &DebtSummary) -> io::Result<()> {
    writeln!(out, "\nDebt summary:")?;
    writeln!(out, "  Debts: {}", summary.debt_count)?;
    writeln!(out, "  Total Debt: ${}", summary.total_debt)?;
    writeln!(out, "  Monthly Minimums: ${}", summary.total_minimum_payments)?;
    match summary.weighted_average_interest_rate {
        Some(rate) => writeln!(out, "  Avg Interest Rate: {}%", rate)?,
        None => writeln!(out, "  Avg Interest Rate: n/a")?,
    }
    writeln!(
        out,
        "  Avalanche: {} months, debt-free {}",
        label(summary.avalanche_months),
        label(summary.debt_free_date_avalanche)
    )?;
    writeln!(
        out,
        "  Snowball:  {} months, debt-free {}",
        label(summary.snowball_months),
        label(summary.debt_free_date_snowball)
    )
}

/// One row per month: payment per debt, then totals
fn write_projection_csv(path: &Path, projection: &Projection) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create CSV file {}", path.display()))?;

    let names: Vec<String> = projection
        .monthly_projection
        .first()
        .map(|row| row.breakdown.keys().cloned().collect())
        .unwrap_or_default();

    let mut header = vec!["Month".to_string(), "Date".to_string()];
    header.extend(names.iter().cloned());
    header.push("TotalPaid".to_string());
    header.push("TotalBalance".to_string());
    writer.write_record(&header)?;

    for row in &projection.monthly_projection {
        let mut record = vec![row.month.to_string(), row.date.to_string()];
        for name in &names {
            record.push(row.breakdown.get(name).map(|v| v.to_string()).unwrap_or_default());
        }
        record.push(row.total_paid.to_string());
        record.push(row.total_balance.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run(cli, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_plan_json_output_is_only_json() {
        let out = run_args(&[
            "debt-payoff", "plan", "--json", "--strategy", "snowball", "--extra", "100",
            "--debts", DEFAULT_DEBTS_PATH, "--start", "2026-10",
        ]);
        let plan: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(plan["strategy"], "snowball");
        assert_eq!(plan["extra_payment"], "100.00");
        assert_eq!(plan["payoff_order"].as_array().map(Vec::len), Some(5));
    }

    #[test]
    fn test_summary_report() {
        let out = run_args(&["debt-payoff", "summary", "--debts", DEFAULT_DEBTS_PATH, "--start", "2026-10"]);
        assert!(out.starts_with("\nDebt summary:"), "{}", out);
        assert!(out.contains("  Debts: 5"), "{}", out);
        assert!(!out.contains("Loaded"), "{}", out);
    }

    #[test]
    fn test_out_of_range_start_rejected() {
        let result = Cli::try_parse_from(["debt-payoff", "summary", "--start", "2147483647-12"]);
        assert!(result.is_err());
    }
}
