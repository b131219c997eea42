//! Command-line access to the portfolio.

use std::io::Write;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    app::{
        Portfolio,
        utils::{expand_path, format_amount, format_percent},
    },
    db::HoldingStore,
    error::{ErrorKind, PortfolioError},
    models::{HoldingView, NewHolding, PortfolioSummary},
};

/// Track holdings and report their value, ROI and share of the portfolio
#[derive(Debug, Parser)]
#[command(name = "portfolio-tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file (overrides PORTFOLIO_DB)
    #[arg(short, long, global = true)]
    pub database: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a holding
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        quantity: Decimal,
        #[arg(short, long)]
        purchase_price: Decimal,
        #[arg(short, long)]
        current_price: Decimal,
    },
    /// List all holdings with their derived values
    List,
    /// Delete a holding by id
    Delete { id: i64 },
    /// Show the portfolio summary
    Summary,
    /// Show the holding with the best ROI
    Top,
    /// Import holdings from a CSV file (name,quantity,purchase_price,current_price)
    Import { path: String },
    /// Open the terminal UI
    Tui,
}

/// Runs every command except [`Command::Tui`], writing the result to `out`.
pub async fn execute<S, W>(
    portfolio: &Portfolio<S>,
    command: Command,
    json: bool,
    out: &mut W,
) -> Result<()>
where
    S: HoldingStore,
    W: Write,
{
    match command {
        Command::Add {
            name,
            quantity,
            purchase_price,
            current_price,
        } => {
            let candidate = NewHolding::new(name, quantity, purchase_price, current_price);
            let view = portfolio.add_holding(candidate).await?;
            if json {
                write_json(out, &view)?;
            } else {
                writeln!(out, "Added holding {} ({})", view.id(), view.name())?;
            }
        }
        Command::List => {
            let views = portfolio.holdings().await?;
            if json {
                write_json(out, &views)?;
            } else {
                write_holdings(out, &views)?;
            }
        }
        Command::Delete { id } => {
            portfolio.delete_holding(id).await?;
            if !json {
                writeln!(out, "Deleted holding {}", id)?;
            }
        }
        Command::Summary => {
            let summary = portfolio.summary().await?;
            if json {
                write_json(out, &summary)?;
            } else {
                write_summary(out, &summary)?;
            }
        }
        Command::Top => {
            let view = portfolio.top_holding().await?;
            if json {
                write_json(out, &view)?;
            } else {
                write_holdings(out, std::slice::from_ref(&view))?;
            }
        }
        Command::Import { path } => {
            let report = portfolio.import_holdings(&expand_path(&path)).await?;
            if json {
                write_json(
                    out,
                    &serde_json::json!({
                        "imported": report.imported(),
                        "skipped": report.skipped(),
                    }),
                )?;
            } else {
                writeln!(
                    out,
                    "Imported {} holdings, skipped {}",
                    report.imported(),
                    report.skipped()
                )?;
            }
        }
        Command::Tui => {
            return Err(anyhow::anyhow!("The terminal UI is started from main"));
        }
    }

    Ok(())
}

/// Process exit code for an error returned by [`execute`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<PortfolioError>().map(PortfolioError::kind) {
        Some(ErrorKind::InvalidInput) => 2,
        Some(ErrorKind::NotFound) => 3,
        _ => 1,
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_holdings<W: Write>(out: &mut W, views: &[HoldingView]) -> Result<()> {
    if views.is_empty() {
        writeln!(out, "No holdings.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>5}  {:<24} {:>14} {:>14} {:>14} {:>16} {:>16} {:>10} {:>8}",
        "ID", "Name", "Quantity", "Purchase", "Price", "Value", "Invested", "ROI", "Share"
    )?;

    for view in views {
        writeln!(
            out,
            "{:>5}  {:<24} {:>14} {:>14} {:>14} {:>16} {:>16} {:>10} {:>8}",
            view.id(),
            view.name(),
            view.quantity().normalize().to_string(),
            format_amount(view.purchase_price()),
            format_amount(view.current_price()),
            format_amount(view.current_value()),
            format_amount(view.invested_value()),
            format_percent(view.roi()),
            format_percent(view.portfolio_share()),
        )?;
    }

    Ok(())
}

fn write_summary<W: Write>(out: &mut W, summary: &PortfolioSummary) -> Result<()> {
    writeln!(out, "Total invested:  {}", summary.total_invested_value())?;
    writeln!(out, "Total value:     {}", summary.total_current_value())?;
    writeln!(out, "Total profit:    {}", summary.total_profit())?;
    writeln!(out, "Average ROI:     {}%", summary.average_roi())?;
    writeln!(
        out,
        "Largest holding: {}",
        summary.largest_asset_name().as_deref().unwrap_or("-")
    )?;
    Ok(())
}
