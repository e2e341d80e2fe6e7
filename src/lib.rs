//! Splits an online shop order between the people who bought each item.
//!
//! The order confirmation is parsed by [`shopsplit_parser`], items are handed out through a
//! [`PurchaserSource`] and the resulting bill is rendered with [`shopsplit_render`].

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Local;
use shopsplit_core::FinalBill;
use shopsplit_render::{render, BasicRenderer, Renderer};

pub mod assign;
pub mod config;
pub mod receipts;
pub mod store;

pub use assign::{assign, Answer, Assignment, Interrupt, PurchaserSource, TerminalPrompt};
pub use config::{Config, ConfigError};
pub use receipts::{latest_receipt, ReceiptLookupError};
pub use store::{BillStore, NoopStore};

const INTRO: &str = "\
Enter the identifier(s) of whoever bought each item: a name, initials or a number, as long as you
keep using the same one. Separate several identifiers with a space. Press Ctrl-C and then Enter,
or Ctrl-D, to stop early.
";

/// The receipt named on the command line, or the newest one in the configured directory.
pub fn resolve_receipt(config: &Config, receipt: Option<&Path>) -> anyhow::Result<PathBuf> {
    match receipt {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(latest_receipt(&config.receipts_dir)?),
    }
}

/// Parses the receipt at `receipt_path`, asks who bought what on `input`/`output` and prints
/// the amount each person owes.
///
/// Stopping the prompts early, by end of input or by raising `interrupt`, still prints and
/// stores the bill for the items assigned so far.
pub fn run<R, W>(
    receipt_path: &Path,
    input: R,
    mut output: W,
    interrupt: Interrupt,
    store: &mut dyn BillStore,
) -> anyhow::Result<FinalBill>
where
    R: BufRead,
    W: Write,
{
    tracing::info!("reading receipt {}", receipt_path.display());
    let text = fs::read_to_string(receipt_path)
        .with_context(|| format!("could not read receipt {}", receipt_path.display()))?;
    let receipt = shopsplit_parser::parse(&text)
        .with_context(|| format!("could not parse receipt {}", receipt_path.display()))?;
    tracing::info!("parsed {} items", receipt.items.len());
    match receipt.order.delivery_date.infer_year(Local::now().date_naive()) {
        Some(date) => tracing::info!("delivery on {}", date),
        None => tracing::warn!(
            "{} does not fall on that weekday in any nearby year",
            receipt.order.delivery_date
        ),
    }

    let renderer = BasicRenderer::new();
    renderer.render(&receipt.order, &mut output)?;
    writeln!(output)?;
    write!(output, "{}", INTRO)?;
    writeln!(output)?;

    let mut prompt = TerminalPrompt::with_interrupt(input, &mut output, interrupt);
    let assignment = assign(&receipt.items, &mut prompt)?;
    if assignment.interrupted {
        tracing::warn!("stopped early, the bill only covers items assigned so far");
    }

    let bill = assignment.basket.finalize();
    writeln!(output)?;
    render(&mut output, &bill)?;
    output.flush()?;

    store
        .save(&receipt.order, &bill)
        .context("could not store the bill")?;
    Ok(bill)
}
