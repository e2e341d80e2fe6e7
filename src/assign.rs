//! Asking who bought each item and collecting their shares.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use shopsplit_core::{Basket, LineItem, PersonId};
use shopsplit_render::{BasicRenderer, RenderError, Renderer};

/// Reply to "who bought this item?".
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Answer {
    /// Zero or more purchasers. An empty list leaves the item unassigned.
    Purchasers(Vec<PersonId>),
    /// The user interrupted the assignment.
    Interrupted,
}

pub trait PurchaserSource {
    fn ask(&mut self, item: &LineItem<'_>) -> io::Result<Answer>;
}

/// Result of an assignment run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assignment {
    pub basket: Basket,
    /// Number of items the source was asked about.
    pub prompted: usize,
    /// Whether the user stopped before every item was assigned.
    pub interrupted: bool,
}

/// Asks `source` about every cost-bearing item in order and records the answers.
///
/// An interrupt stops the loop; shares recorded so far are kept and returned.
pub fn assign<S>(items: &[LineItem<'_>], source: &mut S) -> io::Result<Assignment>
where
    S: PurchaserSource + ?Sized,
{
    let mut assignment = Assignment::default();

    for item in items {
        if !item.is_cost_bearing() {
            tracing::debug!("skipping free item '{}'", item.description);
            continue;
        }

        assignment.prompted += 1;
        match source.ask(item)? {
            Answer::Purchasers(purchasers) => {
                if purchasers.is_empty() {
                    tracing::info!("nobody assigned to '{}'", item.description);
                }
                assignment.basket.record_item(item, &purchasers);
            }
            Answer::Interrupted => {
                tracing::info!(
                    "assignment interrupted after {} of {} items",
                    assignment.prompted - 1,
                    items.len()
                );
                assignment.interrupted = true;
                break;
            }
        }
    }

    Ok(assignment)
}

/// Flag raised from outside the prompt, typically by a Ctrl-C handler.
#[derive(Clone, Debug, Default)]
pub struct Interrupt(Arc<AtomicBool>);

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raises the flag and returns whether it was already raised.
    pub fn trigger(&self) -> bool {
        self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_triggered(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Prompts on `output` and reads whitespace separated identifiers from `input`, one line per item.
///
/// End of input counts as an interrupt, as does a raised [`Interrupt`] flag. A line read after
/// the flag was raised is discarded.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    renderer: BasicRenderer,
    interrupt: Interrupt,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self::with_interrupt(input, output, Interrupt::new())
    }

    pub fn with_interrupt(input: R, output: W, interrupt: Interrupt) -> Self {
        TerminalPrompt {
            input,
            output,
            renderer: BasicRenderer::new(),
            interrupt,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> PurchaserSource for TerminalPrompt<R, W> {
    fn ask(&mut self, item: &LineItem<'_>) -> io::Result<Answer> {
        if self.interrupt.is_triggered() {
            return Ok(Answer::Interrupted);
        }

        write!(self.output, "Who bought   ")?;
        self.renderer
            .render(item, &mut self.output)
            .map_err(|err| match err {
                RenderError::Io(err) => err,
            })?;
        write!(self.output, "   ? ")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        if read == 0 || self.interrupt.is_triggered() {
            if !line.ends_with('\n') {
                writeln!(self.output)?;
            }
            return Ok(Answer::Interrupted);
        }
        Ok(Answer::Purchasers(PersonId::split_list(&line)))
    }
}
