use rust_decimal::{Decimal, RoundingStrategy};
use shopsplit_core::*;
use std::{io, io::Write};
use thiserror::Error;


/// Currency marker printed in front of every amount.
pub const CURRENCY: &str = "£";

#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct BasicRenderer {}

impl BasicRenderer {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Writes one `<person> spent £<amount>` line per person who owes something.
pub fn render<W: Write>(w: &mut W, bill: &FinalBill) -> Result<(), RenderError> {
    BasicRenderer::default().render(bill, w)
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("an io error occurred")]
    Io(#[from] io::Error),
}

pub trait Renderer<T, W: Write> {
    type Error;
    fn render(&self, renderable: T, write: &mut W) -> Result<(), Self::Error>;
}

/// Rounds half away from zero and pins the scale so that `4.5` prints as `4.50`.
pub fn pounds(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

impl<W: Write> Renderer<Decimal, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, amount: Decimal, write: &mut W) -> Result<(), Self::Error> {
        write!(write, "{}{}", CURRENCY, pounds(amount))?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a FinalBill, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, bill: &'a FinalBill, write: &mut W) -> Result<(), Self::Error> {
        for (person, total) in bill.payers() {
            write!(write, "{} spent ", person)?;
            self.render(*total, write)?;
            writeln!(write)?;
        }
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a OrderMetadata, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, order: &'a OrderMetadata, write: &mut W) -> Result<(), Self::Error> {
        write!(write, "Delivery on {}: total ", order.delivery_date)?;
        self.render(order.total, write)?;
        write!(write, " (delivery ")?;
        self.render(order.delivery_cost, write)?;
        if order.has_voucher() {
            write!(write, ", vouchers ")?;
            self.render(order.voucher_savings, write)?;
        }
        writeln!(write, ")")?;
        Ok(())
    }
}

impl<'a, W: Write> Renderer<&'a LineItem<'_>, W> for BasicRenderer {
    type Error = RenderError;
    fn render(&self, item: &'a LineItem<'_>, write: &mut W) -> Result<(), Self::Error> {
        write!(write, "{} {}", item.quantity, item.description)?;
        Ok(())
    }
}
