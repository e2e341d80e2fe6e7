//! Where finished bills go once everyone has been assigned their items.

use shopsplit_core::{FinalBill, OrderMetadata};

pub trait BillStore {
    fn save(&mut self, order: &OrderMetadata, bill: &FinalBill) -> anyhow::Result<()>;
}

/// Keeps nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopStore;

impl BillStore for NoopStore {
    fn save(&mut self, order: &OrderMetadata, bill: &FinalBill) -> anyhow::Result<()> {
        tracing::debug!(
            "not storing bill for {} delivery ({} people)",
            order.delivery_date,
            bill.len()
        );
        Ok(())
    }
}
