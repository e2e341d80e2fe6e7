use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

use super::DeliveryDate;

/// Order-level figures read from the confirmation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct OrderMetadata {
    pub delivery_date: DeliveryDate,

    /// Delivery charge, zero or positive.
    pub delivery_cost: Decimal,

    /// Voucher savings, zero when the order used none. Normally negative.
    #[builder(default)]
    pub voucher_savings: Decimal,

    /// Total as derived by [`crate::reconcile`].
    pub total: Decimal,
}

impl OrderMetadata {
    pub fn has_voucher(&self) -> bool {
        !self.voucher_savings.is_zero()
    }
}
