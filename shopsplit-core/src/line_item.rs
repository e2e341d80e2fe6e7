use std::borrow::Cow;

use rust_decimal::Decimal;
use typed_builder::TypedBuilder;

/// Description given to the synthetic item carrying the delivery charge.
pub const DELIVERY_DESCRIPTION: &str = "Delivery costs";

/// Description given to the synthetic item carrying voucher savings.
pub const VOUCHER_DESCRIPTION: &str = "Voucher savings";

/// One purchased product as it appears on the receipt.
///
/// A receipt line lists the quantity first and the price for the whole quantity last:
///
/// ```text
/// 2 Bananas £1.00
/// ```
///
/// Here the quantity is `2` and the price is `1.00`, so one banana costs `0.50`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, TypedBuilder)]
pub struct LineItem<'a> {
    /// Product description, trimmed.
    #[builder(setter(into))]
    pub description: Cow<'a, str>,

    /// Price for the full quantity.
    pub price: Decimal,

    /// Number of units bought, never zero.
    #[builder(default = 1)]
    pub quantity: u32,
}

impl LineItem<'static> {
    /// Synthetic item that lets the delivery charge be assigned like a purchase.
    pub fn delivery(cost: Decimal) -> LineItem<'static> {
        LineItem {
            description: Cow::Borrowed(DELIVERY_DESCRIPTION),
            price: cost,
            quantity: 1,
        }
    }

    /// Synthetic item that lets voucher savings be assigned like a purchase.
    pub fn voucher(savings: Decimal) -> LineItem<'static> {
        LineItem {
            description: Cow::Borrowed(VOUCHER_DESCRIPTION),
            price: savings,
            quantity: 1,
        }
    }
}

impl LineItem<'_> {
    /// Cost attributed to each purchaser listed against this item.
    pub fn unit_share(&self) -> Decimal {
        self.price / Decimal::from(self.quantity.max(1))
    }

    /// Free items are never handed out to anyone.
    pub fn is_cost_bearing(&self) -> bool {
        !self.price.is_zero()
    }
}
