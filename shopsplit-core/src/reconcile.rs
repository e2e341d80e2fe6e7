//! Ties the extracted line items to the order total.

use rust_decimal::Decimal;

use super::LineItem;

/// Sum of all item prices, synthetic delivery and voucher items included.
pub fn subtotal(items: &[LineItem<'_>]) -> Decimal {
    items.iter().map(|item| item.price).sum()
}

/// Derives the order total from the items, voucher savings and delivery cost.
///
/// Delivery and voucher amounts are also present in `items` as synthetic entries, so they are
/// counted twice here.
pub fn reconcile(
    items: &[LineItem<'_>],
    voucher_savings: Decimal,
    delivery_cost: Decimal,
) -> Decimal {
    subtotal(items) + voucher_savings + delivery_cost
}
