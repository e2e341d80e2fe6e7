use typed_builder::TypedBuilder;

pub use basket::{Basket, FinalBill};
pub use date::{DeliveryDate, DeliveryDateError};
pub use line_item::LineItem;
pub use order::OrderMetadata;
pub use person::{PersonId, PersonIdError};
pub use reconcile::{reconcile, subtotal};

pub mod basket;
mod date;
pub mod line_item;
pub mod order;
pub mod person;
pub mod reconcile;

/// Everything extracted from a single order confirmation.
///
/// `items` holds the purchased products in receipt order, followed by the synthetic delivery
/// and voucher items.
#[derive(Clone, Debug, PartialEq, TypedBuilder)]
pub struct Receipt<'a> {
    pub order: OrderMetadata,
    pub items: Vec<LineItem<'a>>,
}

impl<'a> Receipt<'a> {
    /// Splits the receipt into its order metadata and line items.
    pub fn into_parts(self) -> (OrderMetadata, Vec<LineItem<'a>>) {
        (self.order, self.items)
    }
}
