use std::borrow::Cow;
use std::str::FromStr;

use lazy_static::lazy_static;
use regex::{Captures, Match, Regex};
use rust_decimal::Decimal;

use shopsplit_core as sc;

use error::{ParseError, ParseResult, ReceiptField};

pub mod error;

lazy_static! {
    /// `2 Bananas £1.00`: quantity, description, price for the whole quantity.
    static ref ITEM: Regex = Regex::new(r"^(\d{1,2}) (.+?)\s*£(\d{1,2}\.\d{2})\s*$").unwrap();
    static ref DELIVERY_DATE: Regex = Regex::new(r"^\s*Delivery date\s+(.*?)\s*$").unwrap();
    /// `Delivery £3.00`, also `Delivery charge: £3.00`. A label word needs the currency marker,
    /// so `Delivery time 10.00 - 11.00` is not a cost.
    static ref DELIVERY_COST: Regex = Regex::new(
        r"^\s*Delivery(?:\s+(?i:charge|cost)s?\s*:?\s*£|\s*:?\s*£?)(\d{1,2}\.\d{2})\b"
    )
    .unwrap();
    /// `Voucher Saving £-1.00`, the sign may also precede the currency marker.
    static ref VOUCHER: Regex =
        Regex::new(r"^\s*Voucher Savings?\s*:?\s*(-)?£?(-)?(\d{1,2}\.\d{2})\b").unwrap();
}

/// A value together with the line it was read from.
#[derive(Debug)]
struct Located<T> {
    value: T,
    line: usize,
}

#[derive(Debug, Default)]
struct ParseState<'i> {
    items: Vec<sc::LineItem<'i>>,
    delivery_date: Option<Located<sc::DeliveryDate>>,
    delivery_cost: Option<Located<Decimal>>,
    voucher_savings: Option<Located<Decimal>>,
}

impl<'i> ParseState<'i> {
    fn delivery_date(&mut self) -> ParseResult<sc::DeliveryDate> {
        self.delivery_date
            .take()
            .map(|located| located.value)
            .ok_or_else(|| ParseError::missing_field(ReceiptField::DeliveryDate))
    }

    fn delivery_cost(&mut self) -> ParseResult<Decimal> {
        self.delivery_cost
            .take()
            .map(|located| located.value)
            .ok_or_else(|| ParseError::missing_field(ReceiptField::DeliveryCost))
    }

    fn voucher_savings(&mut self) -> ParseResult<Decimal> {
        self.voucher_savings
            .take()
            .map(|located| located.value)
            .ok_or_else(|| ParseError::missing_field(ReceiptField::VoucherSavings))
    }
}

/// Only the first occurrence of a metadata line counts.
fn is_duplicate<T>(slot: &Option<Located<T>>, field: ReceiptField, line: usize) -> bool {
    match slot {
        Some(first) => {
            tracing::warn!(
                "ignoring duplicate {} at line {} (first seen at line {})",
                field,
                line,
                first.line
            );
            true
        }
        None => false,
    }
}

/// Parses an order confirmation into its metadata and line items.
///
/// Item lines have the form `<quantity> <description> £<price>`. The delivery date, delivery
/// cost and voucher savings lines are required. A synthetic delivery item is always appended to
/// the items, and a synthetic voucher item when the savings are not zero, so both can be assigned
/// to people like ordinary purchases.
pub fn parse(input: &str) -> ParseResult<sc::Receipt<'_>> {
    let mut state = ParseState::default();

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;

        if let Some(caps) = ITEM.captures(line) {
            state.items.push(line_item(line, line_no, &caps)?);
        } else if let Some(caps) = DELIVERY_DATE.captures(line) {
            if !is_duplicate(&state.delivery_date, ReceiptField::DeliveryDate, line_no) {
                let value = delivery_date(line, line_no, group(&caps, 1, line_no)?)?;
                state.delivery_date = Some(Located { value, line: line_no });
            }
        } else if let Some(caps) = DELIVERY_COST.captures(line) {
            if !is_duplicate(&state.delivery_cost, ReceiptField::DeliveryCost, line_no) {
                let value = decimal(line, line_no, group(&caps, 1, line_no)?)?;
                state.delivery_cost = Some(Located { value, line: line_no });
            }
        } else if let Some(caps) = VOUCHER.captures(line) {
            if !is_duplicate(&state.voucher_savings, ReceiptField::VoucherSavings, line_no) {
                let value = voucher(line, line_no, &caps)?;
                state.voucher_savings = Some(Located { value, line: line_no });
            }
        }
    }

    let delivery_date = state.delivery_date()?;
    let delivery_cost = state.delivery_cost()?;
    let voucher_savings = state.voucher_savings()?;

    let mut items = state.items;
    tracing::debug!("found {} line items", items.len());
    items.push(sc::LineItem::delivery(delivery_cost));
    if !voucher_savings.is_zero() {
        items.push(sc::LineItem::voucher(voucher_savings));
    }

    let total = sc::reconcile(&items, voucher_savings, delivery_cost);
    tracing::debug!(
        "delivery {} cost {} voucher {} total {}",
        delivery_date,
        delivery_cost,
        voucher_savings,
        total
    );

    let order = sc::OrderMetadata::builder()
        .delivery_date(delivery_date)
        .delivery_cost(delivery_cost)
        .voucher_savings(voucher_savings)
        .total(total)
        .build();
    Ok(sc::Receipt::builder().order(order).items(items).build())
}

fn group<'i>(caps: &Captures<'i>, index: usize, line_no: usize) -> ParseResult<Match<'i>> {
    caps.get(index).ok_or_else(|| {
        ParseError::format(format!("capture group {} did not match", index), (line_no, 1))
    })
}

/// 1-based (line, column) of a match, counting characters.
fn location(line: &str, line_no: usize, m: &Match<'_>) -> (usize, usize) {
    (line_no, line[..m.start()].chars().count() + 1)
}

fn line_item<'i>(
    line: &'i str,
    line_no: usize,
    caps: &Captures<'i>,
) -> ParseResult<sc::LineItem<'i>> {
    let quantity_match = group(caps, 1, line_no)?;
    let quantity = quantity_match.as_str().parse::<u32>().map_err(|err| {
        ParseError::format_with_source(
            "error while parsing quantity",
            location(line, line_no, &quantity_match),
            err,
        )
    })?;
    if quantity == 0 {
        return Err(ParseError::format(
            "quantity must be at least 1",
            location(line, line_no, &quantity_match),
        ));
    }
    let description = group(caps, 2, line_no)?.as_str().trim();
    let price = decimal(line, line_no, group(caps, 3, line_no)?)?;

    Ok(sc::LineItem::builder()
        .description(Cow::Borrowed(description))
        .price(price)
        .quantity(quantity)
        .build())
}

fn decimal(line: &str, line_no: usize, m: Match<'_>) -> ParseResult<Decimal> {
    Decimal::from_str(m.as_str()).map_err(|err| {
        ParseError::format_with_source(
            format!("error while parsing amount '{}'", m.as_str()),
            location(line, line_no, &m),
            err,
        )
    })
}

fn voucher(line: &str, line_no: usize, caps: &Captures<'_>) -> ParseResult<Decimal> {
    let amount = decimal(line, line_no, group(caps, 3, line_no)?)?;
    let negative = caps.get(1).is_some() || caps.get(2).is_some();
    let savings = if negative { -amount } else { amount };
    if savings > Decimal::ZERO {
        tracing::warn!(
            "voucher saving at line {} is positive ({}), it will increase the total",
            line_no,
            savings
        );
    }
    Ok(savings)
}

fn delivery_date(line: &str, line_no: usize, m: Match<'_>) -> ParseResult<sc::DeliveryDate> {
    sc::DeliveryDate::from_str(m.as_str()).map_err(|err| {
        ParseError::format_with_source(
            "error while parsing delivery date",
            location(line, line_no, &m),
            err,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use indoc::indoc;

    fn dec(num: i64) -> Decimal {
        Decimal::new(num, 2)
    }

    fn item(description: &'static str, price: i64, quantity: u32) -> sc::LineItem<'static> {
        sc::LineItem::builder()
            .description(description)
            .price(dec(price))
            .quantity(quantity)
            .build()
    }

    const BASIC: &str = indoc!(
        "
        Thanks for your order!
        Delivery date Monday 5 March
        2 Bananas £1.00
        1 Bread £2.00
        Delivery £3.00
        Voucher Saving £-1.00
        "
    );

    #[test]
    fn item_pattern() {
        assert!(ITEM.is_match("2 Bananas £1.00"));
        assert!(ITEM.is_match("12 Free range eggs (6 per pack) £12.50"));
        assert!(ITEM.is_match("1 Bread £2.00  "));

        assert!(!ITEM.is_match("123 Bananas £1.00"));
        assert!(!ITEM.is_match("2 Bananas £1.0"));
        assert!(!ITEM.is_match("2 Bananas £100.00"));
        assert!(!ITEM.is_match("2 Bananas 1.00"));
        assert!(!ITEM.is_match("Bananas £1.00"));
    }

    #[test]
    fn metadata_patterns() {
        assert!(DELIVERY_DATE.is_match("Delivery date Monday 5 March"));
        assert!(!DELIVERY_COST.is_match("Delivery date Monday 5 March"));
        assert!(DELIVERY_COST.is_match("Delivery £3.00"));
        assert!(DELIVERY_COST.is_match("  Delivery charge: £3.00"));
        assert!(DELIVERY_COST.is_match("Delivery 0.00"));
        assert!(DELIVERY_COST.is_match("Delivery Cost £3.00"));
        assert!(!DELIVERY_COST.is_match("1 Delivery bag £0.40"));
        assert!(!DELIVERY_COST.is_match("Delivery time 10.00 - 11.00"));
        assert!(!DELIVERY_COST.is_match("Delivery charge 3.00"));
        assert!(VOUCHER.is_match("Voucher Saving £-1.00"));
        assert!(VOUCHER.is_match("Voucher Savings -£12.00"));
        assert!(!VOUCHER.is_match("Voucher code WELCOME"));
    }

    #[test]
    fn basic_receipt() {
        let (order, items) = parse(BASIC).unwrap().into_parts();
        assert_eq!(
            items,
            vec![
                item("Bananas", 100, 2),
                item("Bread", 200, 1),
                item("Delivery costs", 300, 1),
                item("Voucher savings", -100, 1),
            ]
        );
        assert_eq!(order.delivery_date, "Monday 5 March".parse().unwrap());
        assert_eq!(order.delivery_cost, dec(300));
        assert_eq!(order.voucher_savings, dec(-100));
        assert_eq!(order.total, dec(700));
    }

    #[test]
    fn parse_is_deterministic() {
        assert_eq!(parse(BASIC).unwrap(), parse(BASIC).unwrap());
    }

    #[test]
    fn prices_keep_their_literal_value() {
        let receipt = parse(BASIC).unwrap();
        assert_eq!(receipt.items[0].price.to_string(), "1.00");
        assert_eq!(receipt.items[0].price.scale(), 2);
    }

    #[test]
    fn zero_voucher_adds_no_item() {
        let source = indoc!(
            "
            Delivery date Friday 9 March
            3 Apples £1.50
            Delivery £0.00
            Voucher Saving £0.00
            "
        );
        let (order, items) = parse(source).unwrap().into_parts();
        assert_eq!(items, vec![item("Apples", 150, 3), item("Delivery costs", 0, 1)]);
        assert!(!order.has_voucher());
        assert_eq!(order.total, dec(150));
    }

    #[test]
    fn voucher_sign_before_currency() {
        let source = indoc!(
            "
            Delivery date Friday 9 March
            Delivery £1.00
            Voucher Saving -£2.50
            "
        );
        let receipt = parse(source).unwrap();
        assert_eq!(receipt.order.voucher_savings, dec(-250));
    }

    #[test]
    fn windows_line_endings() {
        let source = concat!(
            "Delivery date Monday 5 March\r\n",
            "2 Bananas £1.00\r\n",
            "Delivery £3.00\r\n",
            "Voucher Saving £-1.00\r\n",
        );
        let receipt = parse(source).unwrap();
        assert_eq!(receipt.items[0], item("Bananas", 100, 2));
        assert_eq!(receipt.order.total, dec(500));
    }

    #[test]
    fn items_do_not_span_lines() {
        let source = indoc!(
            "
            Delivery date Monday 5 March
            2 Bananas
            £1.00
            Delivery £3.00
            Voucher Saving £0.00
            "
        );
        let receipt = parse(source).unwrap();
        assert_eq!(receipt.items, vec![item("Delivery costs", 300, 1)]);
    }

    #[test]
    fn first_metadata_line_wins() {
        let source = indoc!(
            "
            Delivery date Monday 5 March
            Delivery £3.00
            Delivery £4.00
            Voucher Saving £0.00
            Delivery date nonsense
            "
        );
        let receipt = parse(source).unwrap();
        assert_eq!(receipt.order.delivery_cost, dec(300));
        assert_eq!(receipt.order.delivery_date.to_string(), "Monday 5 March");
    }

    #[test]
    fn delivery_time_is_not_the_delivery_cost() {
        let source = indoc!(
            "
            Delivery date Saturday 10 March
            Delivery time 10.00 - 11.00
            1 Bread £1.10
            Delivery £1.99
            Voucher Saving £0.00
            "
        );
        let (order, items) = parse(source).unwrap().into_parts();
        assert_eq!(order.delivery_cost, dec(199));
        assert_eq!(items, vec![item("Bread", 110, 1), item("Delivery costs", 199, 1)]);
        assert_eq!(order.total, dec(508));
    }

    #[test]
    fn missing_voucher_line() {
        let source = indoc!(
            "
            Delivery date Monday 5 March
            2 Bananas £1.00
            Delivery £3.00
            "
        );
        let err = parse(source).unwrap_err();
        assert!(err.is_missing_field());
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingField {
                field: ReceiptField::VoucherSavings
            }
        );
        assert_eq!(err.location, None);
    }

    #[test]
    fn missing_delivery_date_and_cost() {
        let err = parse("Delivery £3.00\nVoucher Saving £0.00\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingField {
                field: ReceiptField::DeliveryDate
            }
        );

        let err = parse("Delivery date Monday 5 March\nVoucher Saving £0.00\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::MissingField {
                field: ReceiptField::DeliveryCost
            }
        );
        assert_eq!(
            err.to_string(),
            "Receipt is missing the 'Delivery' cost line"
        );
    }

    #[test]
    fn bad_delivery_date() {
        let source = indoc!(
            "
            Delivery date tomorrow morning
            Delivery £3.00
            Voucher Saving £0.00
            "
        );
        let err = parse(source).unwrap_err();
        assert!(matches!(err.kind, ParseErrorKind::Format { .. }));
        assert_eq!(err.location, Some((1, 15)));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let source = indoc!(
            "
            Delivery date Monday 5 March
            0 Bananas £1.00
            Delivery £3.00
            Voucher Saving £0.00
            "
        );
        let err = parse(source).unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::Format {
                message: "quantity must be at least 1".to_string()
            }
        );
        assert_eq!(err.location, Some((2, 1)));
        assert_eq!(
            err.to_string(),
            "Invalid format: quantity must be at least 1 at line 2 column 1"
        );
    }

    #[test]
    fn realistic_confirmation() {
        let source = indoc!(
            "
            Hi Sam,

            Thanks for shopping with us. Here is a summary of your order.

            Delivery date Saturday 10 March
            Delivery time 10:00 - 11:00

            Fresh & Chilled
            2 Semi skimmed milk 4 pints £2.30
            1 Mature cheddar 400g £3.25
            Bakery
            1 Seeded batch loaf £1.10
            Household
            1 Free carrier bags £0.00

            Subtotal £6.65
            Delivery £1.99
            Voucher Saving £-2.00
            Total £6.64
            "
        );
        let (order, items) = parse(source).unwrap().into_parts();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0], item("Semi skimmed milk 4 pints", 230, 2));
        assert_eq!(items[3], item("Free carrier bags", 0, 1));
        assert_eq!(order.delivery_cost, dec(199));
        assert_eq!(order.voucher_savings, dec(-200));
        assert_eq!(sc::subtotal(&items), dec(664));
        assert_eq!(order.total, dec(663));
    }
}
