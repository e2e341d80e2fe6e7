use std::collections::btree_map::{self, BTreeMap};

use rust_decimal::Decimal;

use super::{LineItem, PersonId};

/// Cost shares collected per person while items are being assigned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Basket {
    shares: BTreeMap<PersonId, Vec<Decimal>>,
}

impl Basket {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `share` to `person`'s list, creating the list on first use.
    pub fn record(&mut self, person: PersonId, share: Decimal) -> &mut Self {
        self.shares.entry(person).or_insert_with(Vec::new).push(share);
        self
    }

    /// Records one unit share of `item` for every listed purchaser.
    ///
    /// Co-purchasers each receive the full unit share; it is not split between them. Items with a
    /// zero price are skipped and `false` is returned.
    pub fn record_item<'p, I>(&mut self, item: &LineItem<'_>, purchasers: I) -> bool
    where
        I: IntoIterator<Item = &'p PersonId>,
    {
        if !item.is_cost_bearing() {
            return false;
        }
        let share = item.unit_share();
        for person in purchasers {
            self.record(person.clone(), share);
        }
        true
    }

    pub fn shares(&self, person: &PersonId) -> Option<&[Decimal]> {
        self.shares.get(person).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    /// Sums every person's shares.
    pub fn finalize(&self) -> FinalBill {
        FinalBill {
            totals: self
                .shares
                .iter()
                .map(|(person, shares)| (person.clone(), shares.iter().copied().sum::<Decimal>()))
                .collect(),
        }
    }
}

/// Amount each person owes for the order, ordered by identifier.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FinalBill {
    totals: BTreeMap<PersonId, Decimal>,
}

impl FinalBill {
    pub fn get(&self, person: &PersonId) -> Option<Decimal> {
        self.totals.get(person).copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, PersonId, Decimal> {
        self.totals.iter()
    }

    /// People whose total is not zero.
    pub fn payers(&self) -> impl Iterator<Item = (&PersonId, &Decimal)> {
        self.totals.iter().filter(|(_, total)| !total.is_zero())
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

impl<'a> IntoIterator for &'a FinalBill {
    type Item = (&'a PersonId, &'a Decimal);
    type IntoIter = btree_map::Iter<'a, PersonId, Decimal>;

    fn into_iter(self) -> Self::IntoIter {
        self.totals.iter()
    }
}
