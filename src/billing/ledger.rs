//! # Bill ledger
//!
//! An append-only record of every bill generated. Recording a reading is a single unit of work: the customer's
//! previous reading and the ledger are either both updated or both left alone.

/*  This file is part of water-billing.
    water-billing is free software: you can redistribute it and/or modify
    it under the terms of the GNU General Public License as published by
    the Free Software Foundation, either version 3 of the License, or
    (at your option) any later version.
    water-billing is distributed in the hope that it will be useful,
    but WITHOUT ANY WARRANTY; without even the implied warranty of
    MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
    GNU General Public License for more details.
    You should have received a copy of the GNU General Public License
    along with water-billing.  If not, see http://www.gnu.org/licenses/.*/

use std::fmt;
use time::macros::format_description;
use time::OffsetDateTime;

use super::calculator::{compute_amount, compute_usage};
use super::customer::CustomerDirectory;
use super::{BillingError, CustomerId, Money, Rate, Reading};

/// One billing event. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Bill {
    /// Refers to a customer in the directory; the bill does not own it
    customer_id: CustomerId,
    usage: Reading,
    rate: Rate,
    total_amount: Money,
    created_at: OffsetDateTime,
}

impl Bill {
    /// The customer this bill was generated for
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    /// Units consumed since the previous reading
    pub fn usage(&self) -> Reading {
        self.usage
    }

    /// The rate in force when the bill was created
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// usage * rate
    pub fn total_amount(&self) -> Money {
        self.total_amount
    }

    /// When the reading was recorded
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let date = self.created_at
            .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
            .map_err(|_| fmt::Error)?;

        write!(f, "Bill(customer_id={}, usage={:?}, rate={:?}, total_amount={:?}, date={})",
               self.customer_id, self.usage, self.rate, self.total_amount, date)
    }
}

/// Every bill ever generated, oldest first
#[derive(Debug, Default)]
pub struct BillLedger {
    bills: Vec<Bill>,
}

impl BillLedger {
    /// Instance an empty ledger
    pub fn new() -> BillLedger {
        BillLedger::default()
    }

    /// Bill a customer for the usage since their last reading.
    ///
    /// All checks happen before anything is written, so on error neither the directory nor the ledger changes.
    pub fn record_reading(&mut self, directory: &mut CustomerDirectory, customer_id: CustomerId, current: Reading,
                          rate: Rate, now: OffsetDateTime) -> Result<&Bill, BillingError> {
        let customer = match directory.get_mut(customer_id) {
            Some(c) => c,
            None => {
                tracing::warn!(customer_id, "reading for unknown customer");
                return Err(BillingError::CustomerNotFound(customer_id));
            }
        };

        let usage = match compute_usage(customer.previous_reading(), current) {
            Ok(u) => u,
            Err(e) => {
                tracing::warn!(customer_id, previous = customer.previous_reading(), current, "rejected reading");
                return Err(e);
            }
        };

        let bill = Bill {
            customer_id,
            usage,
            rate,
            total_amount: compute_amount(usage, rate),
            created_at: now,
        };

        // nothing below can fail
        customer.set_previous_reading(current);
        self.bills.push(bill);
        tracing::info!(customer_id, usage, rate, "generated bill");

        Ok(&self.bills[self.bills.len() - 1])
    }

    /// Every bill in creation order
    pub fn list(&self) -> impl Iterator<Item = &Bill> {
        self.bills.iter()
    }

    /// Bills for one customer, in creation order
    pub fn for_customer(&self, customer_id: CustomerId) -> impl Iterator<Item = &Bill> {
        self.bills.iter().filter(move |b| b.customer_id == customer_id)
    }

    /// Number of bills generated so far
    pub fn len(&self) -> usize {
        self.bills.len()
    }

    /// True until the first bill is generated
    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn directory() -> CustomerDirectory {
        let mut dir = CustomerDirectory::new();
        dir.register(1, "Alice", "1 Main St").unwrap();
        dir.register(2, "Bob", "2 High St").unwrap();
        dir
    }

    #[test]
    fn bill_carries_reading_and_time() {
        let mut dir = directory();
        let mut ledger = BillLedger::new();
        let now = datetime!(2026-10-18 09:30:00 UTC);

        let bill = ledger.record_reading(&mut dir, 1, 10.0, 2.5, now).unwrap().clone();

        assert_eq!(bill.customer_id(), 1);
        assert_eq!(bill.usage(), 10.0);
        assert_eq!(bill.total_amount(), 25.0);
        assert_eq!(bill.created_at(), now);
        assert_eq!(dir.get(1).unwrap().previous_reading(), 10.0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn failures_leave_everything_alone() {
        let mut dir = directory();
        let mut ledger = BillLedger::new();
        let now = datetime!(2026-10-18 09:30:00 UTC);
        ledger.record_reading(&mut dir, 1, 15.0, 2.5, now).unwrap();

        let res = ledger.record_reading(&mut dir, 1, 8.0, 2.5, now);
        assert_eq!(res.unwrap_err(), BillingError::InvalidReading { previous: 15.0, current: 8.0 });

        let res = ledger.record_reading(&mut dir, 99, 8.0, 2.5, now);
        assert_eq!(res.unwrap_err(), BillingError::CustomerNotFound(99));

        assert_eq!(ledger.len(), 1);
        assert_eq!(dir.get(1).unwrap().previous_reading(), 15.0);
        assert_eq!(dir.get(2).unwrap().previous_reading(), 0.0);
    }

    #[test]
    fn bills_per_customer_keep_order() {
        let mut dir = directory();
        let mut ledger = BillLedger::new();
        let now = datetime!(2026-10-18 09:30:00 UTC);
        assert!(ledger.is_empty());

        ledger.record_reading(&mut dir, 1, 1.0, 2.5, now).unwrap();
        ledger.record_reading(&mut dir, 2, 4.0, 2.5, now).unwrap();
        ledger.record_reading(&mut dir, 1, 3.0, 2.5, now).unwrap();

        let all: Vec<CustomerId> = ledger.list().map(|b| b.customer_id()).collect();
        assert_eq!(all, vec![1, 2, 1]);

        let alice: Vec<Reading> = ledger.for_customer(1).map(|b| b.usage()).collect();
        assert_eq!(alice, vec![1.0, 2.0]);
    }

    #[test]
    fn display_shows_date() {
        let mut dir = directory();
        let mut ledger = BillLedger::new();
        let now = datetime!(2026-10-18 09:30:05 UTC);

        let bill = ledger.record_reading(&mut dir, 1, 5.0, 2.5, now).unwrap();
        assert_eq!(bill.to_string(),
                   "Bill(customer_id=1, usage=5.0, rate=2.5, total_amount=12.5, date=2026-10-18 09:30:05)");
    }
}
