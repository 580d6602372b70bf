//! # Customers, meter readings and bills.
//!
//! [`Billing`] ties the three parts together: a [`CustomerDirectory`], the pure functions in [`calculator`] and an
//! append-only [`BillLedger`]. Everything lives in memory for the lifetime of the process.
//!
//! # Example
//! ```
//! use water_billing::billing::{Billing, BillingError};
//!
//! let mut billing = Billing::new(2.5);
//! billing.register_customer(1, "Alice", "1 Main St").unwrap();
//!
//! let bill = billing.record_reading(1, 10.0).unwrap();
//! assert_eq!(bill.usage(), 10.0);
//! assert_eq!(bill.total_amount(), 25.0);
//!
//! // readings never go backwards
//! match billing.record_reading(1, 8.0) {
//!     Err(BillingError::InvalidReading { previous, current }) => {
//!         assert_eq!(previous, 10.0);
//!         assert_eq!(current, 8.0);
//!     }
//!     _ => panic!("expected an invalid reading"),
//! }
//!
//! assert_eq!(billing.bills().count(), 1);
//! ```

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

use time::OffsetDateTime;

pub mod calculator;
pub mod customer;
pub mod ledger;

pub use self::customer::{Customer, CustomerDirectory};
pub use self::ledger::{Bill, BillLedger};

/// Unique, immutable identifier of a customer
pub type CustomerId = u64;

/// A meter measurement
pub type Reading = f64;

/// Money charged per unit of usage
pub type Rate = f64;

/// A monetary amount
pub type Money = f64;

/// The rate bills are calculated at unless configured otherwise
pub const DEFAULT_RATE: Rate = 2.5;

/// Reasons an operation on the ledger can be refused
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BillingError {
    /// A customer with this id is already registered
    #[error("Customer ID already exists! (id {0})")]
    DuplicateId(CustomerId),
    /// No customer is registered with this id
    #[error("Customer not found. (id {0})")]
    CustomerNotFound(CustomerId),
    /// The new reading is below the stored one or is not a finite number
    #[error("Current reading cannot be less than previous reading. (previous {previous:?}, current {current:?})")]
    InvalidReading {
        /// The reading stored for the customer
        previous: Reading,
        /// The rejected reading
        current: Reading,
    },
}

/// State shared by every operation of the interactive shell
pub struct Billing {
    /// Money charged per unit of usage for every new bill
    rate: Rate,
    customers: CustomerDirectory,
    ledger: BillLedger,
}

impl Billing {
    /// Instance an empty ledger billing at `rate`
    pub fn new(rate: Rate) -> Billing {
        Billing {
            rate,
            customers: CustomerDirectory::new(),
            ledger: BillLedger::new(),
        }
    }

    /// The rate new bills are created with
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Add a customer whose previous reading starts at 0
    pub fn register_customer<S1: ToString, S2: ToString>(&mut self, id: CustomerId, name: S1, address: S2)
                                                         -> Result<&Customer, BillingError> {
        self.customers.register(id, name, address)
    }

    /// All customers in the order they were registered
    pub fn customers(&self) -> impl Iterator<Item = &Customer> {
        self.customers.list()
    }

    /// Look up a single customer
    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    /// Bill the usage since the customer's last reading, stamped with the current time
    pub fn record_reading(&mut self, id: CustomerId, current: Reading) -> Result<&Bill, BillingError> {
        self.record_reading_at(id, current, OffsetDateTime::now_utc())
    }

    /// As [`Billing::record_reading`] with a caller supplied timestamp
    pub fn record_reading_at(&mut self, id: CustomerId, current: Reading, now: OffsetDateTime)
                             -> Result<&Bill, BillingError> {
        self.ledger.record_reading(&mut self.customers, id, current, self.rate, now)
    }

    /// All bills in the order they were created
    pub fn bills(&self) -> impl Iterator<Item = &Bill> {
        self.ledger.list()
    }
}

impl Default for Billing {
    fn default() -> Self {
        Billing::new(DEFAULT_RATE)
    }
}
