//! Customer directory

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

use std::collections::HashMap;
use std::fmt;

use super::{BillingError, CustomerId, Reading};

/// A registered customer
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: String,
    /// The last reading a bill was generated from. Only ever increases.
    previous_reading: Reading,
}

impl Customer {
    fn new(id: CustomerId, name: String, address: String) -> Customer {
        Customer {
            id,
            name,
            address,
            previous_reading: 0.0,
        }
    }

    /// Identifier, fixed at registration
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Postal address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// The reading the next bill will be measured from
    pub fn previous_reading(&self) -> Reading {
        self.previous_reading
    }

    pub(crate) fn set_previous_reading(&mut self, reading: Reading) {
        self.previous_reading = reading;
    }
}

impl fmt::Display for Customer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Customer(id={}, name='{}', address='{}', previous_reading={:?})",
               self.id, self.name, self.address, self.previous_reading)
    }
}

/// Customers keyed by id, remembered in registration order
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
    index: HashMap<CustomerId, usize>,
}

impl CustomerDirectory {
    /// Instance an empty directory
    pub fn new() -> CustomerDirectory {
        CustomerDirectory::default()
    }

    /// Store a new customer with a previous reading of 0.
    ///
    /// Ids are never reused: registering an existing id leaves the stored customer untouched.
    pub fn register<S1: ToString, S2: ToString>(&mut self, id: CustomerId, name: S1, address: S2)
                                                -> Result<&Customer, BillingError> {
        if self.index.contains_key(&id) {
            tracing::warn!(customer_id = id, "refusing duplicate customer id");
            return Err(BillingError::DuplicateId(id));
        }

        let pos = self.customers.len();
        self.customers.push(Customer::new(id, name.to_string(), address.to_string()));
        self.index.insert(id, pos);
        tracing::info!(customer_id = id, "registered customer");

        Ok(&self.customers[pos])
    }

    /// Every customer in registration order
    pub fn list(&self) -> impl Iterator<Item = &Customer> {
        self.customers.iter()
    }

    /// Look up a customer by id
    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        let found = self.index.get(&id).map(|&pos| &self.customers[pos]);
        tracing::debug!(customer_id = id, found = found.is_some(), "customer lookup");
        found
    }

    pub(crate) fn get_mut(&mut self, id: CustomerId) -> Option<&mut Customer> {
        match self.index.get(&id) {
            Some(&pos) => self.customers.get_mut(pos),
            None => None,
        }
    }

    /// Number of registered customers
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    /// True until the first customer is registered
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}
