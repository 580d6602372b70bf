//! Calculator
//!
//! Turns a pair of meter readings into a usage and a usage into money. There is a single flat rate: no tiers and no
//! billing periods.

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

use super::{BillingError, Money, Rate, Reading};

/// The units consumed between two readings.
///
/// Fails if the meter appears to have run backwards or the reading is not a finite number.
pub fn compute_usage(previous: Reading, current: Reading) -> Result<Reading, BillingError> {
    if !current.is_finite() || current < previous {
        return Err(BillingError::InvalidReading { previous, current });
    }

    Ok(current - previous)
}

/// The amount owed for `usage` units at `rate` per unit
pub fn compute_amount(usage: Reading, rate: Rate) -> Money {
    usage * rate
}
