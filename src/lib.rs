//! # water_billing library crate
//!
//! A small utility billing ledger. Customers are registered in a directory, meter readings are turned into bills
//! at a fixed per-unit rate and every bill is kept in an append-only ledger for the lifetime of the process.
//!
//! This project is licensed under the terms of the GNU General Public Licence as published by the Free Software Foundation, either version 3 of the licence, or (at your option) any later version published by the free software foundation (https://fsf.org).

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

#![warn(missing_docs)]
#![warn(non_upper_case_globals)]
#![warn(non_camel_case_types)]
#![warn(unused_qualifications)]

pub mod billing;
pub mod config;
pub mod observability;
