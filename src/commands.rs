//! The menu entries of the billing shell

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

use std::io;
use water_billing::billing::{Billing, CustomerId, Reading};

use crate::shell::{Console, Flow, InteractiveShell};

/// Register the four billing operations as menu entries 1 to 4
pub fn register_all(shell: &mut InteractiveShell<Billing>) {
    shell.register_command("Add Customer", Box::new(add_customer));
    shell.register_command("View Customers", Box::new(view_customers));
    shell.register_command("Add Meter Reading & Generate Bill", Box::new(add_meter_reading));
    shell.register_command("View Bills", Box::new(view_bills));
}

fn add_customer(billing: &mut Billing, console: &mut Console<'_>) -> io::Result<Flow> {
    let Some(id) = console.read_parsed::<CustomerId>("Enter customer ID: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(name) = console.read_line("Enter customer name: ")? else {
        return Ok(Flow::Exit);
    };
    let Some(address) = console.read_line("Enter address: ")? else {
        return Ok(Flow::Exit);
    };

    match billing.register_customer(id, name, address) {
        Ok(_) => console.say("Customer added successfully.\n")?,
        Err(e) => console.say(format!("Error: {}\n", e))?,
    }

    Ok(Flow::Continue)
}

fn view_customers(billing: &mut Billing, console: &mut Console<'_>) -> io::Result<Flow> {
    let mut any = false;
    for customer in billing.customers() {
        console.say(customer)?;
        any = true;
    }

    if any {
        console.say("")?;
    } else {
        console.say("No customers found.\n")?;
    }

    Ok(Flow::Continue)
}

fn add_meter_reading(billing: &mut Billing, console: &mut Console<'_>) -> io::Result<Flow> {
    let Some(id) = console.read_parsed::<CustomerId>("Enter customer ID: ")? else {
        return Ok(Flow::Exit);
    };

    // unknown ids are turned away before asking for a reading
    let previous = match billing.customer(id) {
        Some(c) => c.previous_reading(),
        None => {
            console.say("Customer not found.\n")?;
            return Ok(Flow::Continue);
        }
    };

    let prompt = format!("Enter current meter reading (previous {:?}): ", previous);
    let Some(current) = console.read_parsed_where::<Reading, _>(&prompt, |r| r.is_finite())? else {
        return Ok(Flow::Exit);
    };

    match billing.record_reading(id, current) {
        Ok(bill) => {
            console.say("\nBill Generated:")?;
            console.say(bill)?;
            console.say("")?;
        }
        Err(e) => console.say(format!("Error: {}\n", e))?,
    }

    Ok(Flow::Continue)
}

fn view_bills(billing: &mut Billing, console: &mut Console<'_>) -> io::Result<Flow> {
    let mut any = false;
    for bill in billing.bills() {
        console.say(bill)?;
        any = true;
    }

    if any {
        console.say("")?;
    } else {
        console.say("No bills generated.\n")?;
    }

    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use water_billing::billing::Bill;

    fn session(script: &str) -> (InteractiveShell<Billing>, String) {
        let mut shell = InteractiveShell::new("Water Billing System", Billing::default());
        register_all(&mut shell);

        let mut out = Vec::new();
        shell.start(Cursor::new(script), &mut out).unwrap();
        (shell, String::from_utf8(out).unwrap())
    }

    #[test]
    fn menu_has_five_entries() {
        let (_, out) = session("5\n");

        assert!(out.starts_with("====== Water Billing System ======\n\
                                 1. Add Customer\n\
                                 2. View Customers\n\
                                 3. Add Meter Reading & Generate Bill\n\
                                 4. View Bills\n\
                                 5. Exit\n"));
        assert!(out.ends_with("Exiting system...\n"));
    }

    #[test]
    fn empty_views() {
        let (_, out) = session("2\n4\n5\n");

        assert!(out.contains("No customers found."));
        assert!(out.contains("No bills generated."));
    }

    #[test]
    fn alice_is_billed_twice() {
        let (shell, out) = session("1\n1\nAlice\n1 Main St\n\
                                    3\n1\n10\n\
                                    3\n1\n15\n\
                                    2\n4\n5\n");

        assert!(out.contains("Customer added successfully."));
        assert_eq!(out.matches("Bill Generated:").count(), 2);
        assert!(out.contains("Enter current meter reading (previous 10.0): "));
        assert!(out.contains("Customer(id=1, name='Alice', address='1 Main St', previous_reading=15.0)"));
        assert!(out.contains("Bill(customer_id=1, usage=10.0, rate=2.5, total_amount=25.0, date="));
        assert!(out.contains("Bill(customer_id=1, usage=5.0, rate=2.5, total_amount=12.5, date="));

        let billing = shell.shared_state();
        let bills: Vec<&Bill> = billing.bills().collect();
        assert_eq!(bills.len(), 2);
        assert_eq!(bills[1].total_amount(), 12.5);
        assert_eq!(billing.customer(1).unwrap().previous_reading(), 15.0);
    }

    #[test]
    fn errors_return_to_menu() {
        let (shell, out) = session("1\n1\nAlice\n1 Main St\n\
                                    1\n1\nBob\n2 High St\n\
                                    3\n2\n\
                                    3\n1\n15\n\
                                    3\n1\n8\n\
                                    5\n");

        assert!(out.contains("Error: Customer ID already exists!"));
        assert!(out.contains("Customer not found."));
        assert!(out.contains("Error: Current reading cannot be less than previous reading."));
        assert!(out.ends_with("Exiting system...\n"));

        let billing = shell.shared_state();
        assert_eq!(billing.customers().count(), 1);
        assert_eq!(billing.customer(1).unwrap().name(), "Alice");
        assert_eq!(billing.bills().count(), 1);
        assert_eq!(billing.customer(1).unwrap().previous_reading(), 15.0);
    }

    #[test]
    fn malformed_numbers_reprompt() {
        let (shell, out) = session("1\nabc\n-1\n7\nCarol\n3 Low Rd\n\
                                    3\n7\nlots\nNaN\n4.5\n\
                                    5\n");

        assert_eq!(out.matches("Invalid number, please try again.").count(), 4);
        let billing = shell.shared_state();
        assert_eq!(billing.customer(7).unwrap().name(), "Carol");
        assert_eq!(billing.bills().next().unwrap().usage(), 4.5);
    }

    #[test]
    fn end_of_input_abandons_operation() {
        let (shell, out) = session("1\n3\nDave\n");

        assert!(!out.contains("Customer added successfully."));
        assert_eq!(shell.shared_state().customers().count(), 0);
    }
}
