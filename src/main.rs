//! Executable for the interactive water billing menu

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

mod commands;
mod shell;

use anyhow::{Context, Result};
use getopts::Options;
use std::env;
use std::io;
use std::process;
use water_billing::billing::Billing;
use water_billing::config::{self, AppConfig};
use water_billing::observability;

use shell::InteractiveShell;

fn print_usage(executable_name: &str, opts: &Options) -> ! {
    println!("\n{} is free software licenced under GPLv3+: you are free to change and redistribute it.", executable_name);
    println!("There is NO WARRANTY, to the extent permitted by law.\n");

    let brief = format!("To start the billing menu: {} [--config FILE] [--rate RATE]\n", executable_name);

    print!("{}", opts.usage(&brief));
    process::exit(1)
}

// handles command line arguments
fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let executable_name = args.first().cloned().unwrap_or_else(|| "water-billing".to_string());

    let mut opts = Options::new();

    // prints usage - optional, no argument
    opts.optflag("h", "help", "Print this help menu");

    // optional, takes an argument
    opts.optopt("c", "config", &format!("TOML configuration file. Falls back to ${} and then to built in defaults.",
                                        config::CONFIG_ENV_VAR), "FILE");

    // optional, takes an argument
    opts.optopt("r", "rate", "Money charged per unit of usage. Overrides the configuration file.", "RATE");

    // parse options
    let matches = match opts.parse(args.iter().skip(1)) {
        Ok(m) => m,
        Err(f) => { println!("{}", f); print_usage(&executable_name, &opts) },
    };

    if matches.opt_present("help") {
        print_usage(&executable_name, &opts);
    }

    if !matches.free.is_empty() {
        println!("Unexpected argument {}", matches.free[0]);
        print_usage(&executable_name, &opts);
    }

    observability::init_tracing();

    let mut cfg = AppConfig::load(matches.opt_str("config").as_deref())?;

    if let Some(rate) = matches.opt_str("rate") {
        cfg.rate_per_unit = rate.trim().parse().with_context(|| format!("invalid --rate '{}'", rate))?;
        config::validate_rate(cfg.rate_per_unit)?;
    }

    tracing::info!(rate = cfg.rate_per_unit, "starting billing menu");

    let mut shell = InteractiveShell::new(&cfg.system_name, Billing::new(cfg.rate_per_unit));
    commands::register_all(&mut shell);

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell.start(stdin.lock(), stdout.lock())?;

    let billing = shell.shared_state();
    tracing::info!(customers = billing.customers().count(), bills = billing.bills().count(), "session finished");

    Ok(())
}
