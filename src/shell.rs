//! For the interactive menu used in main.rs

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

use std::fmt::Display;
use std::io;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// What the menu loop does after a command returns
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    Exit,
}

pub type Command<T> = Box<dyn Fn(&mut T, &mut Console<'_>) -> io::Result<Flow>>;

/// Line based prompting on top of any reader/writer pair
pub struct Console<'a> {
    input: &'a mut dyn BufRead,
    output: &'a mut dyn Write,
}

impl<'a> Console<'a> {
    pub fn new(input: &'a mut dyn BufRead, output: &'a mut dyn Write) -> Self {
        Console { input, output }
    }

    pub fn say<D: Display>(&mut self, line: D) -> io::Result<()> {
        writeln!(self.output, "{}", line)
    }

    /// Prompt and read one line. None at end of input.
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until the line parses and passes `accept`
    pub fn read_parsed_where<V, F>(&mut self, prompt: &str, accept: F) -> io::Result<Option<V>>
        where V: FromStr, F: Fn(&V) -> bool {
        loop {
            let line = match self.read_line(prompt)? {
                Some(l) => l,
                None => return Ok(None),
            };

            match line.parse::<V>() {
                Ok(v) if accept(&v) => return Ok(Some(v)),
                _ => {
                    tracing::debug!(input = %line, "malformed number");
                    self.say("Invalid number, please try again.")?;
                }
            }
        }
    }

    pub fn read_parsed<V: FromStr>(&mut self, prompt: &str) -> io::Result<Option<V>> {
        self.read_parsed_where(prompt, |_| true)
    }
}

struct CommandInfo<T> {
    closure: Command<T>,
    help_name: String,
}

/// A numbered menu over some shared state. Exit is always the last entry.
pub struct InteractiveShell<T> {
    my_name: String,
    shared_state: T,
    commands: Vec<CommandInfo<T>>,
}

impl<T> InteractiveShell<T> {
    pub fn new<S: ToString>(my_name: S, shared_state: T) -> Self {
        InteractiveShell {
            my_name: my_name.to_string(),
            shared_state,
            commands: Vec::new(),
        }
    }

    /// Entries are numbered from 1 in registration order
    pub fn register_command<S: ToString>(&mut self, help_name: S, closure: Command<T>) {
        let info = CommandInfo {
            closure,
            help_name: help_name.to_string(),
        };

        self.commands.push(info);
    }

    pub fn shared_state(&self) -> &T {
        &self.shared_state
    }

    fn print_menu(&self, console: &mut Console<'_>) -> io::Result<()> {
        console.say(format!("====== {} ======", self.my_name))?;
        for (i, info) in self.commands.iter().enumerate() {
            console.say(format!("{}. {}", i + 1, info.help_name))?;
        }
        console.say(format!("{}. Exit", self.commands.len() + 1))
    }

    /// Run the menu until Exit is chosen or the input ends
    pub fn start<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        let mut console = Console::new(&mut input, &mut output);
        let exit_choice = self.commands.len() + 1;

        // repl
        loop {
            self.print_menu(&mut console)?;

            let choice = match console.read_line("Choose an option: ")? {
                Some(c) => c,
                None => {
                    console.say("")?;
                    tracing::info!("input closed, leaving the menu");
                    return Ok(());
                }
            };

            match choice.parse::<usize>() {
                Ok(n) if n == exit_choice => {
                    console.say("Exiting system...")?;
                    return Ok(());
                }
                Ok(n) if n >= 1 && n < exit_choice => {
                    let info = &self.commands[n - 1];
                    tracing::debug!(command = %info.help_name, "dispatching");
                    if (info.closure)(&mut self.shared_state, &mut console)? == Flow::Exit {
                        tracing::info!("input closed during {}", info.help_name);
                        return Ok(());
                    }
                }
                _ => console.say("Invalid choice. Try again.\n")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn increment(n: &mut u32, _: &mut Console<'_>) -> io::Result<Flow> {
        *n += 1;
        Ok(Flow::Continue)
    }

    fn counter_shell() -> InteractiveShell<u32> {
        let mut shell = InteractiveShell::new("Counter", 0);
        shell.register_command("Increment", Box::new(increment));
        shell
    }

    fn run(shell: &mut InteractiveShell<u32>, script: &str) -> String {
        let mut out = Vec::new();
        shell.start(Cursor::new(script), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn menu_lists_commands_then_exit() {
        let mut shell = counter_shell();
        let out = run(&mut shell, "2\n");

        assert!(out.starts_with("====== Counter ======\n1. Increment\n2. Exit\nChoose an option: "));
        assert!(out.ends_with("Exiting system...\n"));
    }

    #[test]
    fn commands_run_until_exit() {
        let mut shell = counter_shell();
        run(&mut shell, "1\n1\n2\n1\n");

        // the line after exit is never read
        assert_eq!(*shell.shared_state(), 2);
    }

    #[test]
    fn unknown_choice_returns_to_menu() {
        let mut shell = counter_shell();
        let out = run(&mut shell, "9\nabc\n\n1\n2\n");

        assert_eq!(out.matches("Invalid choice. Try again.").count(), 3);
        assert_eq!(*shell.shared_state(), 1);
    }

    #[test]
    fn end_of_input_leaves_menu() {
        let mut shell = counter_shell();
        let out = run(&mut shell, "1");

        assert_eq!(*shell.shared_state(), 1);
        assert!(!out.contains("Exiting system..."));
    }

    #[test]
    fn read_parsed_reprompts_on_garbage() {
        let mut input = Cursor::new("x\n-3\n12\n");
        let mut output = Vec::new();
        let value = {
            let mut console = Console::new(&mut input, &mut output);
            console.read_parsed::<u64>("id: ").unwrap()
        };

        assert_eq!(value, Some(12));
        let out = String::from_utf8(output).unwrap();
        assert_eq!(out.matches("Invalid number, please try again.").count(), 2);
        assert_eq!(out.matches("id: ").count(), 3);
    }

    #[test]
    fn read_parsed_gives_up_at_end_of_input() {
        let mut input = Cursor::new("nope\n");
        let mut output = Vec::new();
        let mut console = Console::new(&mut input, &mut output);

        assert_eq!(console.read_parsed::<u64>("id: ").unwrap(), None);
    }
}
