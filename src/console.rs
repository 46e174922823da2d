use crate::data::Amount;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-based dialogue with whoever stands in front of the ATM. The session only
/// ever talks through this trait, which is also what lets the tests drive a whole
/// session from a script.
///
/// End of input is reported as an `io::ErrorKind::UnexpectedEof` error.
pub(crate) trait Console {
    /// Shows `prompt` and reads one line, without its line terminator.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Same as `read_line`, but what is typed isn't echoed back.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;

    fn write_line(&mut self, text: &str) -> io::Result<()>;

    /// Keeps asking until the answer is an integer.
    fn read_int(&mut self, prompt: &str) -> io::Result<i64> {
        loop {
            match self.read_line(prompt)?.trim().parse() {
                Ok(n) => return Ok(n),
                Err(_) => self.write_line("Input valid number, please.")?,
            }
        }
    }
}

/// Asks for an amount of money until the answer is made of digits only. An empty
/// answer counts as 0, which the prompts advertise as "cancel".
pub(crate) fn ask_for_money<C: Console>(console: &mut C, prompt: &str) -> io::Result<Amount> {
    loop {
        let input = console.read_line(prompt)?;
        if input.is_empty() {
            return Ok(Amount::ZERO);
        }
        if input.bytes().all(|b| b.is_ascii_digit()) {
            // too many digits for an `Amount` is just another invalid amount
            if let Ok(amount) = Amount::from_str_exact(&input) {
                return Ok(amount);
            }
        }
        console.write_line("\nInvalid amount. Try again.")?;
    }
}

/// The real console: stdin and stdout.
pub(crate) struct Terminal {
    stdin: io::Stdin,
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> Self {
        Self {
            stdin: io::stdin(),
            stdout: io::stdout(),
        }
    }

    fn prompt(&mut self, prompt: &str) -> io::Result<()> {
        let mut out = self.stdout.lock();
        out.write_all(prompt.as_bytes())?;
        out.flush()
    }
}

impl Console for Terminal {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.prompt(prompt)?;
        let mut line = String::new();
        if self.stdin.lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "standard input closed",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        // piped input has no echo to hide
        if !self.stdin.is_terminal() {
            return self.read_line(prompt);
        }
        self.prompt(prompt)?;
        enable_raw_mode()?;
        let secret = read_hidden();
        disable_raw_mode()?;
        self.write_line("")?;
        secret
    }

    fn write_line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.stdout.lock(), "{text}")
    }
}

/// Collects key presses until Enter. Must be called with the terminal in raw mode.
fn read_hidden() -> io::Result<String> {
    let mut secret = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };
        if kind == KeyEventKind::Release {
            continue;
        }
        match code {
            KeyCode::Enter => return Ok(secret),
            KeyCode::Backspace => {
                secret.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"));
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "standard input closed",
                ));
            }
            KeyCode::Char(c) => secret.push(c),
            _ => {}
        }
    }
}


#[cfg(test)]
mod tests {
    use super::{ask_for_money, script::Script, Console};
    use rust_decimal_macros::dec;

    #[test]
    fn money_digits() {
        let mut console = Script::new(["200"]);
        assert_eq!(ask_for_money(&mut console, "? ").unwrap(), dec!(200));
        assert!(console.output.is_empty());
    }
    #[test]
    fn money_empty_is_zero() {
        let mut console = Script::new([""]);
        assert_eq!(ask_for_money(&mut console, "? ").unwrap(), dec!(0));
    }
    #[test]
    fn money_retries_until_valid() {
        let mut console = Script::new(["-5", "12.5", "abc", " 7", "99999999999999999999999999999999", "007"]);
        assert_eq!(ask_for_money(&mut console, "? ").unwrap(), dec!(7));
        assert_eq!(
            console
                .output
                .iter()
                .filter(|line| line.contains("Invalid amount. Try again."))
                .count(),
            5
        );
        assert_eq!(console.prompts.len(), 6);
    }
    #[test]
    fn money_end_of_input() {
        let mut console = Script::new(["x"]);
        let err = ask_for_money(&mut console, "? ").unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
    }
    #[test]
    fn int_retries_until_valid() {
        let mut console = Script::new(["one", "", "3"]);
        assert_eq!(console.read_int(">> ").unwrap(), 3);
        assert_eq!(console.output, ["Input valid number, please."; 2]);
    }
}
