use crate::config::INITIAL_BALANCE;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

pub type CardNumber = String;

/// Money is handled in whole units only: every `Amount` we build has a scale of 0
/// and is never negative (the input side only accepts digits).
pub type Amount = Decimal;

/// One bank customer. The roster only carries `name`, `card_number` and `pin`;
/// the balance always starts at `INITIAL_BALANCE` when it isn't given.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub(crate) struct Account {
    pub name: String,
    pub card_number: CardNumber,
    pub pin: String,
    #[serde(default = "initial_balance")]
    pub balance: Amount,
}

fn initial_balance() -> Amount {
    INITIAL_BALANCE
}

impl Account {
    #[cfg(test)]
    pub fn new(name: &str, card_number: &str, pin: &str) -> Self {
        Self {
            name: name.to_owned(),
            card_number: card_number.to_owned(),
            pin: pin.to_owned(),
            balance: INITIAL_BALANCE,
        }
    }
}

// Hand-written so the PIN never ends up in a log line or a panic message.
impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account")
            .field("name", &self.name)
            .field("card_number", &self.card_number)
            .field("pin", &"****")
            .field("balance", &self.balance)
            .finish()
    }
}

/// Directory error handling. The session turns each of these into a line of text for
/// the user; none of them ends the program.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("Card number {0} is used by more than one account")]
    DuplicateCardNumber(CardNumber),
    #[error("Card number {0} doesn't exist")]
    UnknownCard(CardNumber),
    #[error("Insufficient funds for operation (asked {asked} while {available} available)")]
    InsufficientFunds { asked: Amount, available: Amount },
    #[error("Amount is too large to be credited")]
    Overflow,
}
