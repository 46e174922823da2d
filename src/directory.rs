use crate::{
    config::SEED_ROSTER,
    data::{Account, Amount, CardNumber, Error},
    read::read_roster,
};
use std::collections::HashMap;

/// This is where accounts are stored, keyed by card number. They are all created
/// at startup and live until the process ends; only balances ever change.
/// Single-threaded on purpose, so no protections for MT.
#[derive(Debug)]
pub(crate) struct Directory {
    accounts: HashMap<CardNumber, Account>,
}

impl Directory {
    /// Builds the directory, refusing any roster where two accounts share a card
    /// number. Once built, a lookup can only ever find zero or one account.
    pub fn new(accounts: impl IntoIterator<Item = Account>) -> Result<Self, Error> {
        let mut map = HashMap::new();
        for account in accounts {
            let card = account.card_number.clone();
            if map.insert(card.clone(), account).is_some() {
                return Err(Error::DuplicateCardNumber(card));
            }
        }
        Ok(Self { accounts: map })
    }

    /// The bank as it is every time the program starts.
    pub fn seeded() -> Result<Self, anyhow::Error> {
        let directory = Self::new(read_roster(SEED_ROSTER.as_bytes())?)?;
        tracing::info!(accounts = directory.accounts.len(), "directory seeded");
        Ok(directory)
    }

    pub fn find_by_card_number(&self, card: &str) -> Option<&Account> {
        self.accounts.get(card)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    /// Sum of every balance; transfers must leave it untouched.
    pub fn total(&self) -> Amount {
        self.accounts.values().map(|account| account.balance).sum()
    }

    pub fn balance(&self, card: &str) -> Result<Amount, Error> {
        self.find_by_card_number(card)
            .map(|account| account.balance)
            .ok_or_else(|| Error::UnknownCard(card.to_owned()))
    }

    fn get_mut(&mut self, card: &str) -> Result<&mut Account, Error> {
        self.accounts
            .get_mut(card)
            .ok_or_else(|| Error::UnknownCard(card.to_owned()))
    }

    /// Returns the new balance. There's no upper limit on what can be deposited
    /// short of what `Amount` can represent.
    pub fn deposit(&mut self, card: &str, amount: Amount) -> Result<Amount, Error> {
        let account = self.get_mut(card)?;
        account.balance = account
            .balance
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        tracing::debug!(card, %amount, balance = %account.balance, "deposit");
        Ok(account.balance)
    }

    pub fn withdraw(&mut self, card: &str, amount: Amount) -> Result<Amount, Error> {
        let account = self.get_mut(card)?;
        if account.balance < amount {
            return Err(Error::InsufficientFunds {
                asked: amount,
                available: account.balance,
            });
        }
        account.balance -= amount;
        tracing::debug!(card, %amount, balance = %account.balance, "withdrawal");
        Ok(account.balance)
    }

    /// Everything is checked before either balance is touched, so a refused transfer
    /// leaves both accounts as they were. Transferring to one's own card is allowed
    /// and nets out to nothing.
    pub fn transfer(&mut self, from: &str, to: &str, amount: Amount) -> Result<(), Error> {
        let destination = self.balance(to)?;
        let available = self.balance(from)?;
        if available < amount {
            return Err(Error::InsufficientFunds {
                asked: amount,
                available,
            });
        }
        if from == to {
            tracing::debug!(card = from, %amount, "transfer to self");
            return Ok(());
        }
        let credited = destination.checked_add(amount).ok_or(Error::Overflow)?;
        self.get_mut(to)?.balance = credited;
        self.get_mut(from)?.balance -= amount;
        tracing::debug!(from, to, %amount, "transfer");
        Ok(())
    }
}
