use crate::data::Amount;

/// Initial balance set on every account when the program starts.
pub const INITIAL_BALANCE: Amount = Amount::ONE_THOUSAND;

/// How many times a user can enter the wrong PIN before we give up on them.
pub const MAX_PIN_TRIES: usize = 3;

/// The bank's customers, loaded once at startup.
pub const SEED_ROSTER: &str = "\
name,   card_number, pin
Arek,   1234,        1234
Johnny, 4321,        1234
";

/// Used when `RUST_LOG` isn't set; keeps the console dialogue free of log noise.
pub const DEFAULT_LOG_FILTER: &str = "warn";
