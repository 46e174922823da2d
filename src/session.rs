use crate::{
    config::MAX_PIN_TRIES,
    console::{ask_for_money, Console},
    data::{CardNumber, Error},
    directory::Directory,
};
use std::io;

/// Everything the control loop needs to know between two steps. Each step takes
/// the session by value and hands back the next one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct Session {
    /// Card number of the authenticated account; the account itself stays in
    /// the `Directory`.
    pub current_user: Option<CardNumber>,
    pub is_authenticated: bool,
    pub wants_to_quit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Deposit,
    Withdraw,
    Transfer,
    ViewBalance,
}

pub(crate) struct MenuEntry {
    pub text: &'static str,
    /// `None` means quit.
    pub action: Option<Action>,
}

pub(crate) static MENU: [MenuEntry; 5] = [
    MenuEntry {
        text: "1. Deposit",
        action: Some(Action::Deposit),
    },
    MenuEntry {
        text: "2. Withdraw",
        action: Some(Action::Withdraw),
    },
    MenuEntry {
        text: "3. Transfer",
        action: Some(Action::Transfer),
    },
    MenuEntry {
        text: "4. View Balance",
        action: Some(Action::ViewBalance),
    },
    MenuEntry {
        text: "5. Quit",
        action: None,
    },
];

/// Runs the whole dialogue until the user quits or runs out of PIN attempts.
/// Input closing (or Ctrl-C at the PIN prompt) ends it the same way as quitting.
pub(crate) fn run<C: Console>(directory: &mut Directory, console: &mut C) -> io::Result<Session> {
    let mut session = Session::default();
    while !session.wants_to_quit {
        session = match step(session.clone(), directory, console) {
            Ok(next) => next,
            Err(e) if ends_dialogue(&e) => {
                tracing::warn!("{e}, ending session");
                // finish the line of the prompt left unanswered
                console.write_line("")?;
                Session {
                    wants_to_quit: true,
                    ..session
                }
            }
            Err(e) => return Err(e),
        };
    }
    console.write_line("Goodbye.")?;
    Ok(session)
}

fn ends_dialogue(error: &io::Error) -> bool {
    matches!(
        error.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
    )
}

/// One turn of the control loop: log in if needed, otherwise one menu round.
pub(crate) fn step<C: Console>(
    session: Session,
    directory: &mut Directory,
    console: &mut C,
) -> io::Result<Session> {
    if !session.is_authenticated {
        return authenticate(session, directory, console);
    }
    show_menu(console)?;
    let choice = console.read_int(">> ")?;
    select_option(session, choice, directory, console)
}

/// Asks for name and card number, then for the PIN. An unknown card or a name that
/// doesn't match hands the session back untouched and without a word: the loop will
/// simply ask again. Running out of PIN attempts asks for the program to end.
pub(crate) fn authenticate<C: Console>(
    mut session: Session,
    directory: &Directory,
    console: &mut C,
) -> io::Result<Session> {
    let name = console.read_line("Please enter your name: ")?;
    let card = console.read_line("Please enter your card number: ")?;

    let account = match directory.find_by_card_number(&card) {
        Some(account) if account.name == name => account,
        _ => {
            tracing::debug!("identification failed");
            return Ok(session);
        }
    };

    for attempt in 1..=MAX_PIN_TRIES {
        let pin = console.read_secret("Please enter your PIN: ")?;
        if pin == account.pin {
            tracing::info!(card = %account.card_number, "user authenticated");
            session.current_user = Some(account.card_number.clone());
            session.is_authenticated = true;
            return Ok(session);
        }
        tracing::info!(card = %account.card_number, attempt, "wrong PIN");
        console.write_line("Sorry, try again.")?;
    }

    tracing::warn!(card = %account.card_number, "PIN attempts exhausted");
    session.current_user = None;
    session.wants_to_quit = true;
    Ok(session)
}

pub(crate) fn show_menu<C: Console>(console: &mut C) -> io::Result<()> {
    console.write_line("\n\n------------------------------------------------")?;
    console.write_line("You can perform the following actions: ")?;
    for entry in &MENU {
        console.write_line(&format!("\t{}", entry.text))?;
    }
    Ok(())
}

/// Dispatches a 1-based menu choice. Anything outside the menu only gets a warning.
pub(crate) fn select_option<C: Console>(
    mut session: Session,
    choice: i64,
    directory: &mut Directory,
    console: &mut C,
) -> io::Result<Session> {
    let entry = usize::try_from(choice)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| MENU.get(index));
    let Some(entry) = entry else {
        console.write_line("Invalid choice.")?;
        return Ok(session);
    };
    let Some(action) = entry.action else {
        session.wants_to_quit = true;
        return Ok(session);
    };
    // an authenticated session always has a user; if not, there's nothing to act on
    let Some(card) = session.current_user.as_deref() else {
        return Ok(session);
    };
    match action {
        Action::Deposit => deposit(card, directory, console)?,
        Action::Withdraw => withdraw(card, directory, console)?,
        Action::Transfer => transfer(card, directory, console)?,
        Action::ViewBalance => view_balance(card, directory, console)?,
    }
    Ok(session)
}

/// Turns a directory refusal into something to tell the user.
fn report<C: Console>(console: &mut C, error: Error) -> io::Result<()> {
    tracing::info!("operation refused: {error}");
    match error {
        Error::InsufficientFunds { .. } => {
            console.write_line("\n\nYou don't have that much in your account.")
        }
        Error::UnknownCard(_) => console.write_line("\nThis card number doesn't exist!"),
        Error::Overflow => console.write_line("\n\nThat amount is too large."),
        // only raised while building the directory, listed for exhaustiveness
        Error::DuplicateCardNumber(_) => console.write_line(&format!("\n\n{error}")),
    }
}

fn deposit<C: Console>(card: &str, directory: &mut Directory, console: &mut C) -> io::Result<()> {
    let amount = ask_for_money(console, "How much would you like to deposit (or 0 to cancel): ")?;
    match directory.deposit(card, amount) {
        Ok(_) => console.write_line(&format!("\n${amount} has been added to your balance.")),
        Err(e) => report(console, e),
    }
}

fn withdraw<C: Console>(card: &str, directory: &mut Directory, console: &mut C) -> io::Result<()> {
    let amount = ask_for_money(console, "How much would you like to withdraw (or 0 to cancel): ")?;
    match directory.withdraw(card, amount) {
        Ok(_) => console.write_line(&format!(
            "\n\n${amount} will come out of the ATM in just a moment."
        )),
        Err(e) => report(console, e),
    }
}

fn transfer<C: Console>(card: &str, directory: &mut Directory, console: &mut C) -> io::Result<()> {
    let destination = console.read_line("Which card number would you like to transfer to: ")?;
    if directory.find_by_card_number(&destination).is_none() {
        return report(console, Error::UnknownCard(destination));
    }
    let amount = ask_for_money(console, "How much would you like to transfer (or 0 to cancel): ")?;
    match directory.transfer(card, &destination, amount) {
        Ok(()) => console.write_line(&format!(
            "\n\n${amount} has been transfered to {destination}."
        )),
        Err(Error::InsufficientFunds { .. }) => console.write_line(
            "\n\nYou don't have enough in your account in order to complete this transfer.",
        ),
        Err(e) => report(console, e),
    }
}

fn view_balance<C: Console>(card: &str, directory: &Directory, console: &mut C) -> io::Result<()> {
    match directory.balance(card) {
        Ok(balance) => console.write_line(&format!("\n\nYour current balance is ${balance}")),
        Err(e) => report(console, e),
    }
}
