use console::Terminal;
use directory::Directory;
use tracing_subscriber::EnvFilter;

mod config;
mod console;
mod data;
mod directory;
mod read;
mod session;

fn main() -> Result<(), anyhow::Error> {
    // logs go to stderr so they never mix with the dialogue on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut directory = Directory::seeded()?;
    session::run(&mut directory, &mut Terminal::new())?;
    for account in directory.accounts() {
        tracing::debug!(card = %account.card_number, balance = %account.balance, "final balance");
    }
    tracing::debug!(total = %directory.total(), "final holdings");
    Ok(())
}
