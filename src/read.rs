use crate::data::Account;

/// Simple CSV importer for the account roster (`name,card_number,pin[,balance]`).
/// Any malformed row aborts the whole import: a half-loaded bank is worse than none.
pub(crate) fn read_roster<R: std::io::Read>(reader: R) -> Result<Vec<Account>, anyhow::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut accounts = Vec::new();
    for result in rdr.deserialize() {
        let account: Account = result?;
        tracing::debug!(name = %account.name, card = %account.card_number, "roster entry");
        accounts.push(account);
    }
    Ok(accounts)
}
