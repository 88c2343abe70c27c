use std::io::Read;

use serde::Deserialize;

use crate::workflows::qualification::parse_money;

#[derive(Debug)]
pub(crate) struct LiabilityRecord {
    pub(crate) account_type: String,
    pub(crate) monthly_payment: f64,
    pub(crate) balance: f64,
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<LiabilityRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for record in csv_reader.deserialize::<LiabilityRow>() {
        let row = record?;
        records.push(LiabilityRecord {
            account_type: row.account_type,
            monthly_payment: parse_money(row.monthly_payment.as_deref()),
            balance: parse_money(row.balance.as_deref()),
        });
    }

    Ok(records)
}

#[derive(Debug, Deserialize)]
struct LiabilityRow {
    #[serde(rename = "Account Type")]
    account_type: String,
    #[serde(rename = "Monthly Payment", default)]
    monthly_payment: Option<String>,
    #[serde(rename = "Balance", default)]
    balance: Option<String>,
}
