//! Importer for credit-report liability exports.
//!
//! Credit vendors hand back a flat CSV of open tradelines; this module turns
//! one into the debts list on the borrower file so the officer does not
//! re-key every account. Import shares the intake parse-or-zero policy for
//! money columns, but a structurally broken CSV is a hard error rather than
//! an empty debts tab.

mod mapping;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::qualification::Debt;

#[derive(Debug)]
pub enum CreditImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for CreditImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditImportError::Io(err) => {
                write!(f, "failed to read liabilities export: {}", err)
            }
            CreditImportError::Csv(err) => write!(f, "invalid liabilities CSV data: {}", err),
        }
    }
}

impl std::error::Error for CreditImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CreditImportError::Io(err) => Some(err),
            CreditImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CreditImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CreditImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CreditLiabilityImporter;

impl CreditLiabilityImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, CreditImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Debt>, CreditImportError> {
        let records = parser::parse_records(reader)?;

        Ok(records
            .into_iter()
            // Closed accounts report neither a payment nor a balance and
            // carry no weight in DTI.
            .filter(|record| record.monthly_payment > 0.0 || record.balance > 0.0)
            .map(|record| Debt {
                kind: mapping::debt_kind(&record.account_type),
                monthly_payment: record.monthly_payment,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "\
Creditor,Account Type,Monthly Payment,Balance
Chase,Credit Card,\"$45\",\"$1,320\"
Wells Fargo,Auto Loan,412.50,18000
Navient,Student Loan,0,24000
Old Gym,Collection,0,0
";

    #[test]
    fn imports_open_tradelines() {
        let debts = CreditLiabilityImporter::from_reader(Cursor::new(SAMPLE))
            .expect("sample CSV imports");

        assert_eq!(debts.len(), 3);
        assert_eq!(debts[0].kind, "revolving");
        assert!((debts[0].monthly_payment - 45.0).abs() < f64::EPSILON);
        assert_eq!(debts[1].kind, "auto loan");
        // Deferred student loan stays on the file with a zero payment.
        assert_eq!(debts[2].kind, "student loan");
        assert_eq!(debts[2].monthly_payment, 0.0);
    }

    #[test]
    fn rejects_malformed_csv() {
        let broken = "Creditor,Account Type\n\"unterminated";
        let result = CreditLiabilityImporter::from_reader(Cursor::new(broken));
        assert!(matches!(result, Err(CreditImportError::Csv(_))));
    }
}
