//! Load debts from CSV
//!
//! Expected header: `id,name,debt_type,balance,interest_rate,minimum_payment`.
//! `debt_type` may be omitted or left blank.

use anyhow::{anyhow, Context, Result};
use csv::{Reader, Trim};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use super::{Debt, DebtId, DebtType};

/// Default debt file used by the CLI when none is given
pub const DEFAULT_DEBTS_PATH: &str = "data/debts.csv";

/// Raw CSV row; amounts stay textual so they parse exactly as decimals
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: DebtId,
    name: String,
    #[serde(default)]
    debt_type: Option<String>,
    balance: String,
    interest_rate: String,
    minimum_payment: String,
}

impl CsvRow {
    fn to_debt(self) -> Result<Debt> {
        let debt_type = match self.debt_type.as_deref() {
            Some(raw) => DebtType::from_str(raw).map_err(|e| anyhow!(e))?,
            None => DebtType::Other,
        };

        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("name must not be empty"));
        }

        Ok(Debt {
            id: self.id,
            name: name.to_string(),
            debt_type,
            balance: parse_amount("balance", &self.balance)?,
            interest_rate: parse_amount("interest_rate", &self.interest_rate)?,
            minimum_payment: parse_amount("minimum_payment", &self.minimum_payment)?,
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<Decimal> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != '$' && *c != ',').collect();
    Decimal::from_str(&cleaned).with_context(|| format!("{} '{}' is not a number", field, raw))
}

/// Load all debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open debts file {}", path.display()))?;
    load_debts_from_reader(file).with_context(|| format!("Failed to load {}", path.display()))
}

/// Load debts from any reader (e.g. string buffer, request body)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Debt>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(Trim::All).from_reader(reader);
    read_rows(&mut csv_reader)
}

fn read_rows<R: std::io::Read>(reader: &mut Reader<R>) -> Result<Vec<Debt>> {
    let mut debts = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row: CsvRow = result.with_context(|| format!("Malformed row at line {}", line))?;
        let debt = row
            .to_debt()
            .with_context(|| format!("Invalid debt at line {}", line))?;
        debts.push(debt);
    }

    Ok(debts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_debts_from_reader() {
        let data = "\
id,name,debt_type,balance,interest_rate,minimum_payment
1,TD Visa,credit_card,\"$2,450.75\",19.99,75
2,Car Loan,loan,8500,6.9,250.00
3,Family,,300,0,0
";
        let debts = load_debts_from_reader(data.as_bytes()).unwrap();
        assert_eq!(debts.len(), 3);

        assert_eq!(debts[0].name, "TD Visa");
        assert_eq!(debts[0].debt_type, DebtType::CreditCard);
        assert_eq!(debts[0].balance, dec!(2450.75));
        assert_eq!(debts[0].interest_rate, dec!(19.99));

        assert_eq!(debts[1].minimum_payment, dec!(250.00));
        assert_eq!(debts[2].debt_type, DebtType::Other);
        assert_eq!(debts[2].interest_rate, Decimal::ZERO);
    }

    #[test]
    fn test_missing_debt_type_column() {
        let data = "id,name,balance,interest_rate,minimum_payment\n7,Store Card,120,24.5,25\n";
        let debts = load_debts_from_reader(data.as_bytes()).unwrap();
        assert_eq!(debts[0].id, 7);
        assert_eq!(debts[0].debt_type, DebtType::Other);
    }

    #[test]
    fn test_bad_amount_names_the_line() {
        let data = "id,name,debt_type,balance,interest_rate,minimum_payment\n1,Visa,credit_card,lots,19.99,75\n";
        let err = load_debts_from_reader(data.as_bytes()).unwrap_err();
        let message = format!("{:#}", err);
        assert!(message.contains("line 2"), "{}", message);
        assert!(message.contains("balance"), "{}", message);
    }

    #[test]
    fn test_unknown_debt_type_rejected() {
        let data = "id,name,debt_type,balance,interest_rate,minimum_payment\n1,Visa,payday,100,19.99,75\n";
        assert!(load_debts_from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_load_sample_file() {
        let debts = load_debts(DEFAULT_DEBTS_PATH).unwrap();
        assert_eq!(debts.len(), 5);
        assert_eq!(debts[0].balance, dec!(4250.00));
        assert!(crate::debt::validate_debts(&debts, Decimal::ZERO).is_ok());
    }

    #[test]
    fn test_missing_file() {
        assert!(load_debts("does/not/exist.csv").is_err());
    }
}
