use serde::{Deserialize, Serialize};

/// Identifier wrapper for borrower files tracked through intake.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BorrowerId(pub String);

/// Asset type string reserved for retirement accounts; everything else counts as liquid.
pub const RETIREMENT_ASSET_TYPE: &str = "401(k)/IRA";

/// Read-only view of one borrower's interview state at a point in time.
///
/// All monetary fields are already-parsed, non-negative decimals; the intake
/// boundary is responsible for the parse-or-zero coercion so the engine never
/// sees raw form strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerSnapshot {
    pub has_co_borrower: bool,
    pub primary_employers: Vec<Employer>,
    pub co_employers: Vec<Employer>,
    pub primary_other_income: Vec<OtherIncome>,
    pub co_other_income: Vec<OtherIncome>,
    pub assets: Vec<Asset>,
    pub debts: Vec<Debt>,
    pub loan_purpose: LoanPurpose,
    /// Annual note rate as a percentage, e.g. `7.0` meaning 7%.
    pub interest_rate_percent: f64,
    pub property_taxes_annual: f64,
    pub insurance_annual: f64,
    pub hoa_monthly: f64,
}

/// Loan purpose with the terms that only exist for that purpose.
///
/// Refinance deliberately carries no down-payment field; the two scenarios
/// size the loan from different facts and conflating them in one record is
/// how stale fields leak into the math.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "purpose", rename_all = "snake_case")]
pub enum LoanPurpose {
    Purchase {
        purchase_price: f64,
        down_payment_amount: f64,
    },
    Refinance {
        property_value: f64,
        current_loan_balance: f64,
        cash_out_amount: f64,
    },
}

impl LoanPurpose {
    pub const fn label(&self) -> &'static str {
        match self {
            LoanPurpose::Purchase { .. } => "purchase",
            LoanPurpose::Refinance { .. } => "refinance",
        }
    }
}

/// One employment record on the income tab.
///
/// Previous employers stay on the record for the loan file history but are
/// excluded from every income total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employer {
    pub name: String,
    #[serde(flatten)]
    pub pay: PayStructure,
    pub overtime_monthly: f64,
    pub bonus_monthly: f64,
    pub commission_monthly: f64,
    pub is_previous: bool,
}

/// Base compensation, tagged by pay type so an hourly employer cannot carry
/// a salary amount and vice versa.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pay_type", rename_all = "snake_case")]
pub enum PayStructure {
    Salaried { annual_amount: f64 },
    Hourly { rate: f64, hours_per_week: f64 },
}

/// Non-employment income source (rental, pension, social security, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherIncome {
    pub source: String,
    pub monthly_amount: f64,
}

/// Declared asset account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub kind: String,
    pub balance: f64,
}

impl Asset {
    /// Retirement accounts are not available for down payment or reserves.
    pub fn is_liquid(&self) -> bool {
        self.kind != RETIREMENT_ASSET_TYPE
    }
}

/// Recurring monthly obligation from the debts tab or a credit-report import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub kind: String,
    pub monthly_payment: f64,
}

/// High level status tracked across the borrower qualification workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowerFileStatus {
    Intake,
    Qualified,
    Exported,
}

impl BorrowerFileStatus {
    pub const fn label(self) -> &'static str {
        match self {
            BorrowerFileStatus::Intake => "intake",
            BorrowerFileStatus::Qualified => "qualified",
            BorrowerFileStatus::Exported => "exported",
        }
    }
}
