//! Parsing boundary between the raw interview form and the typed snapshot.
//!
//! Every numeric field on the form arrives as an optional string because the
//! loan officer may be mid-interview with most tabs blank. The coercion to a
//! decimal happens exactly once, here; the engine only ever sees typed
//! values. Missing, unparseable, or negative amounts collapse to zero so an
//! intermediate form state is always computable.

use serde::{Deserialize, Serialize};

use super::domain::{
    Asset, BorrowerSnapshot, Debt, Employer, LoanPurpose, OtherIncome, PayStructure,
};

/// Raw multi-tab interview payload as submitted by the form layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BorrowerIntakeForm {
    #[serde(default)]
    pub has_co_borrower: bool,
    #[serde(default)]
    pub primary_employers: Vec<EmployerForm>,
    #[serde(default)]
    pub co_employers: Vec<EmployerForm>,
    #[serde(default)]
    pub primary_other_income: Vec<OtherIncomeForm>,
    #[serde(default)]
    pub co_other_income: Vec<OtherIncomeForm>,
    #[serde(default)]
    pub assets: Vec<AssetForm>,
    #[serde(default)]
    pub debts: Vec<DebtForm>,
    /// "purchase" or "refinance"; anything else falls back to purchase.
    #[serde(default)]
    pub loan_purpose: Option<String>,
    #[serde(default)]
    pub purchase_price: Option<String>,
    #[serde(default)]
    pub down_payment_amount: Option<String>,
    #[serde(default)]
    pub property_value: Option<String>,
    #[serde(default)]
    pub current_loan_balance: Option<String>,
    #[serde(default)]
    pub cash_out_amount: Option<String>,
    #[serde(default)]
    pub interest_rate: Option<String>,
    #[serde(default)]
    pub property_taxes_annual: Option<String>,
    #[serde(default)]
    pub insurance_annual: Option<String>,
    #[serde(default)]
    pub hoa_monthly: Option<String>,
}

/// One employer row; salary amounts arrive as an amount plus pay frequency.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployerForm {
    #[serde(default)]
    pub name: String,
    /// "salary" or "hourly"; unrecognized values degrade to a zero salary.
    #[serde(default)]
    pub pay_type: Option<String>,
    #[serde(default)]
    pub salary_amount: Option<String>,
    /// "annual", "monthly", or "weekly"; defaults to annual.
    #[serde(default)]
    pub salary_frequency: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<String>,
    #[serde(default)]
    pub hours_per_week: Option<String>,
    #[serde(default)]
    pub overtime_monthly: Option<String>,
    #[serde(default)]
    pub bonus_monthly: Option<String>,
    #[serde(default)]
    pub commission_monthly: Option<String>,
    #[serde(default)]
    pub is_previous: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OtherIncomeForm {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub monthly_amount: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub balance: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DebtForm {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub monthly_payment: Option<String>,
}

/// Parse a monetary form value, absorbing currency punctuation.
///
/// Missing, unparseable, or negative input is `0.0` by policy.
pub fn parse_money(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return 0.0;
    };

    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' ' | '\t'))
        .collect();

    cleaned.parse::<f64>().ok().filter(|v| v.is_finite()).map_or(0.0, |v| v.max(0.0))
}

/// Parse an interest-rate form value, tolerating a trailing percent sign.
pub fn parse_rate(raw: Option<&str>) -> f64 {
    parse_money(raw.map(|value| value.trim_end_matches('%')))
}

/// Build the typed snapshot from a raw form. Total over its input: no form
/// state is rejected, partial tabs simply contribute zeros.
pub fn snapshot_from_form(form: &BorrowerIntakeForm) -> BorrowerSnapshot {
    let loan_purpose = match form.loan_purpose.as_deref().map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("refinance") => LoanPurpose::Refinance {
            property_value: parse_money(form.property_value.as_deref()),
            current_loan_balance: parse_money(form.current_loan_balance.as_deref()),
            cash_out_amount: parse_money(form.cash_out_amount.as_deref()),
        },
        _ => LoanPurpose::Purchase {
            purchase_price: parse_money(form.purchase_price.as_deref()),
            down_payment_amount: parse_money(form.down_payment_amount.as_deref()),
        },
    };

    BorrowerSnapshot {
        has_co_borrower: form.has_co_borrower,
        primary_employers: form.primary_employers.iter().map(employer_from_form).collect(),
        co_employers: form.co_employers.iter().map(employer_from_form).collect(),
        primary_other_income: form
            .primary_other_income
            .iter()
            .map(other_income_from_form)
            .collect(),
        co_other_income: form.co_other_income.iter().map(other_income_from_form).collect(),
        assets: form
            .assets
            .iter()
            .map(|asset| Asset {
                kind: asset.kind.trim().to_string(),
                balance: parse_money(asset.balance.as_deref()),
            })
            .collect(),
        debts: form
            .debts
            .iter()
            .map(|debt| Debt {
                kind: debt.kind.trim().to_string(),
                monthly_payment: parse_money(debt.monthly_payment.as_deref()),
            })
            .collect(),
        loan_purpose,
        interest_rate_percent: parse_rate(form.interest_rate.as_deref()),
        property_taxes_annual: parse_money(form.property_taxes_annual.as_deref()),
        insurance_annual: parse_money(form.insurance_annual.as_deref()),
        hoa_monthly: parse_money(form.hoa_monthly.as_deref()),
    }
}

fn employer_from_form(form: &EmployerForm) -> Employer {
    let pay = match form.pay_type.as_deref().map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("hourly") => PayStructure::Hourly {
            rate: parse_money(form.hourly_rate.as_deref()),
            hours_per_week: parse_money(form.hours_per_week.as_deref()),
        },
        _ => PayStructure::Salaried {
            annual_amount: annualized_salary(form),
        },
    };

    Employer {
        name: form.name.trim().to_string(),
        pay,
        overtime_monthly: parse_money(form.overtime_monthly.as_deref()),
        bonus_monthly: parse_money(form.bonus_monthly.as_deref()),
        commission_monthly: parse_money(form.commission_monthly.as_deref()),
        is_previous: form.is_previous,
    }
}

/// Normalize a salary amount to annual terms at the boundary so the engine
/// only ever divides by twelve.
fn annualized_salary(form: &EmployerForm) -> f64 {
    let amount = parse_money(form.salary_amount.as_deref());
    match form.salary_frequency.as_deref().map(str::trim) {
        Some(value) if value.eq_ignore_ascii_case("monthly") => amount * 12.0,
        Some(value) if value.eq_ignore_ascii_case("weekly") => amount * 52.0,
        _ => amount,
    }
}

fn other_income_from_form(form: &OtherIncomeForm) -> OtherIncome {
    OtherIncome {
        source: form.source.trim().to_string(),
        monthly_amount: parse_money(form.monthly_amount.as_deref()),
    }
}
