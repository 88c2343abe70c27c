//! Pure qualification math: one deterministic transform from a borrower
//! snapshot to the derived metrics the rest of the system binds to.
//!
//! No I/O, no clocks, no shared state. Divisions guard their denominators
//! and yield zero instead of erroring, matching the absorb-and-continue
//! policy of the interview form; the presentation layer is responsible for
//! telling "0% DTI" apart from "no income entered yet".

mod amortization;
mod income;
mod power;

pub use power::{PurchasePower, DTI_CEILINGS};

use serde::{Deserialize, Serialize};

use super::domain::{BorrowerSnapshot, LoanPurpose};
use power::{PowerInputs, DEFAULT_DOWN_PAYMENT_FRACTION};

/// Flat closing-cost heuristic applied to the loan amount.
const CLOSING_COST_RATE: f64 = 0.03;
/// Months of taxes and insurance collected as escrow reserves at close.
const ESCROW_RESERVE_MONTHS: f64 = 6.0;

/// Derived qualification metrics. Recomputed on every call; persisted copies
/// are caches owned by the caller, never the source of truth. Field names are
/// the stable contract downstream serializers bind to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualificationMetrics {
    pub monthly_employment_income: f64,
    pub co_monthly_employment_income: f64,
    pub monthly_other_income: f64,
    pub co_monthly_other_income: f64,
    pub total_monthly_income: f64,
    pub annual_income: f64,
    pub total_assets: f64,
    pub liquid_assets: f64,
    pub total_monthly_debts: f64,
    pub current_dti: f64,
    pub loan_amount: f64,
    pub ltv: f64,
    pub property_value_used: f64,
    pub principal_and_interest: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    pub monthly_hoa: f64,
    pub total_piti: f64,
    pub front_end_dti: f64,
    pub back_end_dti: f64,
    pub max_purchase_43: PurchasePower,
    pub max_purchase_45: PurchasePower,
    pub max_purchase_50: PurchasePower,
    pub closing_costs: f64,
    pub prepaid_items: f64,
    pub cash_to_close: f64,
}

/// Ratio of `numerator` to `denominator` as a percentage, zero when the
/// denominator is not positive.
fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

/// Compute the full metrics record for one borrower snapshot.
pub fn compute_metrics(snapshot: &BorrowerSnapshot) -> QualificationMetrics {
    let income = income::aggregate(snapshot);

    let total_assets: f64 = snapshot.assets.iter().map(|asset| asset.balance).sum();
    let liquid_assets: f64 = snapshot
        .assets
        .iter()
        .filter(|asset| asset.is_liquid())
        .map(|asset| asset.balance)
        .sum();

    let total_monthly_debts: f64 = snapshot
        .debts
        .iter()
        .map(|debt| debt.monthly_payment)
        .sum();
    let current_dti = percent_of(total_monthly_debts, income.total_monthly_income);

    // Loan sizing branches on purpose; a purchase loan can never go negative
    // when the down payment exceeds the price mid-edit.
    let (loan_amount, property_value_used, down_payment_amount) = match snapshot.loan_purpose {
        LoanPurpose::Purchase {
            purchase_price,
            down_payment_amount,
        } => (
            (purchase_price - down_payment_amount).max(0.0),
            purchase_price,
            down_payment_amount,
        ),
        LoanPurpose::Refinance {
            property_value,
            current_loan_balance,
            cash_out_amount,
        } => (current_loan_balance + cash_out_amount, property_value, 0.0),
    };
    let ltv = percent_of(loan_amount, property_value_used);

    let monthly_rate = snapshot.interest_rate_percent / 100.0 / 12.0;
    let principal_and_interest = amortization::monthly_payment(loan_amount, monthly_rate);

    let monthly_taxes = snapshot.property_taxes_annual / 12.0;
    let monthly_insurance = snapshot.insurance_annual / 12.0;
    let monthly_hoa = snapshot.hoa_monthly;
    let total_piti = principal_and_interest + monthly_taxes + monthly_insurance + monthly_hoa;

    let front_end_dti = percent_of(total_piti, income.total_monthly_income);
    let back_end_dti = percent_of(total_piti + total_monthly_debts, income.total_monthly_income);

    // Projection borrows the borrower's own down-payment fraction once a
    // purchase price exists; before that (and for refinances) it assumes 3%.
    let down_payment_fraction = match snapshot.loan_purpose {
        LoanPurpose::Purchase {
            purchase_price,
            down_payment_amount,
        } if purchase_price > 0.0 => down_payment_amount / purchase_price,
        _ => DEFAULT_DOWN_PAYMENT_FRACTION,
    };

    let power_inputs = PowerInputs {
        total_monthly_income: income.total_monthly_income,
        total_monthly_debts,
        monthly_taxes,
        monthly_insurance,
        monthly_hoa,
        monthly_rate,
        down_payment_fraction,
    };
    let [max_purchase_43, max_purchase_45, max_purchase_50] =
        DTI_CEILINGS.map(|ceiling| power::at_ceiling(ceiling, &power_inputs));

    let closing_costs = loan_amount * CLOSING_COST_RATE;
    let prepaid_items = (monthly_taxes + monthly_insurance) * ESCROW_RESERVE_MONTHS;
    // Refinance files carry no down payment, so their estimate is closing
    // costs plus escrow reserves only.
    let cash_to_close = down_payment_amount + closing_costs + prepaid_items;

    QualificationMetrics {
        monthly_employment_income: income.monthly_employment_income,
        co_monthly_employment_income: income.co_monthly_employment_income,
        monthly_other_income: income.monthly_other_income,
        co_monthly_other_income: income.co_monthly_other_income,
        total_monthly_income: income.total_monthly_income,
        annual_income: income.total_monthly_income * 12.0,
        total_assets,
        liquid_assets,
        total_monthly_debts,
        current_dti,
        loan_amount,
        ltv,
        property_value_used,
        principal_and_interest,
        monthly_taxes,
        monthly_insurance,
        monthly_hoa,
        total_piti,
        front_end_dti,
        back_end_dti,
        max_purchase_43,
        max_purchase_45,
        max_purchase_50,
        closing_costs,
        prepaid_items,
        cash_to_close,
    }
}
