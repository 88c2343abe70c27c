use serde::{Deserialize, Serialize};

use super::amortization::principal_supported;

/// Fixed back-end DTI ceilings mirroring common underwriting thresholds.
/// These are policy constants, not configuration.
pub const DTI_CEILINGS: [f64; 3] = [43.0, 45.0, 50.0];

/// Assumed down-payment fraction when no purchase price has been entered yet.
pub(crate) const DEFAULT_DOWN_PAYMENT_FRACTION: f64 = 0.03;

/// Highest affordable price at one back-end DTI ceiling, with the estimated
/// housing payment at that price for display alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PurchasePower {
    pub dti_ceiling: f64,
    pub max_price: f64,
    pub piti: f64,
}

pub(crate) struct PowerInputs {
    pub total_monthly_income: f64,
    pub total_monthly_debts: f64,
    pub monthly_taxes: f64,
    pub monthly_insurance: f64,
    pub monthly_hoa: f64,
    pub monthly_rate: f64,
    pub down_payment_fraction: f64,
}

/// Invert the affordability question at one DTI ceiling: back out the
/// principal-and-interest room under the ceiling, size the loan it supports,
/// then gross the loan up to a price through the down-payment fraction.
pub(crate) fn at_ceiling(target_dti: f64, inputs: &PowerInputs) -> PurchasePower {
    let max_total_payment =
        inputs.total_monthly_income * target_dti / 100.0 - inputs.total_monthly_debts;
    let max_pi =
        max_total_payment - inputs.monthly_taxes - inputs.monthly_insurance - inputs.monthly_hoa;

    if max_pi <= 0.0 || inputs.monthly_rate <= 0.0 {
        return PurchasePower {
            dti_ceiling: target_dti,
            max_price: 0.0,
            piti: 0.0,
        };
    }

    let max_loan = principal_supported(max_pi, inputs.monthly_rate);
    let equity_share = 1.0 - inputs.down_payment_fraction;
    let max_price = if equity_share > 0.0 {
        max_loan / equity_share
    } else {
        0.0
    };

    PurchasePower {
        dti_ceiling: target_dti,
        max_price,
        piti: max_pi + inputs.monthly_taxes + inputs.monthly_insurance + inputs.monthly_hoa,
    }
}
