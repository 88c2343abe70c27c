/// Payment count for the standard 30-year fixed note. Term is not a dial in
/// the current product.
pub(crate) const TERM_MONTHS: i32 = 360;

/// Level monthly payment for a fixed-rate note.
///
/// Zero when the loan or the rate is non-positive; a zero-rate note has no
/// meaningful amortization factor and the intake policy maps that state to a
/// zero payment rather than an error.
pub(crate) fn monthly_payment(loan_amount: f64, monthly_rate: f64) -> f64 {
    if loan_amount <= 0.0 || monthly_rate <= 0.0 {
        return 0.0;
    }

    let growth = (1.0 + monthly_rate).powi(TERM_MONTHS);
    loan_amount * (monthly_rate * growth) / (growth - 1.0)
}

/// Inverse of [`monthly_payment`]: the largest principal a given payment
/// supports at the given monthly rate.
pub(crate) fn principal_supported(payment: f64, monthly_rate: f64) -> f64 {
    if payment <= 0.0 || monthly_rate <= 0.0 {
        return 0.0;
    }

    let growth = (1.0 + monthly_rate).powi(TERM_MONTHS);
    payment * (growth - 1.0) / (monthly_rate * growth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_matches_closed_form_at_seven_percent() {
        let monthly_rate = 7.0 / 100.0 / 12.0;
        let payment = monthly_payment(300_000.0, monthly_rate);
        assert!((payment - 1995.91).abs() < 0.01, "payment was {payment}");
    }

    #[test]
    fn payment_is_zero_without_loan_or_rate() {
        assert_eq!(monthly_payment(0.0, 0.005), 0.0);
        assert_eq!(monthly_payment(250_000.0, 0.0), 0.0);
    }

    #[test]
    fn inversion_round_trips_principal() {
        let monthly_rate = 6.5 / 100.0 / 12.0;
        let payment = monthly_payment(332_500.0, monthly_rate);
        let principal = principal_supported(payment, monthly_rate);
        assert!((principal - 332_500.0).abs() < 0.01, "principal was {principal}");
    }
}
