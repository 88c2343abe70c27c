use crate::workflows::qualification::domain::{BorrowerSnapshot, Employer, OtherIncome, PayStructure};

/// Average weeks per month (52 / 12) used to monthlyize hourly pay.
pub(crate) const WEEKS_PER_MONTH: f64 = 4.333;

pub(crate) struct IncomeTotals {
    pub monthly_employment_income: f64,
    pub co_monthly_employment_income: f64,
    pub monthly_other_income: f64,
    pub co_monthly_other_income: f64,
    pub total_monthly_income: f64,
}

/// Monthly qualifying income for one employer. Previous employers are kept on
/// the file for history but carry no income, variable pay included.
pub(crate) fn employer_monthly_income(employer: &Employer) -> f64 {
    if employer.is_previous {
        return 0.0;
    }

    let base = match employer.pay {
        PayStructure::Salaried { annual_amount } => annual_amount / 12.0,
        PayStructure::Hourly {
            rate,
            hours_per_week,
        } => rate * hours_per_week * WEEKS_PER_MONTH,
    };

    base + employer.overtime_monthly + employer.bonus_monthly + employer.commission_monthly
}

fn employment_total(employers: &[Employer]) -> f64 {
    employers.iter().map(employer_monthly_income).sum()
}

fn other_income_total(sources: &[OtherIncome]) -> f64 {
    sources.iter().map(|income| income.monthly_amount).sum()
}

/// Aggregate the four income buckets. Co-borrower buckets collapse to zero
/// when no co-borrower is on the file, even if the co lists are populated;
/// the data stays untouched for when the co-borrower is re-enabled.
pub(crate) fn aggregate(snapshot: &BorrowerSnapshot) -> IncomeTotals {
    let monthly_employment_income = employment_total(&snapshot.primary_employers);
    let monthly_other_income = other_income_total(&snapshot.primary_other_income);

    let (co_monthly_employment_income, co_monthly_other_income) = if snapshot.has_co_borrower {
        (
            employment_total(&snapshot.co_employers),
            other_income_total(&snapshot.co_other_income),
        )
    } else {
        (0.0, 0.0)
    };

    let total_monthly_income = monthly_employment_income
        + co_monthly_employment_income
        + monthly_other_income
        + co_monthly_other_income;

    IncomeTotals {
        monthly_employment_income,
        co_monthly_employment_income,
        monthly_other_income,
        co_monthly_other_income,
        total_monthly_income,
    }
}
