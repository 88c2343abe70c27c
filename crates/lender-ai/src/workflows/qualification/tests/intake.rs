use super::common::*;
use crate::workflows::qualification::domain::{LoanPurpose, PayStructure};
use crate::workflows::qualification::intake::{
    parse_money, parse_rate, snapshot_from_form, BorrowerIntakeForm, EmployerForm,
};

#[test]
fn parse_money_strips_currency_punctuation() {
    assert_eq!(parse_money(Some("$1,250.50")), 1_250.50);
    assert_eq!(parse_money(Some(" 300 ")), 300.0);
    assert_eq!(parse_money(Some("")), 0.0);
    assert_eq!(parse_money(Some("abc")), 0.0);
    assert_eq!(parse_money(None), 0.0);
}

#[test]
fn parse_money_clamps_negative_amounts() {
    assert_eq!(parse_money(Some("-500")), 0.0);
}

#[test]
fn parse_rate_tolerates_percent_sign() {
    assert_eq!(parse_rate(Some("6.5%")), 6.5);
    assert_eq!(parse_rate(Some("7")), 7.0);
    assert_eq!(parse_rate(Some("n/a")), 0.0);
}

#[test]
fn salary_frequency_normalizes_to_annual() {
    let annual = EmployerForm {
        pay_type: Some("salary".to_string()),
        salary_amount: Some("84000".to_string()),
        salary_frequency: Some("annual".to_string()),
        ..EmployerForm::default()
    };
    let monthly = EmployerForm {
        salary_amount: Some("7000".to_string()),
        salary_frequency: Some("monthly".to_string()),
        ..annual.clone()
    };
    let weekly = EmployerForm {
        salary_amount: Some("1615.38".to_string()),
        salary_frequency: Some("weekly".to_string()),
        ..annual.clone()
    };

    let form = BorrowerIntakeForm {
        primary_employers: vec![annual, monthly, weekly],
        ..BorrowerIntakeForm::default()
    };
    let snapshot = snapshot_from_form(&form);

    let annual_amounts: Vec<f64> = snapshot
        .primary_employers
        .iter()
        .map(|employer| match employer.pay {
            PayStructure::Salaried { annual_amount } => annual_amount,
            PayStructure::Hourly { .. } => panic!("expected salaried employer"),
        })
        .collect();

    assert_eq!(annual_amounts[0], 84_000.0);
    assert_eq!(annual_amounts[1], 84_000.0);
    assert!((annual_amounts[2] - 83_999.76).abs() < 0.01);
}

#[test]
fn hourly_pay_type_builds_hourly_structure() {
    let form = BorrowerIntakeForm {
        primary_employers: vec![EmployerForm {
            pay_type: Some("Hourly".to_string()),
            hourly_rate: Some("$32.50".to_string()),
            hours_per_week: Some("38".to_string()),
            ..EmployerForm::default()
        }],
        ..BorrowerIntakeForm::default()
    };

    let snapshot = snapshot_from_form(&form);
    match snapshot.primary_employers[0].pay {
        PayStructure::Hourly {
            rate,
            hours_per_week,
        } => {
            assert_eq!(rate, 32.50);
            assert_eq!(hours_per_week, 38.0);
        }
        PayStructure::Salaried { .. } => panic!("expected hourly employer"),
    }
}

#[test]
fn unknown_pay_type_degrades_to_zero_salary() {
    let form = BorrowerIntakeForm {
        primary_employers: vec![EmployerForm {
            pay_type: Some("contract".to_string()),
            ..EmployerForm::default()
        }],
        ..BorrowerIntakeForm::default()
    };

    let snapshot = snapshot_from_form(&form);
    assert_eq!(
        snapshot.primary_employers[0].pay,
        PayStructure::Salaried { annual_amount: 0.0 }
    );
}

#[test]
fn refinance_purpose_carries_refinance_terms() {
    let form = BorrowerIntakeForm {
        loan_purpose: Some("Refinance".to_string()),
        property_value: Some("500,000".to_string()),
        current_loan_balance: Some("280000".to_string()),
        cash_out_amount: Some("20000".to_string()),
        ..BorrowerIntakeForm::default()
    };

    let snapshot = snapshot_from_form(&form);
    assert_eq!(
        snapshot.loan_purpose,
        LoanPurpose::Refinance {
            property_value: 500_000.0,
            current_loan_balance: 280_000.0,
            cash_out_amount: 20_000.0,
        }
    );
}

#[test]
fn blank_form_is_fully_computable() {
    let snapshot = snapshot_from_form(&BorrowerIntakeForm::default());
    assert_eq!(
        snapshot.loan_purpose,
        LoanPurpose::Purchase {
            purchase_price: 0.0,
            down_payment_amount: 0.0,
        }
    );
    assert_eq!(snapshot.interest_rate_percent, 0.0);
    assert!(snapshot.primary_employers.is_empty());
}

#[test]
fn scenario_form_matches_scenario_snapshot() {
    assert_eq!(snapshot_from_form(&scenario_form()), scenario_snapshot());
}
