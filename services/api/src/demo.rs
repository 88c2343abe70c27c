use crate::infra::{InMemoryBorrowerRepository, InMemoryExportPublisher};
use clap::Args;
use lender_ai::error::AppError;
use lender_ai::workflows::credit::CreditLiabilityImporter;
use lender_ai::workflows::qualification::{
    compute_metrics, snapshot_from_form, BorrowerIntakeForm, BorrowerQualificationService,
    DebtForm, EmployerForm, PurchasePower, QualificationMetrics,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional liabilities CSV merged into the sample borrower's debts.
    #[arg(long)]
    pub(crate) liabilities_csv: Option<PathBuf>,
    /// Destination label recorded on the export event.
    #[arg(long, default_value = "arive")]
    pub(crate) destination: String,
    /// Skip the export portion of the demo.
    #[arg(long)]
    pub(crate) skip_export: bool,
}

#[derive(Args, Debug)]
pub(crate) struct QualificationReportArgs {
    /// Path to a saved intake form (JSON)
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Optional liabilities CSV merged into the debts tab
    #[arg(long)]
    pub(crate) liabilities_csv: Option<PathBuf>,
    /// Emit the raw metrics record as JSON instead of the rendered report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_qualification_report(args: QualificationReportArgs) -> Result<(), AppError> {
    let QualificationReportArgs {
        form,
        liabilities_csv,
        json,
    } = args;

    let file = std::fs::File::open(form)?;
    let mut form: BorrowerIntakeForm = serde_json::from_reader(file)?;
    merge_liabilities(&mut form, liabilities_csv)?;

    let snapshot = snapshot_from_form(&form);
    let metrics = compute_metrics(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&metrics)?);
    } else {
        render_metrics(&metrics);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        liabilities_csv,
        destination,
        skip_export,
    } = args;

    println!("Borrower qualification demo");

    let mut form = sample_form();
    merge_liabilities(&mut form, liabilities_csv)?;

    let repository = Arc::new(InMemoryBorrowerRepository::default());
    let exports = InMemoryExportPublisher::default();
    let service =
        BorrowerQualificationService::new(repository, Arc::new(exports.clone()));

    let record = match service.intake(form) {
        Ok(record) => record,
        Err(err) => {
            println!("  Intake rejected: {}", err);
            return Ok(());
        }
    };
    println!("\nOpened borrower file {}", record.id.0);

    let metrics = match service.qualify(&record.id) {
        Ok(metrics) => metrics,
        Err(err) => {
            println!("  Qualification unavailable: {}", err);
            return Ok(());
        }
    };
    render_metrics(&metrics);

    if !skip_export {
        let event = match service.export(&record.id, &destination) {
            Ok(event) => event,
            Err(err) => {
                println!("  Export unavailable: {}", err);
                return Ok(());
            }
        };
        println!("\nExported to '{}':", event.destination);
        for (key, value) in &event.details {
            println!("  {key} = {value}");
        }
        println!("Recorded export events: {}", exports.events().len());
    }

    Ok(())
}

fn merge_liabilities(
    form: &mut BorrowerIntakeForm,
    path: Option<PathBuf>,
) -> Result<(), AppError> {
    let Some(path) = path else {
        return Ok(());
    };

    let imported = CreditLiabilityImporter::from_path(path)?;
    println!("Imported {} liabilities from credit report", imported.len());
    form.debts.extend(imported.into_iter().map(|debt| DebtForm {
        kind: debt.kind,
        monthly_payment: Some(format!("{:.2}", debt.monthly_payment)),
    }));

    Ok(())
}

/// Sample purchase scenario: $84k salaried borrower, $350k price, 5% down,
/// 6.5% rate, $3k taxes, $1.2k insurance, one $400/mo auto loan.
fn sample_form() -> BorrowerIntakeForm {
    BorrowerIntakeForm {
        primary_employers: vec![EmployerForm {
            name: "Cedar Clinic".to_string(),
            pay_type: Some("salary".to_string()),
            salary_amount: Some("$84,000".to_string()),
            salary_frequency: Some("annual".to_string()),
            ..EmployerForm::default()
        }],
        debts: vec![DebtForm {
            kind: "auto loan".to_string(),
            monthly_payment: Some("400".to_string()),
        }],
        loan_purpose: Some("purchase".to_string()),
        purchase_price: Some("350000".to_string()),
        down_payment_amount: Some("17500".to_string()),
        interest_rate: Some("6.5".to_string()),
        property_taxes_annual: Some("3000".to_string()),
        insurance_annual: Some("1200".to_string()),
        ..BorrowerIntakeForm::default()
    }
}

fn render_metrics(metrics: &QualificationMetrics) {
    println!("\nIncome");
    println!(
        "  employment {:>12.2}  co {:>12.2}",
        metrics.monthly_employment_income, metrics.co_monthly_employment_income
    );
    println!(
        "  other      {:>12.2}  co {:>12.2}",
        metrics.monthly_other_income, metrics.co_monthly_other_income
    );
    println!(
        "  total/mo   {:>12.2}  annual {:>12.2}",
        metrics.total_monthly_income, metrics.annual_income
    );

    println!("\nAssets and debts");
    println!(
        "  assets {:>12.2}  liquid {:>12.2}  debts/mo {:>10.2}  current DTI {:>6.2}%",
        metrics.total_assets, metrics.liquid_assets, metrics.total_monthly_debts,
        metrics.current_dti
    );

    println!("\nLoan");
    println!(
        "  amount {:>12.2}  LTV {:>6.2}%  property value {:>12.2}",
        metrics.loan_amount, metrics.ltv, metrics.property_value_used
    );
    println!(
        "  P&I {:>10.2}  taxes {:>8.2}  insurance {:>8.2}  HOA {:>8.2}  PITI {:>10.2}",
        metrics.principal_and_interest,
        metrics.monthly_taxes,
        metrics.monthly_insurance,
        metrics.monthly_hoa,
        metrics.total_piti
    );
    println!(
        "  front-end DTI {:>6.2}%  back-end DTI {:>6.2}%",
        metrics.front_end_dti, metrics.back_end_dti
    );

    println!("\nMax purchase power");
    for tier in [
        &metrics.max_purchase_43,
        &metrics.max_purchase_45,
        &metrics.max_purchase_50,
    ] {
        render_tier(tier);
    }

    println!("\nCash to close");
    println!(
        "  closing costs {:>10.2}  prepaids {:>10.2}  total {:>12.2}",
        metrics.closing_costs, metrics.prepaid_items, metrics.cash_to_close
    );
}

fn render_tier(tier: &PurchasePower) {
    println!(
        "  at {:>4.1}% DTI: price {:>12.2}  PITI {:>10.2}",
        tier.dti_ceiling, tier.max_price, tier.piti
    );
}
