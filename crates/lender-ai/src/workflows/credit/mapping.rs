/// Normalize a vendor account-type label to the debts-tab vocabulary.
///
/// Vendors are not consistent about casing or wording; match on a lowered
/// label and keep anything unrecognized as "other" rather than dropping it.
pub(crate) fn debt_kind(account_type: &str) -> String {
    let lowered = account_type.trim().to_ascii_lowercase();

    let kind = if lowered.contains("credit card") || lowered.contains("revolving") {
        "revolving"
    } else if lowered.contains("auto") {
        "auto loan"
    } else if lowered.contains("student") {
        "student loan"
    } else if lowered.contains("mortgage") || lowered.contains("real estate") {
        "mortgage"
    } else if lowered.contains("installment") || lowered.contains("personal") {
        "installment"
    } else {
        "other"
    };

    kind.to_string()
}
