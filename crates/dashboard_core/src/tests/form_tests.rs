use super::*;
use crate::{
    reconcile::ReconciliationPolicy,
    test_support::{loaded_dashboard, Op},
};

fn filled() -> CreationForm {
    let mut form = CreationForm::new();
    form.set_name("  Shadow ");
    form.set_years_of_experience("4");
    form.set_breed(" Bengal  ");
    form.set_salary("1200");
    form
}

#[test]
fn payload_trims_text_and_coerces_numbers() {
    let payload = filled().payload();
    assert_eq!(payload.name, "Shadow");
    assert_eq!(payload.breed, "Bengal");
    assert_eq!(payload.years_of_experience, 4.0);
    assert_eq!(payload.salary, 1200.0);
}

#[test]
fn name_is_capped_at_the_service_limit() {
    let mut form = CreationForm::new();
    form.set_name(&"é".repeat(MAX_NAME_CHARS + 30));
    assert_eq!(form.name().chars().count(), MAX_NAME_CHARS);
}

#[test]
fn coercion_follows_lenient_number_rules() {
    assert_eq!(coerce_number(""), 0.0);
    assert_eq!(coerce_number("   "), 0.0);
    assert_eq!(coerce_number(" 7 "), 7.0);
    assert_eq!(coerce_number("-2.5"), -2.5);
    assert_eq!(coerce_number("1e3"), 1000.0);
    assert_eq!(coerce_number(".5"), 0.5);
    assert_eq!(coerce_number("0x10"), 16.0);
    assert_eq!(coerce_number("0b101"), 5.0);
    assert_eq!(coerce_number("Infinity"), f64::INFINITY);
    assert_eq!(coerce_number("-Infinity"), f64::NEG_INFINITY);
    for junk in ["abc", "12abc", "inf", "NaN", "1,000", "0x", "0x1g", "--1", "e5"] {
        assert!(coerce_number(junk).is_nan(), "{junk:?} should be NaN");
    }
}

#[test]
fn unparseable_numbers_reach_the_payload_as_nan() {
    let mut form = filled();
    form.set_salary("lots");
    assert!(form.payload().salary.is_nan());
}

#[tokio::test]
async fn successful_submit_clears_every_field() {
    let (dashboard, transport) = loaded_dashboard(Vec::new(), ReconciliationPolicy::default()).await;
    let mut form = filled();

    assert_eq!(form.submit(&dashboard).await, Outcome::Completed);

    assert!(form.is_blank());
    assert_eq!(transport.calls(Op::Create).await, 1);
    let records = dashboard.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "Shadow");
}

#[tokio::test]
async fn rejected_submit_still_clears_every_field() {
    let (dashboard, transport) = loaded_dashboard(Vec::new(), ReconciliationPolicy::default()).await;
    transport
        .fail_next(Op::Create, 422, "Input should be a valid integer")
        .await;
    let mut form = filled();
    form.set_years_of_experience("many");

    assert_eq!(form.submit(&dashboard).await, Outcome::Failed);

    assert!(form.is_blank());
    assert_eq!(form.name(), "");
    assert_eq!(form.years_of_experience(), "");
    assert_eq!(form.breed(), "");
    assert_eq!(form.salary(), "");
    assert_eq!(
        dashboard.error().as_deref(),
        Some("Input should be a valid integer")
    );
}
