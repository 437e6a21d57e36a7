use super::common::*;
use crate::workflows::permits::{
    evaluate, explain, summarize, Agency, Confidence, Evaluator, FactModel, ImprovementType,
    PermitKind, WorkflowTrack,
};

#[test]
fn full_waterfront_scenario_orders_all_permits() {
    let summary = summarize(&Evaluator::default().evaluate(&full_waterfront_facts()));

    assert_eq!(
        summary.all_permits,
        vec![
            PermitKind::CwaLicense,
            PermitKind::ShorelineSubstantial,
            PermitKind::Hpa,
            PermitKind::Section10,
        ]
    );
    assert_eq!(summary.definitely_required.len(), 3);
    assert_eq!(summary.likely_required.len(), 1);
    assert_eq!(summary.likely_required[0].permit, PermitKind::Section10);
    assert!(summary.conditional.is_empty());
}

#[test]
fn base_license_leads_every_waterfront_summary() {
    let variants = [
        waterfront_facts(),
        waterfront_facts().with_cost_cents(99_000_000).in_water(true),
        waterfront_facts()
            .with_improvements([ImprovementType::Bulkhead])
            .within_shoreline_jurisdiction(true),
        waterfront_facts().below_high_water_line(true),
    ];

    for facts in variants {
        let summary = summarize(&Evaluator::default().evaluate(&facts));
        assert_eq!(summary.all_permits.first(), Some(&PermitKind::CwaLicense));
    }
}

#[test]
fn buckets_preserve_relative_order() {
    let facts = waterfront_facts()
        .with_improvements([ImprovementType::MooringPile, ImprovementType::Bulkhead])
        .within_shoreline_jurisdiction(true)
        .in_water(false);

    let summary = summarize(&Evaluator::default().evaluate(&facts));

    let definite: Vec<_> = summary
        .definitely_required
        .iter()
        .map(|requirement| requirement.permit)
        .collect();
    assert_eq!(
        definite,
        vec![PermitKind::CwaLicense, PermitKind::ShorelineExemption]
    );
    assert_eq!(summary.likely_required[0].permit, PermitKind::Section10);
    assert_eq!(summary.conditional[0].permit, PermitKind::Section404);
    assert_eq!(summary.confidence_of(PermitKind::Section404), Some(Confidence::Conditional));
}

#[test]
fn summary_groups_permits_by_owning_agency() {
    let facts = full_waterfront_facts()
        .with_improvements([ImprovementType::Bulkhead])
        .in_water(true);

    let summary = summarize(&Evaluator::default().evaluate(&facts));

    let agencies: Vec<Agency> = summary.by_agency.iter().map(|group| group.agency).collect();
    assert_eq!(
        agencies,
        vec![
            Agency::CascadeWaterAlliance,
            Agency::CityPlanning,
            Agency::FishAndWildlife,
            Agency::ArmyCorps,
        ]
    );
    let corps = summary
        .by_agency
        .iter()
        .find(|group| group.agency == Agency::ArmyCorps)
        .expect("corps group");
    assert_eq!(
        corps.permits,
        vec![PermitKind::Section10, PermitKind::Section404]
    );
    assert_eq!(corps.agency_name, "U.S. Army Corps of Engineers");
}

#[test]
fn summarize_is_idempotent() {
    let result = Evaluator::default().evaluate(&full_waterfront_facts());

    assert_eq!(summarize(&result), summarize(&result));
}

#[test]
fn adu_without_sewer_needs_septic_but_not_shoreline() {
    let determination = evaluate(&adu_details()).expect("adu evaluates");
    let summary = determination.summary;

    assert_eq!(
        summary.confidence_of(PermitKind::SepticPermit),
        Some(Confidence::Definite)
    );
    assert!(!summary.contains(PermitKind::AduShorelinePermit));
    assert_eq!(summary.all_permits[0], PermitKind::AduBuildingPermit);
}

#[test]
fn explain_returns_rationale_only_for_present_permits() {
    let summary = summarize(&Evaluator::default().evaluate(&full_waterfront_facts()));

    let rationale = explain(PermitKind::Hpa, &summary).expect("hpa explained");
    assert!(rationale.contains("hydraulic project approval"));
    assert!(explain(PermitKind::ShorelineExemption, &summary).is_none());
}

#[test]
fn elevation_is_reported_as_a_site_note() {
    let below = summarize(
        &Evaluator::default().evaluate(&waterfront_facts().with_elevation_feet(543.5)),
    );
    assert_eq!(
        below.site_notes,
        vec!["Site elevation 543.5 ft is at or below the 544 ft ordinary high-water mark"]
    );

    let above = summarize(
        &Evaluator::default().evaluate(&waterfront_facts().with_elevation_feet(552.0)),
    );
    assert!(above.site_notes[0].contains("is above"));

    let solar = summarize(
        &Evaluator::default()
            .evaluate(&FactModel::new(WorkflowTrack::Solar).with_elevation_feet(540.0)),
    );
    assert!(solar.site_notes.is_empty());
}
