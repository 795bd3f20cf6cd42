//! 보고서 저장 후 재해석 회귀 테스트.
use air_energy_estimator::compressor::{estimate, CompressorType, LossCategory};
use air_energy_estimator::inputs::{InputParameters, DEFAULT_INPUTS};
use air_energy_estimator::report::{self, ReportError};
use approx::assert_abs_diff_eq;
use chrono::NaiveDate;
use std::fs;

fn stamp() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 31)
        .unwrap()
        .and_hms_opt(23, 59, 1)
        .unwrap()
}

#[test]
fn exported_report_parses_back() {
    let dir = tempfile::tempdir().unwrap();
    let inputs = InputParameters {
        compressor_type: CompressorType::RotaryScrew,
        power_kw: 55.0,
        hours_per_day: 20.0,
        efficiency: 0.78,
        ..DEFAULT_INPUTS
    };
    let r = estimate(&inputs);
    let path = report::export(&r, dir.path(), stamp()).unwrap();
    assert_eq!(
        path.file_name().and_then(|n| n.to_str()),
        Some("Report_20250131_235901.txt")
    );

    let parsed = report::parse(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed.compressor_label, "Rotary Screw");
    let b = r.breakdown;
    let expected = [b.leak, b.idle, b.pressure_drop, b.overcapacity, b.heat, b.useful];
    for (got, want) in parsed.breakdown.iter().zip(expected) {
        assert_abs_diff_eq!(*got, want, epsilon = 0.005);
    }
    assert_abs_diff_eq!(parsed.daily_energy_kwh, r.daily_energy_kwh, epsilon = 0.005);
    assert_abs_diff_eq!(parsed.monthly_cost, r.monthly_cost, epsilon = 0.005);
    assert_eq!(parsed.tip, r.recommended_tip());
    assert_eq!(parsed.main_loss_category(), Some(r.recommendation));
}

#[test]
fn reference_scenario_report_values() {
    let text = report::render(&estimate(&DEFAULT_INPUTS));
    let parsed = report::parse(&text).unwrap();
    assert_eq!(parsed.breakdown, [21.18, 14.12, 7.06, 7.06, 7.06, 84.71]);
    assert_eq!(parsed.annual_co2_kg, 46757.65);
    assert_eq!(parsed.main_loss, LossCategory::AirLeaks.label());
}

#[test]
fn missing_directory_is_surfaced() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("no_such_folder");
    let err = report::export(&estimate(&DEFAULT_INPUTS), &missing, stamp()).unwrap_err();
    match err {
        ReportError::Io { path, .. } => assert!(path.starts_with(&missing)),
        other => panic!("unexpected: {other:?}"),
    }
}
