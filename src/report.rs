//! 효율 보고서 텍스트 생성/저장/재해석.

use chrono::NaiveDateTime;
use log::{error, info};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::chart::BREAKDOWN_LABELS;
use crate::compressor::{EnergyReport, LossCategory};

pub const REPORT_TITLE: &str = "Compressed Air Efficiency Report";
pub const CURRENCY_SYMBOL: &str = "£";

const FIELD_TYPE: &str = "Compressor Type";
const FIELD_DAILY: &str = "Daily Energy Use";
const FIELD_MONTHLY: &str = "Monthly Energy Use";
const FIELD_COST: &str = "Monthly Cost";
const FIELD_CO2: &str = "Annual CO₂ Emissions";
const FIELD_MAIN_LOSS: &str = "Main Efficiency Loss";
const FIELD_TIP: &str = "Tip to Reduce Loss";

/// 보고서 저장/해석 오류.
#[derive(Debug)]
pub enum ReportError {
    /// 파일 쓰기/읽기 실패
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// 필수 항목 누락
    MissingField(&'static str),
    /// 숫자 해석 실패
    InvalidNumber { field: &'static str, text: String },
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io { path, source } => {
                write!(f, "cannot write report {}: {source}", path.display())
            }
            ReportError::MissingField(field) => write!(f, "report field missing: {field}"),
            ReportError::InvalidNumber { field, text } => {
                write!(f, "report field {field} has invalid number '{text}'")
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// 고정 양식의 보고서 본문을 만든다. 수치는 소수 둘째 자리까지 기록한다.
pub fn render(report: &EnergyReport) -> String {
    let b = &report.breakdown;
    let values = [
        b.leak,
        b.idle,
        b.pressure_drop,
        b.overcapacity,
        b.heat,
        b.useful,
    ];
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    out.push_str(&format!("{FIELD_TYPE}: {}\n", report.compressor_label()));
    out.push_str(&format!(
        "{FIELD_DAILY}: {:.2} kWh\n",
        report.daily_energy_kwh
    ));
    out.push_str(&format!(
        "{FIELD_MONTHLY}: {:.2} kWh\n",
        report.monthly_energy_kwh
    ));
    out.push_str(&format!(
        "{FIELD_COST}: {CURRENCY_SYMBOL}{:.2}\n",
        report.monthly_cost
    ));
    out.push_str(&format!("{FIELD_CO2}: {:.2} kg\n", report.annual_co2_kg));
    out.push_str("\n--- Energy Loss Breakdown ---\n");
    for (label, value) in BREAKDOWN_LABELS.iter().zip(values) {
        out.push_str(&format!("{label}: {value:.2} kWh\n"));
    }
    out.push('\n');
    out.push_str(&format!(
        "{FIELD_MAIN_LOSS}: {}\n",
        report.recommendation.label()
    ));
    out.push_str(&format!("{FIELD_TIP}: {}\n", report.recommended_tip()));
    out
}

/// `Report_YYYYMMDD_HHMMSS.txt` 형식의 파일명.
pub fn report_filename(timestamp: NaiveDateTime) -> String {
    format!("Report_{}.txt", timestamp.format("%Y%m%d_%H%M%S"))
}

/// 기본 저장 위치: 다운로드 폴더, 없으면 홈, 그것도 없으면 현재 디렉터리.
pub fn default_export_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// 보고서를 `dir`에 저장하고 파일 경로를 반환한다. 디렉터리는 새로 만들지 않는다.
pub fn export(
    report: &EnergyReport,
    dir: &Path,
    timestamp: NaiveDateTime,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(report_filename(timestamp));
    match fs::write(&path, render(report)) {
        Ok(()) => {
            info!("report saved to {}", path.display());
            Ok(path)
        }
        Err(source) => {
            error!("failed to save report to {}: {source}", path.display());
            Err(ReportError::Io { path, source })
        }
    }
}

/// 저장된 보고서에서 다시 읽어들인 값.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedReport {
    pub compressor_label: String,
    pub daily_energy_kwh: f64,
    pub monthly_energy_kwh: f64,
    pub monthly_cost: f64,
    pub annual_co2_kg: f64,
    /// 누설, 무부하, 압력강하, 과용량, 열, 유효 순서
    pub breakdown: [f64; 6],
    pub main_loss: String,
    pub tip: String,
}

impl ParsedReport {
    /// 주요 손실 라벨에 해당하는 항목.
    pub fn main_loss_category(&self) -> Option<LossCategory> {
        LossCategory::ALL
            .into_iter()
            .find(|c| c.label() == self.main_loss)
    }
}

/// 보고서 본문에서 고정 항목을 읽는다.
pub fn parse(text: &str) -> Result<ParsedReport, ReportError> {
    let fields: HashMap<&str, &str> = text
        .lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect();

    let text_field = |name: &'static str| -> Result<String, ReportError> {
        fields
            .get(name)
            .map(|v| v.to_string())
            .ok_or(ReportError::MissingField(name))
    };
    let number_field = |name: &'static str| -> Result<f64, ReportError> {
        let raw = fields.get(name).ok_or(ReportError::MissingField(name))?;
        let cleaned = raw
            .trim_start_matches(CURRENCY_SYMBOL)
            .trim_end_matches("kWh")
            .trim_end_matches("kg")
            .trim();
        cleaned.parse::<f64>().map_err(|_| ReportError::InvalidNumber {
            field: name,
            text: raw.to_string(),
        })
    };

    let mut breakdown = [0.0; 6];
    for (slot, label) in breakdown.iter_mut().zip(BREAKDOWN_LABELS) {
        *slot = number_field(label)?;
    }

    Ok(ParsedReport {
        compressor_label: text_field(FIELD_TYPE)?,
        daily_energy_kwh: number_field(FIELD_DAILY)?,
        monthly_energy_kwh: number_field(FIELD_MONTHLY)?,
        monthly_cost: number_field(FIELD_COST)?,
        annual_co2_kg: number_field(FIELD_CO2)?,
        breakdown,
        main_loss: text_field(FIELD_MAIN_LOSS)?,
        tip: text_field(FIELD_TIP)?,
    })
}
