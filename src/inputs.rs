use serde::{Deserialize, Serialize};

use crate::compressor::CompressorType;

/// 추정 요청 1회의 입력값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputParameters {
    /// 압축기 정격 출력 [kW]
    pub power_kw: f64,
    /// 일일 운전 시간 [h]
    pub hours_per_day: f64,
    /// 운전 압력 [bar]. 입력/표시만 하며 계산에는 사용하지 않는다.
    pub pressure_bar: f64,
    /// 시스템 효율 (0~1]
    pub efficiency: f64,
    /// 전력 단가 [통화/kWh]
    pub electricity_cost_per_kwh: f64,
    /// CO₂ 배출 계수 [kg/kWh]
    pub co2_factor_per_kwh: f64,
    pub compressor_type: CompressorType,
}

/// 콘솔 프롬프트, GUI 폼, 설정 파일이 공유하는 기본 입력값.
pub const DEFAULT_INPUTS: InputParameters = InputParameters {
    power_kw: 15.0,
    hours_per_day: 8.0,
    pressure_bar: 7.0,
    efficiency: 0.85,
    electricity_cost_per_kwh: 0.15,
    co2_factor_per_kwh: 0.92,
    compressor_type: CompressorType::Reciprocating,
};

impl Default for InputParameters {
    fn default() -> Self {
        DEFAULT_INPUTS
    }
}

/// 입력 필드 식별자. 오류 메시지와 프롬프트에서 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Power,
    Hours,
    Pressure,
    Efficiency,
    ElectricityCost,
    Co2Factor,
}

impl InputField {
    pub const ALL: [InputField; 6] = [
        InputField::Power,
        InputField::Hours,
        InputField::Pressure,
        InputField::Efficiency,
        InputField::ElectricityCost,
        InputField::Co2Factor,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            InputField::Power => "power",
            InputField::Hours => "hours per day",
            InputField::Pressure => "pressure",
            InputField::Efficiency => "efficiency",
            InputField::ElectricityCost => "electricity cost",
            InputField::Co2Factor => "CO₂ factor",
        }
    }

    /// 허용 범위 (하한, 상한).
    pub fn range(&self) -> (f64, f64) {
        let b = &INPUT_BOUNDS;
        match self {
            InputField::Power => (b.min_power_kw, f64::INFINITY),
            InputField::Hours => (b.min_hours_per_day, f64::INFINITY),
            InputField::Pressure => (b.min_pressure_bar, f64::INFINITY),
            InputField::Efficiency => (b.min_efficiency, b.max_efficiency),
            InputField::ElectricityCost => (b.min_electricity_cost, f64::INFINITY),
            InputField::Co2Factor => (b.min_co2_factor, f64::INFINITY),
        }
    }

    pub fn get(&self, inputs: &InputParameters) -> f64 {
        match self {
            InputField::Power => inputs.power_kw,
            InputField::Hours => inputs.hours_per_day,
            InputField::Pressure => inputs.pressure_bar,
            InputField::Efficiency => inputs.efficiency,
            InputField::ElectricityCost => inputs.electricity_cost_per_kwh,
            InputField::Co2Factor => inputs.co2_factor_per_kwh,
        }
    }

    pub fn set(&self, inputs: &mut InputParameters, value: f64) {
        match self {
            InputField::Power => inputs.power_kw = value,
            InputField::Hours => inputs.hours_per_day = value,
            InputField::Pressure => inputs.pressure_bar = value,
            InputField::Efficiency => inputs.efficiency = value,
            InputField::ElectricityCost => inputs.electricity_cost_per_kwh = value,
            InputField::Co2Factor => inputs.co2_factor_per_kwh = value,
        }
    }
}

/// 입력 수집 단계에서 적용하는 하한/상한.
#[derive(Debug, Clone, Copy)]
pub struct InputBounds {
    pub min_power_kw: f64,
    pub min_hours_per_day: f64,
    pub min_pressure_bar: f64,
    pub min_efficiency: f64,
    pub max_efficiency: f64,
    pub min_electricity_cost: f64,
    pub min_co2_factor: f64,
}

pub const INPUT_BOUNDS: InputBounds = InputBounds {
    min_power_kw: 1.0,
    min_hours_per_day: 1.0,
    min_pressure_bar: 1.0,
    min_efficiency: 0.1,
    max_efficiency: 1.0,
    min_electricity_cost: 0.01,
    min_co2_factor: 0.01,
};

/// 입력 검증 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// 숫자로 해석할 수 없는 입력
    NotANumber { field: &'static str, text: String },
    /// NaN/무한대
    NotFinite { field: &'static str },
    /// 허용 범위 밖
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::NotANumber { field, text } => {
                write!(f, "{field}: '{text}' is not a number")
            }
            InputError::NotFinite { field } => write!(f, "{field}: value must be finite"),
            InputError::OutOfRange {
                field,
                value,
                min,
                max,
            } => {
                if max.is_finite() {
                    write!(f, "{field}: {value} is outside [{min}, {max}]")
                } else {
                    write!(f, "{field}: {value} must be at least {min}")
                }
            }
        }
    }
}

impl std::error::Error for InputError {}

impl InputParameters {
    /// 모든 수치 필드를 허용 범위와 비교한다. 첫 번째 위반 필드를 오류로 반환한다.
    pub fn validate(&self) -> Result<(), InputError> {
        for field in InputField::ALL {
            check_field(field, field.get(self))?;
        }
        Ok(())
    }
}

/// 단일 필드 값을 검증한다.
pub fn check_field(field: InputField, value: f64) -> Result<f64, InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field: field.name(),
        });
    }
    let (min, max) = field.range();
    if value < min || value > max {
        return Err(InputError::OutOfRange {
            field: field.name(),
            value,
            min,
            max,
        });
    }
    Ok(value)
}

/// 빈 입력이면 기본값을, 아니면 숫자로 해석한 값을 반환한다.
pub fn parse_or_default(field: InputField, text: &str, default: f64) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| InputError::NotANumber {
            field: field.name(),
            text: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(DEFAULT_INPUTS.validate().is_ok());
        assert_eq!(InputParameters::default(), DEFAULT_INPUTS);
    }

    #[test]
    fn efficiency_above_one_rejected() {
        let inputs = InputParameters {
            efficiency: 1.2,
            ..DEFAULT_INPUTS
        };
        match inputs.validate() {
            Err(InputError::OutOfRange { field, .. }) => assert_eq!(field, "efficiency"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn zero_efficiency_rejected_at_boundary() {
        let inputs = InputParameters {
            efficiency: 0.0,
            ..DEFAULT_INPUTS
        };
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn nan_rejected() {
        let inputs = InputParameters {
            power_kw: f64::NAN,
            ..DEFAULT_INPUTS
        };
        assert_eq!(
            inputs.validate(),
            Err(InputError::NotFinite { field: "power" })
        );
    }

    #[test]
    fn empty_text_uses_default() {
        assert_eq!(parse_or_default(InputField::Hours, "   ", 8.0), Ok(8.0));
        assert_eq!(parse_or_default(InputField::Hours, "12.5", 8.0), Ok(12.5));
        assert!(parse_or_default(InputField::Hours, "twelve", 8.0).is_err());
    }

    #[test]
    fn field_accessors_round_trip() {
        let mut inputs = DEFAULT_INPUTS;
        for (i, field) in InputField::ALL.iter().enumerate() {
            field.set(&mut inputs, 2.0 + i as f64);
            assert_eq!(field.get(&inputs), 2.0 + i as f64);
        }
    }
}
