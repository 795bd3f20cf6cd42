//! 입력 화면과 결과 화면을 오가는 화면 상태.

use log::info;

use crate::compressor::{estimate, EnergyReport};
use crate::inputs::{InputError, InputParameters};

/// 프레젠테이션 계층이 소유하는 2단계 화면 상태.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    /// 입력 대기
    #[default]
    Input,
    /// 계산 완료. 결과를 만든 입력과 함께 보관한다.
    Results {
        inputs: InputParameters,
        report: EnergyReport,
    },
}

impl ViewState {
    /// 입력을 검증하고 계산해 결과 화면으로 전환한다. 실패하면 상태를 바꾸지 않는다.
    pub fn submit(&mut self, inputs: InputParameters) -> Result<EnergyReport, InputError> {
        inputs.validate()?;
        let report = estimate(&inputs);
        info!(
            "estimated {}: {:.2} kWh/day, main loss {}",
            report.compressor_label(),
            report.daily_energy_kwh,
            report.recommendation.label()
        );
        *self = ViewState::Results { inputs, report };
        Ok(report)
    }

    /// 입력 화면으로 돌아간다.
    pub fn back(&mut self) {
        *self = ViewState::Input;
    }

    pub fn is_results(&self) -> bool {
        matches!(self, ViewState::Results { .. })
    }

    pub fn report(&self) -> Option<&EnergyReport> {
        match self {
            ViewState::Results { report, .. } => Some(report),
            ViewState::Input => None,
        }
    }

    pub fn inputs(&self) -> Option<&InputParameters> {
        match self {
            ViewState::Results { inputs, .. } => Some(inputs),
            ViewState::Input => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::DEFAULT_INPUTS;

    #[test]
    fn submit_switches_to_results() {
        let mut state = ViewState::default();
        assert!(!state.is_results());
        let daily = state.submit(DEFAULT_INPUTS).unwrap().daily_energy_kwh;
        assert!(daily > 0.0);
        assert!(state.is_results());
        assert_eq!(state.inputs(), Some(&DEFAULT_INPUTS));
    }

    #[test]
    fn invalid_submit_keeps_input() {
        let mut state = ViewState::Input;
        let bad = InputParameters {
            hours_per_day: 0.0,
            ..DEFAULT_INPUTS
        };
        assert!(state.submit(bad).is_err());
        assert_eq!(state, ViewState::Input);
        assert!(state.report().is_none());
    }

    #[test]
    fn back_returns_to_input() {
        let mut state = ViewState::Input;
        state.submit(DEFAULT_INPUTS).unwrap();
        state.back();
        assert_eq!(state, ViewState::Input);
    }
}
