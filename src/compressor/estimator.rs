use log::debug;

use super::{
    compute_energy, compute_loss_breakdown, recommend_action, select_loss_profile,
    CompressorType, LossBreakdown, LossCategory,
};
use crate::inputs::InputParameters;

/// 한 번의 추정 결과. 매 요청마다 새로 계산하며 저장하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub compressor_type: CompressorType,
    /// 일일 소비 에너지 [kWh]
    pub daily_energy_kwh: f64,
    /// 월간 소비 에너지 [kWh]
    pub monthly_energy_kwh: f64,
    /// 월간 비용 [통화]
    pub monthly_cost: f64,
    /// 연간 CO₂ 배출량 [kg]
    pub annual_co2_kg: f64,
    pub breakdown: LossBreakdown,
    /// 손실이 가장 큰 항목
    pub recommendation: LossCategory,
}

impl EnergyReport {
    pub fn compressor_label(&self) -> &'static str {
        select_loss_profile(self.compressor_type).0
    }

    pub fn recommended_tip(&self) -> &'static str {
        self.recommendation.tip()
    }
}

/// 입력값으로 에너지, 손실 분해, 권장 조치를 계산한다.
///
/// 검증하지 않으며 운전 압력은 어떤 식에도 쓰이지 않는다.
pub fn estimate(inputs: &InputParameters) -> EnergyReport {
    let (label, profile) = select_loss_profile(inputs.compressor_type);
    debug!("loss profile {label}: {:?}", profile.coefficients());

    let energy = compute_energy(
        inputs.power_kw,
        inputs.hours_per_day,
        inputs.efficiency,
        inputs.electricity_cost_per_kwh,
        inputs.co2_factor_per_kwh,
    );
    let breakdown = compute_loss_breakdown(energy.daily_kwh, &profile);
    let index = recommend_action(&breakdown.losses());
    // recommend_action은 항상 0..5 범위를 반환한다
    let recommendation = LossCategory::from_index(index).unwrap_or(LossCategory::AirLeaks);

    EnergyReport {
        compressor_type: inputs.compressor_type,
        daily_energy_kwh: energy.daily_kwh,
        monthly_energy_kwh: energy.monthly_kwh,
        monthly_cost: energy.monthly_cost,
        annual_co2_kg: energy.annual_co2_kg,
        breakdown,
        recommendation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::DEFAULT_INPUTS;

    #[test]
    fn pressure_does_not_change_result() {
        let low = InputParameters {
            pressure_bar: 1.0,
            ..DEFAULT_INPUTS
        };
        let high = InputParameters {
            pressure_bar: 12.0,
            ..DEFAULT_INPUTS
        };
        assert_eq!(estimate(&low), estimate(&high));
    }

    #[test]
    fn centrifugal_recommends_leak_fix() {
        let inputs = InputParameters {
            compressor_type: CompressorType::Centrifugal,
            ..DEFAULT_INPUTS
        };
        let r = estimate(&inputs);
        assert_eq!(r.compressor_label(), "Centrifugal");
        assert_eq!(r.recommendation, LossCategory::AirLeaks);
        assert_eq!(r.recommended_tip(), LossCategory::AirLeaks.tip());
    }
}
