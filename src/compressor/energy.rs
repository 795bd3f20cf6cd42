/// 월 환산 일수.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// 연 환산 개월 수.
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// 에너지/비용/배출량 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyUse {
    /// 일일 소비 에너지 [kWh]
    pub daily_kwh: f64,
    /// 월간 소비 에너지 [kWh]
    pub monthly_kwh: f64,
    /// 월간 전력 비용 [통화/월]
    pub monthly_cost: f64,
    /// 연간 CO₂ 배출량 [kg]
    pub annual_co2_kg: f64,
}

/// 정격 출력과 운전 시간, 효율로 에너지 소비/비용/CO₂를 계산한다.
///
/// 입력 검증은 호출자 책임이다. 효율 0이면 무한대/NaN이 그대로 전파된다.
pub fn compute_energy(
    power_kw: f64,
    hours_per_day: f64,
    efficiency: f64,
    electricity_cost_per_kwh: f64,
    co2_factor_per_kwh: f64,
) -> EnergyUse {
    let daily_kwh = power_kw * hours_per_day / efficiency;
    let monthly_kwh = daily_kwh * DAYS_PER_MONTH;
    EnergyUse {
        daily_kwh,
        monthly_kwh,
        monthly_cost: monthly_kwh * electricity_cost_per_kwh,
        annual_co2_kg: monthly_kwh * MONTHS_PER_YEAR * co2_factor_per_kwh,
    }
}
