use super::LossProfile;

/// 손실 항목. 순서는 계수/손실 배열의 인덱스와 같다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LossCategory {
    AirLeaks,
    IdleRunning,
    PressureDrop,
    Overcapacity,
    HeatLoss,
}

impl LossCategory {
    pub const ALL: [LossCategory; 5] = [
        LossCategory::AirLeaks,
        LossCategory::IdleRunning,
        LossCategory::PressureDrop,
        LossCategory::Overcapacity,
        LossCategory::HeatLoss,
    ];

    /// 인덱스(0~4)에 해당하는 항목.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(&self) -> usize {
        match self {
            LossCategory::AirLeaks => 0,
            LossCategory::IdleRunning => 1,
            LossCategory::PressureDrop => 2,
            LossCategory::Overcapacity => 3,
            LossCategory::HeatLoss => 4,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LossCategory::AirLeaks => "Air Leaks",
            LossCategory::IdleRunning => "Idle Running",
            LossCategory::PressureDrop => "Pressure Drop",
            LossCategory::Overcapacity => "Overcapacity",
            LossCategory::HeatLoss => "Heat Loss",
        }
    }

    /// 해당 손실을 줄이기 위한 권장 조치.
    pub fn tip(&self) -> &'static str {
        match self {
            LossCategory::AirLeaks => "Fix leaks using ultrasonic detectors",
            LossCategory::IdleRunning => "Install automatic shutoff to reduce idle time",
            LossCategory::PressureDrop => {
                "Check filters and piping layout to reduce pressure drop"
            }
            LossCategory::Overcapacity => "Match compressor size to your actual demand",
            LossCategory::HeatLoss => "Capture and reuse heat for other processes",
        }
    }
}

/// 일일 에너지의 항목별 손실과 유효 에너지 [kWh].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossBreakdown {
    pub leak: f64,
    pub idle: f64,
    pub pressure_drop: f64,
    pub overcapacity: f64,
    pub heat: f64,
    /// 일일 에너지 - 손실 합계. 음수 하한 처리 없음.
    pub useful: f64,
}

impl LossBreakdown {
    /// 손실 5개를 고정 순서로 반환한다.
    pub fn losses(&self) -> [f64; 5] {
        [
            self.leak,
            self.idle,
            self.pressure_drop,
            self.overcapacity,
            self.heat,
        ]
    }

    pub fn total_losses(&self) -> f64 {
        self.losses().iter().sum()
    }

    pub fn loss(&self, category: LossCategory) -> f64 {
        self.losses()[category.index()]
    }
}

/// 일일 에너지에 손실 계수를 곱해 항목별 손실과 유효 에너지를 구한다.
pub fn compute_loss_breakdown(daily_energy_kwh: f64, profile: &LossProfile) -> LossBreakdown {
    let leak = daily_energy_kwh * profile.leak;
    let idle = daily_energy_kwh * profile.idle;
    let pressure_drop = daily_energy_kwh * profile.pressure_drop;
    let overcapacity = daily_energy_kwh * profile.overcapacity;
    let heat = daily_energy_kwh * profile.heat;
    let useful = daily_energy_kwh - (leak + idle + pressure_drop + overcapacity + heat);
    LossBreakdown {
        leak,
        idle,
        pressure_drop,
        overcapacity,
        heat,
        useful,
    }
}

/// 가장 큰 손실의 인덱스를 반환한다. 동률이면 앞 항목이 우선한다.
pub fn recommend_action(losses: &[f64; 5]) -> usize {
    let mut best = 0;
    for (i, &value) in losses.iter().enumerate().skip(1) {
        if value > losses[best] {
            best = i;
        }
    }
    best
}
