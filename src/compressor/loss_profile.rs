use super::CompressorType;

/// 형식별 손실 계수. 일일 에너지에 곱해 항목별 손실을 추정한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossProfile {
    /// 누설
    pub leak: f64,
    /// 무부하 운전
    pub idle: f64,
    /// 압력 강하
    pub pressure_drop: f64,
    /// 과용량
    pub overcapacity: f64,
    /// 열 손실
    pub heat: f64,
}

impl LossProfile {
    /// 계수를 고정 순서(누설, 무부하, 압력강하, 과용량, 열)로 반환한다.
    pub fn coefficients(&self) -> [f64; 5] {
        [
            self.leak,
            self.idle,
            self.pressure_drop,
            self.overcapacity,
            self.heat,
        ]
    }

    /// 계수 합계.
    pub fn total(&self) -> f64 {
        self.coefficients().iter().sum()
    }
}

pub const RECIPROCATING_PROFILE: LossProfile = LossProfile {
    leak: 0.15,
    idle: 0.10,
    pressure_drop: 0.05,
    overcapacity: 0.05,
    heat: 0.05,
};

pub const ROTARY_SCREW_PROFILE: LossProfile = LossProfile {
    leak: 0.10,
    idle: 0.05,
    pressure_drop: 0.03,
    overcapacity: 0.02,
    heat: 0.02,
};

pub const CENTRIFUGAL_PROFILE: LossProfile = LossProfile {
    leak: 0.08,
    idle: 0.03,
    pressure_drop: 0.02,
    overcapacity: 0.01,
    heat: 0.01,
};

/// 형식을 알 수 없을 때 쓰는 별도 계수. 스크류식과 값은 같지만 독립된 상수로 유지한다.
pub const UNKNOWN_PROFILE: LossProfile = LossProfile {
    leak: 0.10,
    idle: 0.05,
    pressure_drop: 0.03,
    overcapacity: 0.02,
    heat: 0.02,
};

/// 형식에 해당하는 표시 이름과 손실 계수를 조회한다.
pub fn select_loss_profile(compressor_type: CompressorType) -> (&'static str, LossProfile) {
    let profile = match compressor_type {
        CompressorType::Reciprocating => RECIPROCATING_PROFILE,
        CompressorType::RotaryScrew => ROTARY_SCREW_PROFILE,
        CompressorType::Centrifugal => CENTRIFUGAL_PROFILE,
        CompressorType::Unknown => UNKNOWN_PROFILE,
    };
    (compressor_type.label(), profile)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_profiles_sum_below_one() {
        for t in CompressorType::NAMED {
            let (_, p) = select_loss_profile(t);
            assert!(p.total() < 1.0, "{t}: {}", p.total());
        }
    }

    #[test]
    fn reciprocating_coefficients() {
        let (label, p) = select_loss_profile(CompressorType::Reciprocating);
        assert_eq!(label, "Reciprocating");
        assert_eq!(p.coefficients(), [0.15, 0.10, 0.05, 0.05, 0.05]);
    }

    #[test]
    fn unknown_has_its_own_label() {
        let (label, p) = select_loss_profile(CompressorType::Unknown);
        assert_eq!(label, "Unknown");
        assert_eq!(p, UNKNOWN_PROFILE);
        for t in CompressorType::NAMED {
            assert_ne!(select_loss_profile(t).0, label);
        }
    }
}
