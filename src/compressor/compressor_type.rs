use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// 압축기 형식. 알 수 없는 선택값은 모두 `Unknown`으로 취급한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompressorType {
    /// 왕복동식
    #[default]
    Reciprocating,
    /// 스크류식
    RotaryScrew,
    /// 원심식
    Centrifugal,
    /// 인식하지 못한 형식(폴백)
    Unknown,
}

impl CompressorType {
    /// 입력 화면에서 선택 가능한 형식(폴백 제외).
    pub const NAMED: [CompressorType; 3] = [
        CompressorType::Reciprocating,
        CompressorType::RotaryScrew,
        CompressorType::Centrifugal,
    ];

    /// 메뉴 번호(1~3)를 형식으로 변환한다. 그 밖의 번호는 `Unknown`.
    pub fn from_choice(choice: u32) -> Self {
        match choice {
            1 => CompressorType::Reciprocating,
            2 => CompressorType::RotaryScrew,
            3 => CompressorType::Centrifugal,
            _ => CompressorType::Unknown,
        }
    }

    /// 메뉴 번호. `Unknown`은 번호가 없다.
    pub fn choice(&self) -> Option<u32> {
        match self {
            CompressorType::Reciprocating => Some(1),
            CompressorType::RotaryScrew => Some(2),
            CompressorType::Centrifugal => Some(3),
            CompressorType::Unknown => None,
        }
    }

    /// 화면/보고서 표시용 이름.
    pub fn label(&self) -> &'static str {
        match self {
            CompressorType::Reciprocating => "Reciprocating",
            CompressorType::RotaryScrew => "Rotary Screw",
            CompressorType::Centrifugal => "Centrifugal",
            CompressorType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for CompressorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 번호 또는 이름을 받아들이며, 해석할 수 없는 값은 오류 대신 `Unknown`이 된다.
impl FromStr for CompressorType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(n) = s.parse::<u32>() {
            return Ok(CompressorType::from_choice(n));
        }
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        Ok(match normalized.as_str() {
            "reciprocating" => CompressorType::Reciprocating,
            "rotaryscrew" | "screw" => CompressorType::RotaryScrew,
            "centrifugal" => CompressorType::Centrifugal,
            _ => CompressorType::Unknown,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_named_types() {
        assert_eq!(CompressorType::from_choice(1), CompressorType::Reciprocating);
        assert_eq!(CompressorType::from_choice(2), CompressorType::RotaryScrew);
        assert_eq!(CompressorType::from_choice(3), CompressorType::Centrifugal);
        assert_eq!(CompressorType::from_choice(0), CompressorType::Unknown);
        assert_eq!(CompressorType::from_choice(7), CompressorType::Unknown);
    }

    #[test]
    fn parses_names_loosely() {
        let parse = |s: &str| s.parse::<CompressorType>().unwrap();
        assert_eq!(parse("Rotary Screw"), CompressorType::RotaryScrew);
        assert_eq!(parse("rotary-screw"), CompressorType::RotaryScrew);
        assert_eq!(parse(" CENTRIFUGAL "), CompressorType::Centrifugal);
        assert_eq!(parse("2"), CompressorType::RotaryScrew);
        assert_eq!(parse("scroll"), CompressorType::Unknown);
        assert_eq!(parse(""), CompressorType::Unknown);
    }

    #[test]
    fn choice_is_inverse_of_from_choice() {
        for t in CompressorType::NAMED {
            let n = t.choice().unwrap();
            assert_eq!(CompressorType::from_choice(n), t);
        }
        assert_eq!(CompressorType::Unknown.choice(), None);
    }
}
