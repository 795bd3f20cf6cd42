//! 에너지 사용 분해 막대그래프 데이터.

use crate::compressor::LossBreakdown;

/// 막대 순서와 같은 고정 라벨.
pub const BREAKDOWN_LABELS: [&str; 6] = [
    "Air Leaks",
    "Idle Running",
    "Pressure Drop",
    "Overcapacity",
    "Heat Loss",
    "Useful Output",
];

/// 막대 하나.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub label: &'static str,
    pub value: f64,
}

/// 손실 5개와 유효 에너지를 고정 순서의 막대 6개로 만든다.
pub fn breakdown_bars(breakdown: &LossBreakdown) -> [Bar; 6] {
    let values = [
        breakdown.leak,
        breakdown.idle,
        breakdown.pressure_drop,
        breakdown.overcapacity,
        breakdown.heat,
        breakdown.useful,
    ];
    std::array::from_fn(|i| Bar {
        label: BREAKDOWN_LABELS[i],
        value: values[i],
    })
}

/// 축 스케일용 최대값. 양수 값이 없으면 0.
pub fn scale_max(bars: &[Bar]) -> f64 {
    bars.iter()
        .map(|b| b.value)
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold(0.0, f64::max)
}

/// 콘솔 출력용 가로 막대그래프. `width`는 가장 긴 막대의 문자 수.
pub fn render_text(bars: &[Bar], width: usize) -> String {
    let max = scale_max(bars);
    let label_width = bars.iter().map(|b| b.label.len()).max().unwrap_or(0);
    let mut out = String::new();
    for bar in bars {
        let len = if max > 0.0 && bar.value.is_finite() && bar.value > 0.0 {
            ((bar.value / max) * width as f64).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "{:<label_width$} | {:<width$} {:.1}\n",
            bar.label,
            "#".repeat(len),
            bar.value
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LossBreakdown {
        LossBreakdown {
            leak: 20.0,
            idle: 10.0,
            pressure_drop: 5.0,
            overcapacity: 5.0,
            heat: 0.0,
            useful: 40.0,
        }
    }

    #[test]
    fn bars_follow_fixed_order() {
        let bars = breakdown_bars(&sample());
        let labels: Vec<_> = bars.iter().map(|b| b.label).collect();
        assert_eq!(labels, BREAKDOWN_LABELS);
        assert_eq!(bars[5].value, 40.0);
        assert_eq!(scale_max(&bars), 40.0);
    }

    #[test]
    fn text_chart_scales_to_width() {
        let bars = breakdown_bars(&sample());
        let text = render_text(&bars, 20);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5].matches('#').count(), 20);
        assert_eq!(lines[0].matches('#').count(), 10);
        assert_eq!(lines[4].matches('#').count(), 0);
        assert!(lines[0].ends_with("20.0"));
    }

    #[test]
    fn negative_values_draw_empty_bar() {
        let mut b = sample();
        b.useful = -3.0;
        let bars = breakdown_bars(&b);
        let text = render_text(&bars, 10);
        let last = text.lines().last().unwrap();
        assert_eq!(last.matches('#').count(), 0);
        assert!(last.ends_with("-3.0"));
    }
}
