use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::chart;
use crate::compressor::{select_loss_profile, CompressorType, EnergyReport, LossCategory};
use crate::config::Config;
use crate::i18n::{self, keys, Translator};
use crate::inputs::{check_field, parse_or_default, InputError, InputField, InputParameters};
use crate::report::CURRENCY_SYMBOL;

/// 콘솔 막대그래프 최대 길이(문자 수).
const CHART_WIDTH: usize = 40;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Estimate,
    Profiles,
    Settings,
    Exit,
}

/// 결과 화면 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsChoice {
    Export,
    Back,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_ESTIMATE));
    println!("{}", tr.t(keys::MAIN_MENU_PROFILES));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Estimate),
            "2" => return Ok(MenuChoice::Profiles),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 결과 화면 메뉴를 표시하고 선택값을 반환한다.
pub fn results_menu(tr: &Translator) -> Result<ResultsChoice, AppError> {
    println!();
    println!("{}", tr.t(keys::RESULTS_MENU_EXPORT));
    println!("{}", tr.t(keys::RESULTS_MENU_BACK));
    loop {
        let sel = read_line(&tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(ResultsChoice::Export),
            "0" => return Ok(ResultsChoice::Back),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 표준 입출력으로 입력값을 수집한다.
pub fn collect_inputs(
    tr: &Translator,
    defaults: &InputParameters,
) -> Result<InputParameters, AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();
    collect_inputs_from(tr, defaults, &mut input, &mut out)
}

/// 각 항목을 기본값과 함께 묻는다. 빈 입력은 기본값, 숫자가 아니거나 범위 밖이면 다시 묻는다.
pub fn collect_inputs_from<R: BufRead, W: Write>(
    tr: &Translator,
    defaults: &InputParameters,
    input: &mut R,
    out: &mut W,
) -> Result<InputParameters, AppError> {
    writeln!(out, "{}", tr.t(keys::INPUT_HEADING))?;
    let hint = tr.t(keys::DEFAULT_HINT);
    let mut params = *defaults;
    for field in InputField::ALL {
        let default = field.get(defaults);
        let prompt = format!("{} [{hint}: {default}]: ", tr.t(i18n::input_label_key(field)));
        let value = loop {
            let text = read_line_from(input, out, &prompt)?;
            match parse_or_default(field, &text, default).and_then(|v| check_field(field, v)) {
                Ok(v) => break v,
                Err(InputError::NotANumber { .. }) => {
                    writeln!(out, "{}", tr.t(keys::ERROR_INVALID_NUMBER))?
                }
                Err(e) => writeln!(out, "{}: {e}", tr.t(keys::ERROR_PREFIX))?,
            }
        };
        field.set(&mut params, value);
    }

    writeln!(out, "{}", tr.t(keys::INPUT_TYPE_HEADING))?;
    let default_choice = defaults.compressor_type.choice().unwrap_or(1);
    let prompt = format!(
        "{} [{hint}: {default_choice}]: ",
        tr.t(keys::INPUT_TYPE_PROMPT)
    );
    let text = read_line_from(input, out, &prompt)?;
    params.compressor_type = if text.trim().is_empty() {
        defaults.compressor_type
    } else {
        // 번호/이름 외의 값은 Unknown 형식으로 처리된다
        text.parse::<CompressorType>()
            .unwrap_or(CompressorType::Unknown)
    };
    Ok(params)
}

/// 추정 결과를 출력한다.
pub fn print_results(tr: &Translator, inputs: &InputParameters, report: &EnergyReport) {
    let b = &report.breakdown;
    println!("{}", tr.t(keys::RESULTS_HEADING));
    println!(
        "{}: {}",
        tr.t(keys::RESULTS_COMPRESSOR),
        report.compressor_label()
    );
    println!(
        "{}: {} bar ({})",
        tr.t(keys::INPUT_PRESSURE),
        inputs.pressure_bar,
        tr.t(keys::RESULTS_PRESSURE_NOTE)
    );
    println!("\n[{}]", tr.t(keys::RESULTS_SUMMARY));
    println!(
        "{}: {:.2} kWh",
        tr.t(keys::RESULTS_DAILY),
        report.daily_energy_kwh
    );
    println!(
        "{}: {:.2} kWh",
        tr.t(keys::RESULTS_MONTHLY),
        report.monthly_energy_kwh
    );
    println!(
        "{}: {CURRENCY_SYMBOL}{:.2}",
        tr.t(keys::RESULTS_COST),
        report.monthly_cost
    );
    println!("{}: {:.2} kg", tr.t(keys::RESULTS_CO2), report.annual_co2_kg);

    println!("\n[{}]", tr.t(keys::RESULTS_BREAKDOWN));
    for category in LossCategory::ALL {
        println!(
            "{}: {:.2} kWh",
            tr.t(i18n::loss_label_key(category)),
            b.loss(category)
        );
    }
    println!("{}: {:.2} kWh", tr.t(keys::LOSS_USEFUL), b.useful);

    println!("\n[{}]", tr.t(keys::RESULTS_CHART));
    print!("{}", chart::render_text(&chart::breakdown_bars(b), CHART_WIDTH));

    println!(
        "\n{}: {}",
        tr.t(keys::RESULTS_SUGGESTED),
        tr.t(i18n::tip_key(report.recommendation))
    );
}

/// 형식별 손실 계수표를 출력한다.
pub fn print_profiles(tr: &Translator) {
    println!("{}", tr.t(keys::PROFILES_HEADING));
    let header: Vec<String> = LossCategory::ALL
        .iter()
        .map(|c| format!("{:>14}", tr.t(i18n::loss_label_key(*c))))
        .collect();
    println!("{:<14}{}", "", header.join(""));
    for t in CompressorType::NAMED.into_iter().chain([CompressorType::Unknown]) {
        let (label, profile) = select_loss_profile(t);
        let cells: Vec<String> = profile
            .coefficients()
            .iter()
            .map(|c| format!("{c:>14.2}"))
            .collect();
        println!("{label:<14}{}", cells.join(""));
    }
}

/// 설정 메뉴를 처리한다. 변경 여부를 반환한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {}", tr.t(keys::SETTINGS_CURRENT_LANGUAGE), cfg.language);
    println!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_EXPORT_DIR),
        cfg.export_dir_or_default().display()
    );
    let mut changed = false;
    let lang = read_line(&tr.t(keys::SETTINGS_PROMPT_LANGUAGE))?;
    if !lang.trim().is_empty() {
        cfg.language = lang.trim().to_string();
        changed = true;
    }
    let dir = read_line(&tr.t(keys::SETTINGS_PROMPT_EXPORT_DIR))?;
    match dir.trim() {
        "" => {}
        "-" => {
            cfg.export_dir = None;
            changed = true;
        }
        path => {
            cfg.export_dir = Some(PathBuf::from(path));
            changed = true;
        }
    }
    Ok(changed)
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    read_line_from(&mut input, &mut io::stdout(), prompt)
}

fn read_line_from<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<String, AppError> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Err(AppError::Io(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed",
        )));
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::DEFAULT_INPUTS;

    fn collect(script: &str) -> (Result<InputParameters, AppError>, String) {
        let tr = Translator::new("en-us");
        let mut input = io::Cursor::new(script.as_bytes().to_vec());
        let mut out = Vec::new();
        let res = collect_inputs_from(&tr, &DEFAULT_INPUTS, &mut input, &mut out);
        (res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn blank_answers_take_defaults() {
        let (res, out) = collect("\n\n\n\n\n\n\n");
        assert_eq!(res.unwrap(), DEFAULT_INPUTS);
        assert!(out.contains("[default: 15]"));
    }

    #[test]
    fn bad_number_is_asked_again() {
        let (res, out) = collect("abc\n20\n\n\n\n\n\n2\n");
        let params = res.unwrap();
        assert_eq!(params.power_kw, 20.0);
        assert_eq!(params.compressor_type, CompressorType::RotaryScrew);
        assert!(out.contains("Please enter a number."));
    }

    #[test]
    fn out_of_range_efficiency_is_asked_again() {
        let (res, _) = collect("\n\n\n1.5\n0.9\n\n\n3\n");
        let params = res.unwrap();
        assert_eq!(params.efficiency, 0.9);
        assert_eq!(params.compressor_type, CompressorType::Centrifugal);
    }

    #[test]
    fn unlisted_type_number_is_unknown() {
        let (res, _) = collect("\n\n\n\n\n\n9\n");
        assert_eq!(res.unwrap().compressor_type, CompressorType::Unknown);
    }

    #[test]
    fn closed_input_is_an_error() {
        let (res, _) = collect("\n\n");
        assert!(matches!(res, Err(AppError::Io(_))));
    }
}
