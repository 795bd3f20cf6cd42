use chrono::Local;
use log::{info, warn};
use std::path::Path;

use crate::config::Config;
use crate::i18n::{self, keys, Translator};
use crate::inputs::{InputError, InputParameters};
use crate::report::{self, ReportError};
use crate::ui_cli::{self, MenuChoice, ResultsChoice};
use crate::view::ViewState;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 콘솔 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 입력값 검증 오류
    Input(InputError),
    /// 보고서 저장 오류
    Report(ReportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Input(e) => write!(f, "invalid input: {e}"),
            AppError::Report(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        AppError::Input(value)
    }
}

impl From<ReportError> for AppError {
    fn from(value: ReportError) -> Self {
        AppError::Report(value)
    }
}

/// 설정된 언어로 번역기를 만든다.
pub fn translator_for(config: &Config, cli_lang: Option<&str>) -> Translator {
    let lang = i18n::resolve_language(cli_lang.unwrap_or("auto"), Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.language_pack_dir.as_deref())
}

/// CLI 대화형 루프를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: &mut Translator) -> Result<(), AppError> {
    let mut view = ViewState::default();
    loop {
        match view.report().copied() {
            None => match ui_cli::main_menu(tr)? {
                MenuChoice::Estimate => {
                    let inputs = ui_cli::collect_inputs(tr, &config.defaults)?;
                    match view.submit(inputs) {
                        Ok(report) => ui_cli::print_results(tr, &inputs, &report),
                        Err(e) => println!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                    }
                }
                MenuChoice::Profiles => ui_cli::print_profiles(tr),
                MenuChoice::Settings => {
                    if ui_cli::handle_settings(tr, config)? {
                        crate::config::save_to(config, config_path)?;
                        *tr = translator_for(config, None);
                        println!("{}", tr.t(keys::SETTINGS_SAVED));
                    }
                }
                MenuChoice::Exit => {
                    println!("{}", tr.t(keys::APP_EXIT));
                    break;
                }
            },
            Some(report) => match ui_cli::results_menu(tr)? {
                ResultsChoice::Export => {
                    // 저장 실패는 알리고 결과 화면에 머문다
                    if let Err(e) = export_report(config, &report, tr) {
                        warn!("export failed: {e}");
                    }
                }
                ResultsChoice::Back => view.back(),
            },
        }
    }
    Ok(())
}

/// 한 번 계산하고 결과를 출력한다. `export_dir`가 있으면 보고서를 저장한다.
pub fn run_once(
    tr: &Translator,
    inputs: InputParameters,
    export_dir: Option<&Path>,
) -> Result<(), AppError> {
    let mut view = ViewState::default();
    let report = view.submit(inputs)?;
    ui_cli::print_results(tr, &inputs, &report);
    if let Some(dir) = export_dir {
        let path = report::export(&report, dir, Local::now().naive_local())?;
        println!("{} {}", tr.t(keys::EXPORT_SAVED), path.display());
    }
    Ok(())
}

fn export_report(
    config: &Config,
    report: &crate::compressor::EnergyReport,
    tr: &Translator,
) -> Result<(), ReportError> {
    let dir = config.export_dir_or_default();
    match report::export(report, &dir, Local::now().naive_local()) {
        Ok(path) => {
            println!("{} {}", tr.t(keys::EXPORT_SAVED), path.display());
            info!("exported report for {}", report.compressor_label());
            Ok(())
        }
        Err(e) => {
            println!("{} {e}", tr.t(keys::EXPORT_FAILED));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::DEFAULT_INPUTS;

    #[test]
    fn run_once_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let tr = Translator::new("en-us");
        run_once(&tr, DEFAULT_INPUTS, Some(dir.path())).unwrap();
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn run_once_rejects_invalid_input() {
        let tr = Translator::new("en-us");
        let bad = InputParameters {
            power_kw: 0.5,
            ..DEFAULT_INPUTS
        };
        assert!(matches!(run_once(&tr, bad, None), Err(AppError::Input(_))));
    }

    #[test]
    fn run_once_surfaces_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let tr = Translator::new("en-us");
        let res = run_once(&tr, DEFAULT_INPUTS, Some(&missing));
        assert!(matches!(res, Err(AppError::Report(ReportError::Io { .. }))));
    }
}
