use air_energy_estimator::compressor::CompressorType;
use air_energy_estimator::inputs::InputParameters;
use air_energy_estimator::{app, config, ui_cli};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

/// 압축공기 설비의 에너지/비용/CO₂ 추정기 (콘솔).
#[derive(Debug, Parser)]
#[command(name = "air_energy_estimator_cli", version, about)]
struct Cli {
    /// UI 언어 (auto/en-us/ko-kr)
    #[arg(short = 'L', long, global = true)]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// 한 번 계산하고 종료한다. 생략한 값은 설정의 기본값을 쓴다.
    Estimate(EstimateArgs),
    /// 형식별 손실 계수표를 출력한다.
    Profiles,
}

#[derive(Debug, Args)]
struct EstimateArgs {
    /// 압축기 정격 출력 [kW]
    #[arg(long)]
    power: Option<f64>,
    /// 일일 운전 시간 [h]
    #[arg(long)]
    hours: Option<f64>,
    /// 운전 압력 [bar] (계산에는 쓰이지 않음)
    #[arg(long)]
    pressure: Option<f64>,
    /// 시스템 효율 (0.1~1.0)
    #[arg(long)]
    efficiency: Option<f64>,
    /// 전력 단가 [£/kWh]
    #[arg(long)]
    cost: Option<f64>,
    /// CO₂ 배출 계수 [kg/kWh]
    #[arg(long = "co2-factor")]
    co2_factor: Option<f64>,
    /// 압축기 형식 (1/2/3 또는 reciprocating/rotary-screw/centrifugal)
    #[arg(long = "type", value_parser = parse_compressor_type)]
    compressor_type: Option<CompressorType>,
    /// 보고서를 TXT로 저장한다
    #[arg(long)]
    export: bool,
    /// 보고서 저장 폴더 (기본: 설정값 또는 다운로드 폴더)
    #[arg(long = "out-dir")]
    out_dir: Option<PathBuf>,
}

impl EstimateArgs {
    fn apply(&self, defaults: &InputParameters) -> InputParameters {
        InputParameters {
            power_kw: self.power.unwrap_or(defaults.power_kw),
            hours_per_day: self.hours.unwrap_or(defaults.hours_per_day),
            pressure_bar: self.pressure.unwrap_or(defaults.pressure_bar),
            efficiency: self.efficiency.unwrap_or(defaults.efficiency),
            electricity_cost_per_kwh: self.cost.unwrap_or(defaults.electricity_cost_per_kwh),
            co2_factor_per_kwh: self.co2_factor.unwrap_or(defaults.co2_factor_per_kwh),
            compressor_type: self.compressor_type.unwrap_or(defaults.compressor_type),
        }
    }
}

fn parse_compressor_type(s: &str) -> Result<CompressorType, String> {
    // 알 수 없는 값도 Unknown 형식으로 받아들인다
    Ok(s.parse::<CompressorType>().unwrap_or(CompressorType::Unknown))
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<(), app::AppError> {
    let mut cfg = config::load_from(&cli.config)?;
    let mut tr = app::translator_for(&cfg, cli.lang.as_deref());
    match cli.command {
        Some(Command::Estimate(args)) => {
            let inputs = args.apply(&cfg.defaults);
            let export_dir = if args.export || args.out_dir.is_some() {
                Some(args.out_dir.clone().unwrap_or_else(|| cfg.export_dir_or_default()))
            } else {
                None
            };
            app::run_once(&tr, inputs, export_dir.as_deref())
        }
        Some(Command::Profiles) => {
            ui_cli::print_profiles(&tr);
            Ok(())
        }
        None => app::run(&mut cfg, &cli.config, &mut tr),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_energy_estimator::inputs::DEFAULT_INPUTS;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn missing_flags_fall_back_to_defaults() {
        let cli = Cli::parse_from(["cli", "estimate", "--power", "30", "--type", "rotary-screw"]);
        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate");
        };
        let inputs = args.apply(&DEFAULT_INPUTS);
        assert_eq!(inputs.power_kw, 30.0);
        assert_eq!(inputs.hours_per_day, DEFAULT_INPUTS.hours_per_day);
        assert_eq!(inputs.compressor_type, CompressorType::RotaryScrew);
    }

    #[test]
    fn unrecognised_type_becomes_unknown() {
        let cli = Cli::parse_from(["cli", "estimate", "--type", "scroll"]);
        let Some(Command::Estimate(args)) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.compressor_type, Some(CompressorType::Unknown));
    }
}
