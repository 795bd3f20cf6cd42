#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use air_energy_estimator::{
    app, chart,
    compressor::{CompressorType, EnergyReport, LossCategory},
    config,
    i18n::{self, keys, Translator},
    inputs::{InputField, InputParameters},
    report::{self, CURRENCY_SYMBOL},
    view::ViewState,
};
use chrono::Local;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use log::{info, warn};
use rfd::FileDialog;
use std::{env, fs, path::Path, path::PathBuf};

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xf9, 0xff);
const BAR_EDGE: egui::Color32 = egui::Color32::from_rgb(0x39, 0xff, 0x14);
const CHART_BG: egui::Color32 = egui::Color32::from_rgb(0x0b, 0x0c, 0x10);
const AXIS_TEXT: egui::Color32 = egui::Color32::from_rgb(0xc5, 0xc6, 0xc7);

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en-us/ko-kr)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_title("Compressed Air Energy Estimator")
        .with_inner_size([960.0, 760.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("config load failed, using defaults: {e}");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = cli_lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    eframe::run_native(
        "Compressed Air Energy Estimator",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 라틴 폰트 뒤에 한글 글리프용으로 추가
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글을 표시하기 위해 프로젝트 폰트나 시스템 폰트를 찾아 등록한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(PathBuf::from),
    );
    for path in candidates {
        if path.exists() {
            let bytes = fs::read(&path)
                .map_err(|e| format!("Failed to read font file ({}): {e}", path.display()))?;
            apply_font_bytes(ctx, bytes, "hangul_font");
            info!("loaded font {}", path.display());
            return Ok(());
        }
    }
    Err("Korean font not found; Hangul text may not render.".into())
}

/// 막대그래프 라벨(번역). 손실 5개 + 유효 출력 순서.
fn chart_labels(tr: &Translator) -> [String; 6] {
    let mut labels: [String; 6] = Default::default();
    for c in LossCategory::ALL {
        labels[c.index()] = tr.t(i18n::loss_label_key(c));
    }
    labels[5] = tr.t(keys::LOSS_USEFUL);
    labels
}

/// 에너지 분해 막대그래프를 그린다.
fn breakdown_chart(ui: &mut egui::Ui, bars: &[chart::Bar], labels: &[String]) {
    let desired = egui::vec2(ui.available_width().max(360.0), 280.0);
    let (rect, _) = ui.allocate_exact_size(desired, egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 4.0, CHART_BG);

    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(12.0, 22.0),
        rect.max - egui::vec2(12.0, 40.0),
    );
    painter.line_segment(
        [plot.left_bottom(), plot.right_bottom()],
        egui::Stroke::new(1.0, ACCENT),
    );
    painter.line_segment(
        [plot.left_top(), plot.left_bottom()],
        egui::Stroke::new(1.0, ACCENT),
    );

    let max = chart::scale_max(bars);
    let slot = plot.width() / bars.len().max(1) as f32;
    for (i, bar) in bars.iter().enumerate() {
        let frac = if max > 0.0 && bar.value.is_finite() && bar.value > 0.0 {
            (bar.value / max) as f32
        } else {
            0.0
        };
        let x0 = plot.left() + slot * i as f32 + slot * 0.15;
        let x1 = x0 + slot * 0.7;
        let top = plot.bottom() - plot.height() * frac;
        let bar_rect = egui::Rect::from_min_max(egui::pos2(x0, top), egui::pos2(x1, plot.bottom()));
        painter.rect(bar_rect, 0.0, ACCENT, egui::Stroke::new(1.5, BAR_EDGE));
        painter.text(
            egui::pos2(bar_rect.center().x, top - 2.0),
            egui::Align2::CENTER_BOTTOM,
            format!("{:.1}", bar.value),
            egui::FontId::proportional(12.0),
            BAR_EDGE,
        );
        let label = labels.get(i).map(String::as_str).unwrap_or(bar.label);
        painter.text(
            egui::pos2(bar_rect.center().x, plot.bottom() + 6.0),
            egui::Align2::CENTER_TOP,
            label,
            egui::FontId::proportional(11.0),
            egui::Color32::WHITE,
        );
    }
    painter.text(
        rect.left_top() + egui::vec2(12.0, 4.0),
        egui::Align2::LEFT_TOP,
        "kWh",
        egui::FontId::proportional(11.0),
        AXIS_TEXT,
    );
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    view: ViewState,
    /// 입력 화면 편집값
    form: InputParameters,
    form_error: Option<String>,
    export_status: Option<Result<PathBuf, String>>,
    show_settings_modal: bool,
    lang_input: String,
    settings_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let tr = app::translator_for(&config, None);
        Self {
            form: config.defaults,
            lang_input: config.language.clone(),
            config,
            tr,
            view: ViewState::default(),
            form_error: None,
            export_status: None,
            show_settings_modal: false,
            settings_status: None,
        }
    }

    fn run_estimate(&mut self) {
        match self.view.submit(self.form) {
            Ok(_) => {
                self.form_error = None;
                self.export_status = None;
            }
            Err(e) => self.form_error = Some(e.to_string()),
        }
    }

    fn export_current(&mut self) {
        let Some(report) = self.view.report().copied() else {
            return;
        };
        let dir = self.config.export_dir_or_default();
        self.export_status = Some(
            report::export(&report, &dir, Local::now().naive_local()).map_err(|e| e.to_string()),
        );
    }

    fn choose_export_dir(&mut self) {
        let current = self.config.export_dir_or_default();
        if let Some(dir) = FileDialog::new().set_directory(&current).pick_folder() {
            self.config.export_dir = Some(dir);
            if let Err(e) = self.config.save() {
                warn!("config save failed: {e}");
            }
        }
    }

    fn ui_input(&mut self, ui: &mut egui::Ui) {
        ui.heading(self.tr.t(keys::GUI_TITLE));
        ui.label(self.tr.t(keys::GUI_SUBTITLE));
        ui.separator();
        ui.label(
            egui::RichText::new(self.tr.t(keys::GUI_INPUTS))
                .color(ACCENT)
                .heading(),
        );
        ui.add_space(6.0);

        egui::Grid::new("input_grid")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                for field in InputField::ALL {
                    let (min, max) = field.range();
                    let mut value = field.get(&self.form);
                    let speed = if field == InputField::Efficiency { 0.01 } else { 0.1 };
                    ui.label(self.tr.t(i18n::input_label_key(field)));
                    let drag = egui::DragValue::new(&mut value)
                        .speed(speed)
                        .clamp_range(min..=max)
                        .max_decimals(3);
                    if ui.add(drag).changed() {
                        field.set(&mut self.form, value);
                    }
                    ui.end_row();
                }
                ui.label(self.tr.t(keys::INPUT_TYPE));
                egui::ComboBox::from_id_source("compressor_type")
                    .selected_text(self.form.compressor_type.label())
                    .show_ui(ui, |ui| {
                        for t in CompressorType::NAMED {
                            ui.selectable_value(&mut self.form.compressor_type, t, t.label());
                        }
                    });
                ui.end_row();
            });

        ui.add_space(10.0);
        if ui.button(self.tr.t(keys::GUI_RUN)).clicked() {
            self.run_estimate();
        }
        if let Some(err) = &self.form_error {
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }
    }

    fn ui_results(&mut self, ui: &mut egui::Ui, inputs: &InputParameters, report: &EnergyReport) {
        let tr = self.tr.clone();
        ui.label(
            egui::RichText::new(tr.t(keys::GUI_DASHBOARD))
                .color(ACCENT)
                .heading(),
        );
        ui.separator();

        ui.label(egui::RichText::new(tr.t(keys::RESULTS_SUMMARY)).strong());
        egui::Grid::new("summary_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                ui.label(tr.t(keys::RESULTS_COMPRESSOR));
                ui.label(report.compressor_label());
                ui.end_row();
                ui.label(tr.t(keys::INPUT_PRESSURE));
                ui.label(format!("{} bar", inputs.pressure_bar))
                    .on_hover_text(tr.t(keys::RESULTS_PRESSURE_NOTE));
                ui.end_row();
                ui.label(tr.t(keys::RESULTS_DAILY));
                ui.label(format!("{:.2} kWh", report.daily_energy_kwh));
                ui.end_row();
                ui.label(tr.t(keys::RESULTS_MONTHLY));
                ui.label(format!("{:.2} kWh", report.monthly_energy_kwh));
                ui.end_row();
                ui.label(tr.t(keys::RESULTS_COST));
                ui.label(format!("{CURRENCY_SYMBOL}{:.2}", report.monthly_cost));
                ui.end_row();
                ui.label(tr.t(keys::RESULTS_CO2));
                ui.label(format!("{:.2} kg", report.annual_co2_kg));
                ui.end_row();
            });

        ui.add_space(8.0);
        ui.label(egui::RichText::new(tr.t(keys::RESULTS_BREAKDOWN)).strong());
        let labels = chart_labels(&tr);
        let bars = chart::breakdown_bars(&report.breakdown);
        egui::Grid::new("breakdown_grid")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for (label, bar) in labels.iter().zip(bars.iter()) {
                    ui.label(label);
                    ui.label(format!("{:.2} kWh", bar.value));
                    ui.end_row();
                }
            });

        ui.add_space(8.0);
        ui.label(egui::RichText::new(tr.t(keys::RESULTS_CHART)).color(ACCENT));
        breakdown_chart(ui, &bars, &labels);

        ui.add_space(8.0);
        ui.label(egui::RichText::new(tr.t(keys::RESULTS_SUGGESTED)).strong());
        ui.label(
            egui::RichText::new(tr.t(i18n::tip_key(report.recommendation)))
                .color(BAR_EDGE)
                .strong(),
        );

        ui.separator();
        ui.horizontal(|ui| {
            ui.label(tr.t(keys::GUI_EXPORT_DIR));
            ui.monospace(self.config.export_dir_or_default().display().to_string());
        });
        ui.horizontal(|ui| {
            if ui.button(tr.t(keys::GUI_EXPORT)).clicked() {
                self.export_current();
            }
            if ui.button(tr.t(keys::GUI_CHOOSE_FOLDER)).clicked() {
                self.choose_export_dir();
            }
        });
        match &self.export_status {
            Some(Ok(path)) => {
                ui.colored_label(
                    BAR_EDGE,
                    format!("{} {}", tr.t(keys::EXPORT_SAVED), path.display()),
                );
            }
            Some(Err(e)) => {
                ui.colored_label(
                    egui::Color32::LIGHT_RED,
                    format!("{} {e}", tr.t(keys::EXPORT_FAILED)),
                );
            }
            None => {}
        }

        ui.add_space(10.0);
        if ui.button(tr.t(keys::GUI_BACK)).clicked() {
            self.view.back();
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("CAEEE").color(ACCENT).monospace());
                ui.separator();
                if ui.button(self.tr.t(keys::GUI_SETTINGS)).clicked() {
                    self.show_settings_modal = true;
                }
            });
        });

        if self.show_settings_modal {
            let mut apply = false;
            egui::Window::new(self.tr.t(keys::GUI_SETTINGS))
                .collapsible(false)
                .resizable(false)
                .open(&mut self.show_settings_modal)
                .show(ctx, |ui| {
                    ui.label(self.tr.t(keys::GUI_LANGUAGE));
                    egui::ComboBox::from_id_source("lang_choice")
                        .selected_text(&self.lang_input)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(
                                &mut self.lang_input,
                                "auto".into(),
                                self.tr.t(keys::GUI_LANGUAGE_AUTO),
                            );
                            ui.selectable_value(&mut self.lang_input, "en-us".into(), "English");
                            ui.selectable_value(&mut self.lang_input, "ko-kr".into(), "한국어");
                        });
                    if ui.button(self.tr.t(keys::GUI_SAVE)).clicked() {
                        apply = true;
                    }
                    if let Some(msg) = &self.settings_status {
                        ui.label(msg);
                    }
                });
            if apply {
                self.config.language = self.lang_input.clone();
                self.tr = app::translator_for(&self.config, None);
                self.settings_status = Some(match self.config.save() {
                    Ok(()) => self.tr.t(keys::GUI_SAVED),
                    Err(e) => format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)),
                });
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    match (self.view.inputs().copied(), self.view.report().copied()) {
                        (Some(inputs), Some(report)) => self.ui_results(ui, &inputs, &report),
                        _ => self.ui_input(ui),
                    }
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use air_energy_estimator::inputs::DEFAULT_INPUTS;

    fn app_with_dir(dir: &Path) -> GuiApp {
        let cfg = config::Config {
            language: "en-us".into(),
            export_dir: Some(dir.to_path_buf()),
            ..config::Config::default()
        };
        GuiApp::new(cfg)
    }

    #[test]
    fn starts_on_input_with_shared_defaults() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.view, ViewState::Input);
        assert_eq!(app.form, DEFAULT_INPUTS);
    }

    #[test]
    fn run_then_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_dir(dir.path());
        app.run_estimate();
        assert!(app.view.is_results());
        app.view.back();
        assert_eq!(app.view, ViewState::Input);
        assert_eq!(app.form, DEFAULT_INPUTS);
    }

    #[test]
    fn invalid_form_shows_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_dir(dir.path());
        app.form.efficiency = 0.0;
        app.run_estimate();
        assert!(!app.view.is_results());
        assert!(app.form_error.as_deref().unwrap_or_default().contains("efficiency"));
    }

    #[test]
    fn export_writes_into_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_dir(dir.path());
        app.run_estimate();
        app.export_current();
        match &app.export_status {
            Some(Ok(path)) => assert!(path.starts_with(dir.path())),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn export_failure_is_shown() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_with_dir(&dir.path().join("missing"));
        app.run_estimate();
        app.export_current();
        assert!(matches!(app.export_status, Some(Err(_))));
    }

    #[test]
    fn chart_labels_follow_breakdown_order() {
        let labels = chart_labels(&Translator::new("en-us"));
        for (label, expected) in labels.iter().zip(chart::BREAKDOWN_LABELS) {
            assert_eq!(label, expected);
        }
    }
}
