use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::compressor::LossCategory;
use crate::inputs::InputField;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const DEFAULT_HINT: &str = "general.default_hint";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_ESTIMATE: &str = "main_menu.estimate";
    pub const MAIN_MENU_PROFILES: &str = "main_menu.profiles";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const INPUT_HEADING: &str = "input.heading";
    pub const INPUT_POWER: &str = "input.power";
    pub const INPUT_HOURS: &str = "input.hours";
    pub const INPUT_PRESSURE: &str = "input.pressure";
    pub const INPUT_EFFICIENCY: &str = "input.efficiency";
    pub const INPUT_COST: &str = "input.cost";
    pub const INPUT_CO2_FACTOR: &str = "input.co2_factor";
    pub const INPUT_TYPE_HEADING: &str = "input.type_heading";
    pub const INPUT_TYPE_PROMPT: &str = "input.type_prompt";
    pub const INPUT_TYPE: &str = "input.type";

    pub const RESULTS_HEADING: &str = "results.heading";
    pub const RESULTS_COMPRESSOR: &str = "results.compressor";
    pub const RESULTS_SUMMARY: &str = "results.summary";
    pub const RESULTS_DAILY: &str = "results.daily";
    pub const RESULTS_MONTHLY: &str = "results.monthly";
    pub const RESULTS_COST: &str = "results.cost";
    pub const RESULTS_CO2: &str = "results.co2";
    pub const RESULTS_BREAKDOWN: &str = "results.breakdown";
    pub const RESULTS_CHART: &str = "results.chart";
    pub const RESULTS_SUGGESTED: &str = "results.suggested";
    pub const RESULTS_PRESSURE_NOTE: &str = "results.pressure_note";
    pub const RESULTS_MENU_EXPORT: &str = "results_menu.export";
    pub const RESULTS_MENU_BACK: &str = "results_menu.back";

    pub const EXPORT_SAVED: &str = "export.saved";
    pub const EXPORT_FAILED: &str = "export.failed";

    pub const PROFILES_HEADING: &str = "profiles.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_CURRENT_EXPORT_DIR: &str = "settings.current_export_dir";
    pub const SETTINGS_PROMPT_LANGUAGE: &str = "settings.prompt_language";
    pub const SETTINGS_PROMPT_EXPORT_DIR: &str = "settings.prompt_export_dir";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const LOSS_USEFUL: &str = "loss.useful";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_SUBTITLE: &str = "gui.subtitle";
    pub const GUI_INPUTS: &str = "gui.inputs";
    pub const GUI_RUN: &str = "gui.run";
    pub const GUI_DASHBOARD: &str = "gui.dashboard";
    pub const GUI_BACK: &str = "gui.back";
    pub const GUI_EXPORT: &str = "gui.export";
    pub const GUI_CHOOSE_FOLDER: &str = "gui.choose_folder";
    pub const GUI_EXPORT_DIR: &str = "gui.export_dir";
    pub const GUI_SETTINGS: &str = "gui.settings";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_LANGUAGE_AUTO: &str = "gui.language_auto";
    pub const GUI_SAVE: &str = "gui.save";
    pub const GUI_SAVED: &str = "gui.saved";
}

/// 입력 항목 라벨 키.
pub fn input_label_key(field: InputField) -> &'static str {
    match field {
        InputField::Power => keys::INPUT_POWER,
        InputField::Hours => keys::INPUT_HOURS,
        InputField::Pressure => keys::INPUT_PRESSURE,
        InputField::Efficiency => keys::INPUT_EFFICIENCY,
        InputField::ElectricityCost => keys::INPUT_COST,
        InputField::Co2Factor => keys::INPUT_CO2_FACTOR,
    }
}

/// 손실 항목 라벨 키.
pub fn loss_label_key(category: LossCategory) -> &'static str {
    match category {
        LossCategory::AirLeaks => "loss.air_leaks",
        LossCategory::IdleRunning => "loss.idle_running",
        LossCategory::PressureDrop => "loss.pressure_drop",
        LossCategory::Overcapacity => "loss.overcapacity",
        LossCategory::HeatLoss => "loss.heat_loss",
    }
}

/// 권장 조치 문구 키.
pub fn tip_key(category: LossCategory) -> &'static str {
    match category {
        LossCategory::AirLeaks => "tip.air_leaks",
        LossCategory::IdleRunning => "tip.idle_running",
        LossCategory::PressureDrop => "tip.pressure_drop",
        LossCategory::Overcapacity => "tip.overcapacity",
        LossCategory::HeatLoss => "tip.heat_loss",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ko,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en-us",
            Language::Ko => "ko-kr",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 내장 언어팩만으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리의 파일은 내장 문자열 위에 덮어쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut strings = built_in_pack(lang);
        if let Some(overrides) = pack_dir.and_then(|dir| load_overrides(dir, lang.as_code())) {
            strings.extend(overrides);
        }
        Self {
            lang,
            strings,
            fallback: built_in_pack(Language::En),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// 번역을 가져온다. 없으면 영어, 그것도 없으면 키 자체를 반환한다.
    pub fn t(&self, key: &str) -> String {
        self.lookup(key)
            .or_else(|| self.fallback.get(key).map(String::as_str))
            .unwrap_or(key)
            .to_string()
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    for var in ["LANG", "LC_ALL"] {
        if let Some(code) = std::env::var(var).ok().as_deref().and_then(normalize_locale_string) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 (중첩 가능한) 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    try_load(lang).or_else(|| {
        let (base, _) = lang.split_once(['-', '_'])?;
        try_load(base)
    })
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> HashMap<String, String> {
    let src = match lang {
        Language::En => include_str!("../locales/en-us.toml"),
        Language::Ko => include_str!("../locales/ko-kr.toml"),
    };
    parse_toml_to_map(src).unwrap_or_default()
}
