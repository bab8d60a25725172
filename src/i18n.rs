use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_GENERATE: &str = "main_menu.generate";
    pub const MAIN_MENU_STATE_RATES: &str = "main_menu.state_rates";
    pub const MAIN_MENU_ASSUMPTIONS: &str = "main_menu.assumptions";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const GENERATE_HEADING: &str = "generate.heading";
    pub const PROMPT_LEAD_ID: &str = "prompt.lead_id";
    pub const PROMPT_PANEL_COUNT: &str = "prompt.panel_count";
    pub const PROMPT_SUNSHINE_HOURS: &str = "prompt.sunshine_hours";
    pub const PROMPT_STATE_OR_ADDRESS: &str = "prompt.state_or_address";
    pub const PROMPT_CUSTOM_RATE: &str = "prompt.custom_rate";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_SYSTEM: &str = "result.system";
    pub const RESULT_GROSS_COST: &str = "result.gross_cost";
    pub const RESULT_INCENTIVES: &str = "result.incentives";
    pub const RESULT_NET_PRICE: &str = "result.net_price";
    pub const RESULT_PRODUCTION: &str = "result.production";
    pub const RESULT_UTILITY_RATE: &str = "result.utility_rate";
    pub const RESULT_SAVINGS: &str = "result.savings";
    pub const RESULT_BREAK_EVEN: &str = "result.break_even";
    pub const RESULT_NO_BREAK_EVEN: &str = "result.no_break_even";
    pub const RESULT_SCENARIOS: &str = "result.scenarios";
    pub const RESULT_RECOMMENDED: &str = "result.recommended";

    pub const SCENARIO_CASH: &str = "scenario.cash";
    pub const SCENARIO_LOAN10: &str = "scenario.loan10";
    pub const SCENARIO_LOAN15: &str = "scenario.loan15";
    pub const SCENARIO_PPA: &str = "scenario.ppa";

    pub const RATE_SOURCE_CUSTOM: &str = "rate_source.custom";
    pub const RATE_SOURCE_STATE: &str = "rate_source.state";
    pub const RATE_SOURCE_NATIONAL: &str = "rate_source.national";

    pub const STATE_RATES_HEADING: &str = "state_rates.heading";
    pub const ASSUMPTIONS_HEADING: &str = "assumptions.heading";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 언어팩 > 내장 문자열 순이며, 없으면 키를 그대로 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return v.as_str();
        }
        let built_in: Option<&str> = match self.lang {
            Language::En => en(key),
            Language::Ko => ko(key).or_else(|| en(key)),
        };
        built_in.unwrap_or(key)
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
        "ko" | "ko-kr" => Some(c),
        "en" | "en-us" => Some(c),
        other if other.starts_with("ko") => Some("ko".into()),
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
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
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

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Solar Proposal Toolbox ===",
        MAIN_MENU_GENERATE => "1) 제안서 생성",
        MAIN_MENU_STATE_RATES => "2) 주별 전기요금표",
        MAIN_MENU_ASSUMPTIONS => "3) 계산 가정값",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        GENERATE_HEADING => "\n-- 제안서 생성 --",
        PROMPT_LEAD_ID => "리드 ID: ",
        PROMPT_PANEL_COUNT => "패널 수량: ",
        PROMPT_SUNSHINE_HOURS => "연간 일사시간 [h]: ",
        PROMPT_STATE_OR_ADDRESS => "주 코드 또는 주소 (없으면 엔터): ",
        PROMPT_CUSTOM_RATE => "전기요금 직접 지정 [$/kWh] (없으면 엔터): ",
        RESULT_HEADING => "\n== 제안서 결과 ==",
        RESULT_SYSTEM => "시스템 규모:",
        RESULT_GROSS_COST => "총 설치비:",
        RESULT_INCENTIVES => "인센티브 합계:",
        RESULT_NET_PRICE => "순 가격:",
        RESULT_PRODUCTION => "발전량(첫해/전체):",
        RESULT_UTILITY_RATE => "첫해 전기요금:",
        RESULT_SAVINGS => "절감액(1/5/10/25년):",
        RESULT_BREAK_EVEN => "손익분기 연도:",
        RESULT_NO_BREAK_EVEN => "분석 기간 내 손익분기 없음",
        RESULT_SCENARIOS => "금융 시나리오 (순절감액):",
        RESULT_RECOMMENDED => "추천:",
        SCENARIO_CASH => "현금",
        SCENARIO_LOAN10 => "10년 대출",
        SCENARIO_LOAN15 => "15년 대출",
        SCENARIO_PPA => "PPA",
        RATE_SOURCE_CUSTOM => "직접 지정",
        RATE_SOURCE_STATE => "주 평균",
        RATE_SOURCE_NATIONAL => "전국 평균",
        STATE_RATES_HEADING => "\n-- 주별 주거용 전기요금 [$/kWh] --",
        ASSUMPTIONS_HEADING => "\n-- 계산 가정값 --",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) 자동",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Solar Proposal Toolbox ===",
        MAIN_MENU_GENERATE => "1) Generate proposal",
        MAIN_MENU_STATE_RATES => "2) State utility rates",
        MAIN_MENU_ASSUMPTIONS => "3) Assumptions",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        GENERATE_HEADING => "\n-- Generate Proposal --",
        PROMPT_LEAD_ID => "Lead ID: ",
        PROMPT_PANEL_COUNT => "Panel count: ",
        PROMPT_SUNSHINE_HOURS => "Annual sunshine hours [h]: ",
        PROMPT_STATE_OR_ADDRESS => "State code or address (enter to skip): ",
        PROMPT_CUSTOM_RATE => "Custom utility rate [$/kWh] (enter to skip): ",
        RESULT_HEADING => "\n== Proposal ==",
        RESULT_SYSTEM => "System size:",
        RESULT_GROSS_COST => "Gross cost:",
        RESULT_INCENTIVES => "Total incentives:",
        RESULT_NET_PRICE => "Net price:",
        RESULT_PRODUCTION => "Production (year 1/lifetime):",
        RESULT_UTILITY_RATE => "Year-1 utility rate:",
        RESULT_SAVINGS => "Savings (1/5/10/25 yr):",
        RESULT_BREAK_EVEN => "Break-even year:",
        RESULT_NO_BREAK_EVEN => "No break-even within the horizon",
        RESULT_SCENARIOS => "Financing scenarios (net savings):",
        RESULT_RECOMMENDED => "Recommended:",
        SCENARIO_CASH => "Cash",
        SCENARIO_LOAN10 => "10-year loan",
        SCENARIO_LOAN15 => "15-year loan",
        SCENARIO_PPA => "PPA",
        RATE_SOURCE_CUSTOM => "custom",
        RATE_SOURCE_STATE => "state average",
        RATE_SOURCE_NATIONAL => "national average",
        STATE_RATES_HEADING => "\n-- Residential utility rates by state [$/kWh] --",
        ASSUMPTIONS_HEADING => "\n-- Assumptions --",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) Auto",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        _ => return None,
    })
}
