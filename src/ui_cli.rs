use std::io::{self, Write};

use crate::app::{self, AppError};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::projection::assumptions::{find_state, state_rates};
use crate::projection::{self, ProposalRequest, ProposalResult, RateSource, ScenarioKind};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Generate,
    StateRates,
    Assumptions,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_GENERATE));
    println!("{}", tr.t(keys::MAIN_MENU_STATE_RATES));
    println!("{}", tr.t(keys::MAIN_MENU_ASSUMPTIONS));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Generate),
            "2" => return Ok(MenuChoice::StateRates),
            "3" => return Ok(MenuChoice::Assumptions),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 제안서 생성 메뉴를 처리한다.
pub fn handle_generate(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::GENERATE_HEADING));
    let lead_id = read_line(tr.t(keys::PROMPT_LEAD_ID))?.trim().to_string();
    let panel_count = read_u32(tr, tr.t(keys::PROMPT_PANEL_COUNT))?;
    let sunshine_hours_year = read_f64(tr, tr.t(keys::PROMPT_SUNSHINE_HOURS))?;
    let location = read_line(tr.t(keys::PROMPT_STATE_OR_ADDRESS))?;
    let custom_utility_rate = read_optional_f64(tr, tr.t(keys::PROMPT_CUSTOM_RATE))?;

    let request = ProposalRequest {
        lead_id,
        panel_count,
        sunshine_hours_year,
        state_code: state_from_input(&location),
        custom_utility_rate,
    };
    let result = app::compute(cfg, &request, true)?;
    print_proposal(tr, &result);
    Ok(())
}

/// 두 글자 코드는 그대로 쓰고, 그 외 입력은 주소로 보고 주 코드를 추정한다.
pub fn state_from_input(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Some(state) = find_state(input) {
        return Some(state.code.to_string());
    }
    projection::extract_state_code(input).map(str::to_string)
}

/// 설정 메뉴를 처리한다. 변경되었으면 true.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<bool, AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        tr.language().as_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let language = match sel.trim() {
        "" => return Ok(false),
        "1" => "ko",
        "2" => "en-us",
        "3" => "auto",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(false);
        }
    };
    cfg.language = language.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(true)
}

/// 제안서 요약을 출력한다.
pub fn print_proposal(tr: &Translator, result: &ProposalResult) {
    println!("{}", tr.t(keys::RESULT_HEADING));
    println!("Lead: {}  ({})", result.lead_id, result.generated_at.to_rfc3339());
    println!(
        "{} {:.0} W ({:.2} kW)",
        tr.t(keys::RESULT_SYSTEM),
        result.system.watts,
        result.system.kw
    );
    println!("{} ${:.2}", tr.t(keys::RESULT_GROSS_COST), result.costs.gross_cost);
    println!(
        "{} ${:.2}",
        tr.t(keys::RESULT_INCENTIVES),
        result.costs.total_incentives
    );
    println!(
        "{} ${:.2} (${:.3}/W)",
        tr.t(keys::RESULT_NET_PRICE),
        result.costs.net_price,
        result.costs.effective_cost_per_watt
    );
    println!(
        "{} {:.0} / {:.0} kWh",
        tr.t(keys::RESULT_PRODUCTION),
        result.production.year1_kwh,
        result.production.lifetime_kwh
    );
    println!(
        "{} ${:.4}/kWh ({})",
        tr.t(keys::RESULT_UTILITY_RATE),
        result.assumptions.utility_rate,
        rate_source_label(tr, &result.assumptions.utility_rate_source)
    );
    let s = &result.savings;
    println!(
        "{} ${:.2} / ${:.2} / ${:.2} / ${:.2}",
        tr.t(keys::RESULT_SAVINGS),
        s.year1,
        s.year5,
        s.year10,
        s.year25
    );
    match s.break_even_year {
        Some(year) => println!("{} {year}", tr.t(keys::RESULT_BREAK_EVEN)),
        None => println!("{}", tr.t(keys::RESULT_NO_BREAK_EVEN)),
    }

    println!("{}", tr.t(keys::RESULT_SCENARIOS));
    let set = &result.scenarios;
    for kind in ScenarioKind::EVALUATION_ORDER {
        let marker = if kind == set.recommended { "*" } else { " " };
        println!(
            " {marker} {:<12} ${:>12.2}",
            scenario_label(tr, kind),
            set.net_savings(kind)
        );
    }
    println!(
        "   cash: ROI {:.1}%, payback {} yr",
        set.cash.roi_25_year, set.cash.payback_years
    );
    for loan in [&set.loan10, &set.loan15] {
        println!(
            "   loan {}y @ {:.2}%: ${:.2}/mo, interest ${:.2}, year-1 cash flow ${:.2}",
            loan.term_years,
            loan.apr * 100.0,
            loan.monthly_payment,
            loan.total_interest,
            loan.year1_cash_flow
        );
    }
    println!(
        "   ppa: ${:.3}/kWh (+{:.1}%/yr), year-1 ${:.2}, total ${:.2}",
        set.ppa.rate_per_kwh,
        set.ppa.escalation * 100.0,
        set.ppa.year1_payment,
        set.ppa.total_payments_25yr
    );
    println!(
        "{} {}",
        tr.t(keys::RESULT_RECOMMENDED),
        scenario_label(tr, set.recommended)
    );
}

/// 주별 전기요금표를 출력한다.
pub fn print_state_rates(tr: &Translator) {
    println!("{}", tr.t(keys::STATE_RATES_HEADING));
    for state in state_rates() {
        println!("{}  {:<22} {:.4}", state.code, state.name, state.rate);
    }
}

/// 현재 가정값을 TOML 형태로 출력한다.
pub fn print_assumptions(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::ASSUMPTIONS_HEADING));
    println!("{}", cfg.to_toml()?);
    Ok(())
}

fn scenario_label(tr: &Translator, kind: ScenarioKind) -> &str {
    match kind {
        ScenarioKind::Cash => tr.t(keys::SCENARIO_CASH),
        ScenarioKind::Loan10 => tr.t(keys::SCENARIO_LOAN10),
        ScenarioKind::Loan15 => tr.t(keys::SCENARIO_LOAN15),
        ScenarioKind::Ppa => tr.t(keys::SCENARIO_PPA),
    }
}

fn rate_source_label(tr: &Translator, source: &RateSource) -> String {
    match source {
        RateSource::Custom => tr.t(keys::RATE_SOURCE_CUSTOM).to_string(),
        RateSource::State(code) => format!("{} {code}", tr.t(keys::RATE_SOURCE_STATE)),
        RateSource::National => tr.t(keys::RATE_SOURCE_NATIONAL).to_string(),
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_u32(tr: &Translator, prompt: &str) -> Result<u32, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<u32>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_input_accepts_code_or_address() {
        assert_eq!(state_from_input(" ny ").as_deref(), Some("NY"));
        assert_eq!(
            state_from_input("500 Pine St, Seattle, WA 98101").as_deref(),
            Some("WA")
        );
        assert_eq!(state_from_input(""), None);
        assert_eq!(state_from_input("somewhere"), None);
    }
}
