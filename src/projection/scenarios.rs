//! 현금, 대출, PPA 금융 시나리오 계산.
//! 각 생성기는 순 가격, 절감액 예측, 연도별 발전량만 보고 서로를 참조하지 않는다.

use serde::{Deserialize, Serialize};

use super::assumptions::LoanTerms;
use super::savings::SavingsForecast;

/// 현금 구매.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashScenario {
    /// 초기 부담액 [$]
    pub upfront_cost: f64,
    /// 회수 기간 [년]. 손익분기에 도달하지 못하면 0.
    pub payback_years: u32,
    /// 분석 기간 ROI [%]
    pub roi_25_year: f64,
    pub net_savings_25yr: f64,
}

/// 대출 구매.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanScenario {
    pub term_years: u32,
    pub apr: f64,
    /// 월 상환액 [$]
    pub monthly_payment: f64,
    /// 총 상환액 [$]
    pub total_cost: f64,
    /// 총 이자 [$]
    pub total_interest: f64,
    /// 첫해 절감액 - 첫해 상환액 [$]
    pub year1_cash_flow: f64,
    pub net_savings_25yr: f64,
}

/// 전력구매계약(PPA).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpaScenario {
    /// 시작 단가 [$/kWh]
    pub rate_per_kwh: f64,
    /// 연간 단가 인상률
    pub escalation: f64,
    /// 첫해 지불액 [$]
    pub year1_payment: f64,
    /// 분석 기간 총 지불액 [$]
    pub total_payments_25yr: f64,
    /// 계약 종료 시 소유권 이전 여부. 계약 조건이라 항상 true.
    pub ownership_transfer: bool,
    pub net_savings_25yr: f64,
}

/// 금융 시나리오 한 가지.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FinancingScenario {
    Cash(CashScenario),
    Loan(LoanScenario),
    Ppa(PpaScenario),
}

impl FinancingScenario {
    pub fn net_savings_25yr(&self) -> f64 {
        match self {
            FinancingScenario::Cash(s) => s.net_savings_25yr,
            FinancingScenario::Loan(s) => s.net_savings_25yr,
            FinancingScenario::Ppa(s) => s.net_savings_25yr,
        }
    }
}

/// 현금 구매 시나리오를 계산한다.
pub fn cash_scenario(net_price: f64, forecast: &SavingsForecast) -> CashScenario {
    let net_savings = forecast.net_savings_25yr;
    CashScenario {
        upfront_cost: net_price,
        payback_years: forecast.break_even_year.unwrap_or(0),
        roi_25_year: ((net_savings + net_price) / net_price - 1.0) * 100.0,
        net_savings_25yr: net_savings,
    }
}

/// 원리금 균등상환 월 납입액.
///
/// M = P·r(1+r)^n / ((1+r)^n − 1), r = APR/12, n = 개월 수.
/// 이율이 0이면 P/n 으로 나눈다. 개월 수가 0이면 0을 돌려준다.
pub fn monthly_payment(principal: f64, apr: f64, months: u64) -> f64 {
    if months == 0 {
        return 0.0;
    }
    let r = apr / 12.0;
    let n = months as f64;
    if r == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + r).powf(n);
    if !growth.is_finite() {
        // n → ∞ 극한: 이자만 낸다
        return principal * r;
    }
    principal * r * growth / (growth - 1.0)
}

/// 대출 시나리오를 계산한다.
///
/// `horizon_years`보다 긴 대출은 기간 안에 납부한 회차만 절감액에서 뺀다.
pub fn loan_scenario(
    net_price: f64,
    forecast: &SavingsForecast,
    terms: LoanTerms,
    horizon_years: u32,
) -> LoanScenario {
    let months = u64::from(terms.term_years) * 12;
    let payment = monthly_payment(net_price, terms.apr, months);
    let total_cost = payment * months as f64;
    let months_in_horizon = months.min(u64::from(horizon_years) * 12);
    let paid_in_horizon = payment * months_in_horizon as f64;

    LoanScenario {
        term_years: terms.term_years,
        apr: terms.apr,
        monthly_payment: payment,
        total_cost,
        total_interest: total_cost - net_price,
        year1_cash_flow: forecast.year1 - payment * 12.0,
        net_savings_25yr: forecast.horizon_cumulative() - paid_in_horizon,
    }
}

/// PPA 시나리오를 계산한다. 단가는 매년 복리로 인상된다.
pub fn ppa_scenario(
    production_kwh: &[f64],
    forecast: &SavingsForecast,
    start_rate: f64,
    escalation: f64,
) -> PpaScenario {
    let mut current_rate = start_rate;
    let mut total_payments = 0.0;
    for kwh in production_kwh {
        total_payments += kwh * current_rate;
        current_rate *= 1.0 + escalation;
    }
    let year1_payment = production_kwh.first().copied().unwrap_or(0.0) * start_rate;

    PpaScenario {
        rate_per_kwh: start_rate,
        escalation,
        year1_payment,
        total_payments_25yr: total_payments,
        ownership_transfer: true,
        net_savings_25yr: forecast.horizon_cumulative() - total_payments,
    }
}
