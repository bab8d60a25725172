use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use super::assumptions::{
    resolve_utility_rate, Assumptions, LoanTerms, RateSource, MAX_LIFESPAN_YEARS,
    MAX_LOAN_TERM_YEARS,
};
use super::production::{
    performance_ratio, project_production, ProductionEstimate, ProductionInput,
};
use super::recommendation::ScenarioSet;
use super::savings::{forecast_savings, SavingsForecast, SavingsInput};
use super::scenarios::{cash_scenario, loan_scenario, ppa_scenario};
use super::sizing::{size_and_cost, CostBreakdown, SizingInput, SystemSize};

/// 검증 계층에서 입력을 거부할 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// 입력값이 잘못된 경우
    InvalidInput(&'static str),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidInput(msg) => write!(f, "입력 오류: {msg}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// 제안서 생성 요청.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposalRequest {
    /// 리드 식별자(검증하지 않음)
    pub lead_id: String,
    pub panel_count: u32,
    /// 연간 일사시간 [h/년]
    pub sunshine_hours_year: f64,
    /// 두 글자 주 코드
    pub state_code: Option<String>,
    /// 직접 지정한 전기요금 [$/kWh]
    pub custom_utility_rate: Option<f64>,
}

/// 결과에 함께 저장하는 사용된 가정값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalAssumptions {
    #[serde(flatten)]
    pub constants: Assumptions,
    pub performance_ratio: f64,
    /// 실제로 적용한 첫해 전기요금 [$/kWh]
    pub utility_rate: f64,
    pub utility_rate_source: RateSource,
}

/// 제안서 계산 결과 전체.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProposalResult {
    pub lead_id: String,
    pub generated_at: DateTime<Utc>,
    pub system: SystemSize,
    pub production: ProductionEstimate,
    pub costs: CostBreakdown,
    pub savings: SavingsForecast,
    pub scenarios: ScenarioSet,
    pub assumptions: ProposalAssumptions,
}

/// 기본 가정값으로 제안서를 생성한다.
///
/// 입력을 검증하지 않는다. 0이나 음수를 넣으면 0이나 음수 결과가 그대로 나온다.
pub fn generate(
    lead_id: &str,
    panel_count: u32,
    sunshine_hours_year: f64,
    state_code: Option<&str>,
    custom_utility_rate: Option<f64>,
) -> ProposalResult {
    let request = ProposalRequest {
        lead_id: lead_id.to_string(),
        panel_count,
        sunshine_hours_year,
        state_code: state_code.map(str::to_string),
        custom_utility_rate,
    };
    generate_with(&Assumptions::default(), &request)
}

/// 주어진 가정값으로 제안서를 생성한다.
///
/// 규모/비용 → 발전량 → 절감액 → 시나리오 4종 → 추천 순서로 계산한다.
pub fn generate_with(assumptions: &Assumptions, request: &ProposalRequest) -> ProposalResult {
    let (system, costs) = size_and_cost(SizingInput {
        panel_count: request.panel_count,
        panel_wattage: assumptions.panel_wattage,
        cost_per_watt: assumptions.cost_per_watt,
        itc_rate: assumptions.itc_rate,
        state_rebate: assumptions.state_rebate,
    });
    debug!(
        "lead {}: {} W system, net price {:.2}",
        request.lead_id, system.watts, costs.net_price
    );

    let production = project_production(ProductionInput {
        sunshine_hours_year: request.sunshine_hours_year,
        panel_count: request.panel_count,
        panel_wattage: assumptions.panel_wattage,
        panel_efficiency: assumptions.panel_efficiency,
        inverter_efficiency: assumptions.inverter_efficiency,
        degradation_rate: assumptions.degradation_rate,
        years: assumptions.lifespan_years,
    });

    let rate = resolve_utility_rate(
        request.custom_utility_rate,
        request.state_code.as_deref(),
        assumptions.national_utility_rate,
    );
    debug!(
        "lead {}: year1 {:.1} kWh, utility rate {:.4} ({:?})",
        request.lead_id, production.year1_kwh, rate.rate, rate.source
    );

    let savings = forecast_savings(SavingsInput {
        production_kwh: &production.per_year_kwh,
        start_rate: rate.rate,
        escalation: assumptions.utility_escalation,
        net_price: costs.net_price,
    });

    let horizon = assumptions.lifespan_years;
    let scenarios = ScenarioSet::new(
        cash_scenario(costs.net_price, &savings),
        loan_scenario(costs.net_price, &savings, assumptions.loan10, horizon),
        loan_scenario(costs.net_price, &savings, assumptions.loan15, horizon),
        ppa_scenario(
            &production.per_year_kwh,
            &savings,
            assumptions.ppa_start_rate,
            assumptions.ppa_escalation,
        ),
    );
    debug!(
        "lead {}: break-even {:?}, recommended {}",
        request.lead_id,
        savings.break_even_year,
        scenarios.recommended.as_str()
    );

    ProposalResult {
        lead_id: request.lead_id.clone(),
        generated_at: Utc::now(),
        system,
        production,
        costs,
        savings,
        scenarios,
        assumptions: ProposalAssumptions {
            constants: assumptions.clone(),
            performance_ratio: performance_ratio(
                assumptions.panel_efficiency,
                assumptions.inverter_efficiency,
            ),
            utility_rate: rate.rate,
            utility_rate_source: rate.source,
        },
    }
}

/// 입력 전제조건을 확인한 뒤 제안서를 생성한다.
///
/// `generate_with`와 달리 퇴화한 입력은 결과 대신 오류로 돌려준다.
pub fn generate_checked(
    assumptions: &Assumptions,
    request: &ProposalRequest,
) -> Result<ProposalResult, ValidationError> {
    validate(assumptions, request)?;
    let result = generate_with(assumptions, request);
    if result.costs.net_price < 0.0 {
        return Err(ValidationError::InvalidInput(
            "인센티브 합계가 총 설치비보다 큽니다.",
        ));
    }
    Ok(result)
}

fn validate(assumptions: &Assumptions, request: &ProposalRequest) -> Result<(), ValidationError> {
    if request.lead_id.trim().is_empty() {
        return Err(ValidationError::InvalidInput("리드 ID가 비어 있습니다."));
    }
    if request.panel_count == 0 {
        return Err(ValidationError::InvalidInput(
            "패널 수량은 0보다 커야 합니다.",
        ));
    }
    if !request.sunshine_hours_year.is_finite() || request.sunshine_hours_year <= 0.0 {
        return Err(ValidationError::InvalidInput(
            "연간 일사시간은 0보다 큰 수여야 합니다.",
        ));
    }
    if let Some(rate) = request.custom_utility_rate {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(ValidationError::InvalidInput(
                "직접 지정한 전기요금은 0보다 큰 수여야 합니다.",
            ));
        }
    }
    if assumptions.lifespan_years == 0 || assumptions.lifespan_years > MAX_LIFESPAN_YEARS {
        return Err(ValidationError::InvalidInput(
            "분석 기간은 1년 이상 100년 이하여야 합니다.",
        ));
    }
    validate_loan(assumptions.loan10)?;
    validate_loan(assumptions.loan15)?;
    if assumptions.panel_wattage <= 0.0 || assumptions.cost_per_watt <= 0.0 {
        return Err(ValidationError::InvalidInput(
            "패널 출력과 설치 단가는 0보다 커야 합니다.",
        ));
    }
    Ok(())
}

fn validate_loan(terms: LoanTerms) -> Result<(), ValidationError> {
    if terms.term_years == 0 || terms.term_years > MAX_LOAN_TERM_YEARS {
        return Err(ValidationError::InvalidInput(
            "대출 기간은 1년 이상 50년 이하여야 합니다.",
        ));
    }
    if !terms.apr.is_finite() || terms.apr < 0.0 {
        return Err(ValidationError::InvalidInput(
            "대출 이율은 0 이상의 유한한 수여야 합니다.",
        ));
    }
    Ok(())
}
