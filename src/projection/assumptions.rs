//! 제안서 계산에 쓰이는 고정 가정값과 주별 전기요금 테이블.
//! 요금은 주거용 평균 단가 [$/kWh] 근사치이며 참고용이다.

use log::warn;
use serde::{Deserialize, Serialize};

/// 전국 평균 주거용 전기요금 [$/kWh]. 주 코드를 모를 때 사용한다.
pub const NATIONAL_UTILITY_RATE: f64 = 0.1762;

/// 성능비 산정에 곱하는 경험적 보정 계수.
pub const PERFORMANCE_ADJUSTMENT: f64 = 5.0;

/// 검증 계층이 허용하는 최대 분석 기간 [년].
pub const MAX_LIFESPAN_YEARS: u32 = 100;

/// 검증 계층이 허용하는 최대 대출 기간 [년].
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// 대출 조건(기간, 연이율).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    /// 상환 기간 [년]
    pub term_years: u32,
    /// 연이율(APR), 소수
    pub apr: f64,
}

impl LoanTerms {
    pub const fn new(term_years: u32, apr: f64) -> Self {
        Self { term_years, apr }
    }
}

/// 계산 전체에서 사용하는 가정값 묶음.
///
/// 설정 파일에서 일부만 지정해도 나머지는 기본값으로 채워진다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    /// 패널 1장 정격 출력 [W]
    pub panel_wattage: f64,
    /// 설치 단가 [$/W]
    pub cost_per_watt: f64,
    /// 연방 투자세액공제(ITC) 비율
    pub itc_rate: f64,
    /// 주 리베이트 [$]
    pub state_rebate: f64,
    /// 패널 효율(0~1)
    pub panel_efficiency: f64,
    /// 인버터 효율(0~1)
    pub inverter_efficiency: f64,
    /// 연간 출력 열화율
    pub degradation_rate: f64,
    /// 분석 기간 [년]
    pub lifespan_years: u32,
    /// 전국 평균 전기요금 [$/kWh]
    pub national_utility_rate: f64,
    /// 전기요금 연간 인상률
    pub utility_escalation: f64,
    pub loan10: LoanTerms,
    pub loan15: LoanTerms,
    /// PPA 시작 단가 [$/kWh]
    pub ppa_start_rate: f64,
    /// PPA 단가 연간 인상률
    pub ppa_escalation: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            panel_wattage: 400.0,
            cost_per_watt: 2.50,
            itc_rate: 0.30,
            state_rebate: 0.0,
            panel_efficiency: 0.20,
            inverter_efficiency: 0.96,
            degradation_rate: 0.005,
            lifespan_years: 25,
            national_utility_rate: NATIONAL_UTILITY_RATE,
            utility_escalation: 0.03,
            loan10: LoanTerms::new(10, 0.0699),
            loan15: LoanTerms::new(15, 0.0749),
            ppa_start_rate: 0.12,
            ppa_escalation: 0.029,
        }
    }
}

/// 주별 전기요금 항목.
#[derive(Debug)]
pub struct StateRate {
    pub code: &'static str,
    pub name: &'static str,
    /// 주거용 평균 단가 [$/kWh]
    pub rate: f64,
}

/// 시작 전기요금을 어디서 가져왔는지 표시한다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "code", rename_all = "snake_case")]
pub enum RateSource {
    /// 호출자가 직접 지정한 단가
    Custom,
    /// 주 테이블에서 찾은 단가
    State(String),
    /// 전국 평균으로 폴백
    National,
}

/// 결정된 시작 전기요금.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    pub rate: f64,
    pub source: RateSource,
}

pub fn state_rates() -> &'static [StateRate] {
    STATE_RATES
}

/// 대소문자와 앞뒤 공백을 무시하고 주 코드를 찾는다.
pub fn find_state(code: &str) -> Option<&'static StateRate> {
    let code = code.trim();
    STATE_RATES.iter().find(|s| s.code.eq_ignore_ascii_case(code))
}

/// 시작 전기요금을 결정한다. 직접 지정 > 주 테이블 > 전국 평균 순이다.
pub fn resolve_utility_rate(
    custom_rate: Option<f64>,
    state_code: Option<&str>,
    national_rate: f64,
) -> ResolvedRate {
    if let Some(rate) = custom_rate {
        return ResolvedRate {
            rate,
            source: RateSource::Custom,
        };
    }
    match state_code {
        Some(code) => match find_state(code) {
            Some(state) => ResolvedRate {
                rate: state.rate,
                source: RateSource::State(state.code.to_string()),
            },
            None => {
                warn!("unknown state code {code:?}, using national average rate");
                ResolvedRate {
                    rate: national_rate,
                    source: RateSource::National,
                }
            }
        },
        None => ResolvedRate {
            rate: national_rate,
            source: RateSource::National,
        },
    }
}

const fn sr(code: &'static str, name: &'static str, rate: f64) -> StateRate {
    StateRate { code, name, rate }
}

const STATE_RATES: &[StateRate] = &[
    sr("AL", "Alabama", 0.1520),
    sr("AK", "Alaska", 0.2470),
    sr("AZ", "Arizona", 0.1490),
    sr("AR", "Arkansas", 0.1280),
    sr("CA", "California", 0.3060),
    sr("CO", "Colorado", 0.1550),
    sr("CT", "Connecticut", 0.2880),
    sr("DE", "Delaware", 0.1650),
    sr("DC", "District of Columbia", 0.1810),
    sr("FL", "Florida", 0.1510),
    sr("GA", "Georgia", 0.1400),
    sr("HI", "Hawaii", 0.4250),
    sr("ID", "Idaho", 0.1170),
    sr("IL", "Illinois", 0.1650),
    sr("IN", "Indiana", 0.1550),
    sr("IA", "Iowa", 0.1340),
    sr("KS", "Kansas", 0.1460),
    sr("KY", "Kentucky", 0.1290),
    sr("LA", "Louisiana", 0.1230),
    sr("ME", "Maine", 0.2680),
    sr("MD", "Maryland", 0.1800),
    sr("MA", "Massachusetts", 0.2950),
    sr("MI", "Michigan", 0.1900),
    sr("MN", "Minnesota", 0.1560),
    sr("MS", "Mississippi", 0.1350),
    sr("MO", "Missouri", 0.1340),
    sr("MT", "Montana", 0.1350),
    sr("NE", "Nebraska", 0.1180),
    sr("NV", "Nevada", 0.1480),
    sr("NH", "New Hampshire", 0.2450),
    sr("NJ", "New Jersey", 0.1900),
    sr("NM", "New Mexico", 0.1500),
    sr("NY", "New York", 0.2480),
    sr("NC", "North Carolina", 0.1390),
    sr("ND", "North Dakota", 0.1130),
    sr("OH", "Ohio", 0.1600),
    sr("OK", "Oklahoma", 0.1280),
    sr("OR", "Oregon", 0.1390),
    sr("PA", "Pennsylvania", 0.1800),
    sr("RI", "Rhode Island", 0.2860),
    sr("SC", "South Carolina", 0.1430),
    sr("SD", "South Dakota", 0.1280),
    sr("TN", "Tennessee", 0.1270),
    sr("TX", "Texas", 0.1480),
    sr("UT", "Utah", 0.1200),
    sr("VT", "Vermont", 0.2220),
    sr("VA", "Virginia", 0.1450),
    sr("WA", "Washington", 0.1230),
    sr("WV", "West Virginia", 0.1480),
    sr("WI", "Wisconsin", 0.1760),
    sr("WY", "Wyoming", 0.1240),
];
