use serde::{Deserialize, Serialize};

use super::assumptions::PERFORMANCE_ADJUSTMENT;

/// 발전량 추정 입력.
#[derive(Debug, Clone)]
pub struct ProductionInput {
    /// 연간 일사시간(peak-sun-hours) [h/년]
    pub sunshine_hours_year: f64,
    pub panel_count: u32,
    /// 패널 1장 정격 출력 [W]
    pub panel_wattage: f64,
    /// 패널 효율(0~1)
    pub panel_efficiency: f64,
    /// 인버터 효율(0~1)
    pub inverter_efficiency: f64,
    /// 연간 열화율
    pub degradation_rate: f64,
    /// 분석 기간 [년]
    pub years: u32,
}

/// 연도별 발전량 추정 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEstimate {
    pub system_watts: f64,
    pub system_kw: f64,
    /// 첫해 발전량 [kWh]
    pub year1_kwh: f64,
    /// 분석 기간 총 발전량 [kWh]
    pub lifetime_kwh: f64,
    /// 연도별 발전량 [kWh], 0번이 첫해
    pub per_year_kwh: Vec<f64>,
}

/// 효율 두 가지와 보정 계수로 성능비를 구한다.
pub fn performance_ratio(panel_efficiency: f64, inverter_efficiency: f64) -> f64 {
    panel_efficiency * inverter_efficiency * PERFORMANCE_ADJUSTMENT
}

/// 첫해 발전량과 열화를 반영한 연도별 발전량을 계산한다.
///
/// year1 = 일사시간 × kW × 성능비, 이후 매년 (1 - 열화율)^연차 를 곱한다.
pub fn project_production(input: ProductionInput) -> ProductionEstimate {
    let system_watts = f64::from(input.panel_count) * input.panel_wattage;
    let system_kw = system_watts / 1000.0;
    let ratio = performance_ratio(input.panel_efficiency, input.inverter_efficiency);
    let year1_kwh = input.sunshine_hours_year * system_kw * ratio;

    let retention = 1.0 - input.degradation_rate;
    let per_year_kwh: Vec<f64> = (0..input.years)
        .map(|year| year1_kwh * retention.powi(year as i32))
        .collect();
    let lifetime_kwh: f64 = per_year_kwh.iter().sum();

    ProductionEstimate {
        system_watts,
        system_kw,
        year1_kwh,
        lifetime_kwh,
        per_year_kwh,
    }
}
