use serde::{Deserialize, Serialize};

/// 시스템 규모 산정 입력.
#[derive(Debug, Clone)]
pub struct SizingInput {
    /// 패널 수량
    pub panel_count: u32,
    /// 패널 1장 정격 출력 [W]
    pub panel_wattage: f64,
    /// 설치 단가 [$/W]
    pub cost_per_watt: f64,
    /// 연방 투자세액공제 비율(0~1)
    pub itc_rate: f64,
    /// 주 리베이트 [$]
    pub state_rebate: f64,
}

/// 어레이 규모.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemSize {
    pub watts: f64,
    pub kw: f64,
}

/// 인센티브 반영 후 가격.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// 총 설치비 [$]
    pub gross_cost: f64,
    /// 연방 세액공제 [$]
    pub federal_credit: f64,
    /// 주 리베이트 [$]
    pub state_rebate: f64,
    /// 인센티브 합계 [$]
    pub total_incentives: f64,
    /// 순 가격 [$]. 음수가 되어도 여기서는 막지 않는다.
    pub net_price: f64,
    /// 순 가격 기준 단가 [$/W]
    pub effective_cost_per_watt: f64,
}

/// 패널 수량으로 시스템 규모와 인센티브 반영 가격을 계산한다.
pub fn size_and_cost(input: SizingInput) -> (SystemSize, CostBreakdown) {
    let watts = f64::from(input.panel_count) * input.panel_wattage;
    let kw = watts / 1000.0;

    let gross_cost = watts * input.cost_per_watt;
    let federal_credit = gross_cost * input.itc_rate;
    let total_incentives = federal_credit + input.state_rebate;
    let net_price = gross_cost - total_incentives;
    // 과거 데이터와 비트 단위로 맞추려면 나눗셈 순서를 바꾸지 않는다.
    let effective_cost_per_watt = net_price / (gross_cost / input.cost_per_watt);

    (
        SystemSize { watts, kw },
        CostBreakdown {
            gross_cost,
            federal_credit,
            state_rebate: input.state_rebate,
            total_incentives,
            net_price,
            effective_cost_per_watt,
        },
    )
}
