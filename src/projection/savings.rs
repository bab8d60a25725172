use serde::{Deserialize, Serialize};

/// 절감액 예측 입력.
#[derive(Debug, Clone)]
pub struct SavingsInput<'a> {
    /// 연도별 발전량 [kWh]
    pub production_kwh: &'a [f64],
    /// 첫해 전기요금 [$/kWh]
    pub start_rate: f64,
    /// 전기요금 연간 인상률
    pub escalation: f64,
    /// 순 시스템 가격 [$]
    pub net_price: f64,
}

/// 회피 전기요금 기준 절감액 예측.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsForecast {
    /// 첫해 절감액 [$]
    pub year1: f64,
    /// 5년 누적 절감액 [$]
    pub year5: f64,
    /// 10년 누적 절감액 [$]
    pub year10: f64,
    /// 25년 누적 절감액 [$]
    pub year25: f64,
    /// 연도별 누적 절감액 [$]
    pub cumulative_by_year: Vec<f64>,
    /// 연도별 전기요금 [$/kWh]
    pub utility_rate_by_year: Vec<f64>,
    /// 누적 절감액이 순 가격 이상이 되는 첫 해(1부터). 기간 내 도달하지 못하면 None.
    pub break_even_year: Option<u32>,
    /// 분석 기간 누적 절감액 - 순 가격 [$]
    pub net_savings_25yr: f64,
}

impl SavingsForecast {
    /// 분석 기간 마지막 해의 누적 절감액.
    pub fn horizon_cumulative(&self) -> f64 {
        self.cumulative_by_year.last().copied().unwrap_or(0.0)
    }
}

/// 1부터 시작하는 연차의 누적값을 꺼낸다. 기간이 짧으면 0.
fn snapshot(cumulative: &[f64], year: usize) -> f64 {
    cumulative.get(year - 1).copied().unwrap_or(0.0)
}

/// 연도별 발전량과 인상되는 전기요금으로 누적 절감액과 손익분기 연도를 구한다.
pub fn forecast_savings(input: SavingsInput<'_>) -> SavingsForecast {
    let growth = 1.0 + input.escalation;
    let utility_rate_by_year: Vec<f64> = (0..input.production_kwh.len())
        .map(|year| input.start_rate * growth.powi(year as i32))
        .collect();

    let mut cumulative_by_year = Vec::with_capacity(input.production_kwh.len());
    let mut running = 0.0;
    let mut year1 = 0.0;
    let mut break_even_year = None;
    for (year, (kwh, rate)) in input
        .production_kwh
        .iter()
        .zip(&utility_rate_by_year)
        .enumerate()
    {
        let saving = kwh * rate;
        if year == 0 {
            year1 = saving;
        }
        running += saving;
        cumulative_by_year.push(running);
        if break_even_year.is_none() && running >= input.net_price {
            break_even_year = Some(year as u32 + 1);
        }
    }

    let horizon_total = cumulative_by_year.last().copied().unwrap_or(0.0);
    SavingsForecast {
        year1,
        year5: snapshot(&cumulative_by_year, 5),
        year10: snapshot(&cumulative_by_year, 10),
        year25: snapshot(&cumulative_by_year, 25),
        net_savings_25yr: horizon_total - input.net_price,
        cumulative_by_year,
        utility_rate_by_year,
        break_even_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_past_end_is_zero() {
        assert_eq!(snapshot(&[1.0, 2.0], 5), 0.0);
        assert_eq!(snapshot(&[1.0, 2.0], 2), 2.0);
    }

    #[test]
    fn empty_production_never_breaks_even() {
        let forecast = forecast_savings(SavingsInput {
            production_kwh: &[],
            start_rate: 0.2,
            escalation: 0.03,
            net_price: 100.0,
        });
        assert!(forecast.break_even_year.is_none());
        assert_eq!(forecast.year1, 0.0);
        assert_eq!(forecast.net_savings_25yr, -100.0);
    }

    #[test]
    fn zero_net_price_breaks_even_in_first_year() {
        let forecast = forecast_savings(SavingsInput {
            production_kwh: &[1000.0, 990.0],
            start_rate: 0.2,
            escalation: 0.0,
            net_price: 0.0,
        });
        assert_eq!(forecast.break_even_year, Some(1));
    }
}
