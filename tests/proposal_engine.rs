//! 제안서 엔진 전체 흐름 회귀 테스트.
use solar_proposal_toolbox::projection::{
    generate, generate_with, Assumptions, LoanTerms, ProposalRequest, RateSource, ScenarioKind,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.9}, tol {tol})"
    );
}

fn request(panels: u32, hours: f64) -> ProposalRequest {
    ProposalRequest {
        lead_id: "lead-42".into(),
        panel_count: panels,
        sunshine_hours_year: hours,
        state_code: None,
        custom_utility_rate: None,
    }
}

#[test]
fn reference_example_values() {
    let res = generate("lead-42", 20, 1600.0, None, None);
    assert_close("watts", res.system.watts, 8000.0, 1e-9);
    assert_close("kw", res.system.kw, 8.0, 1e-12);
    assert_close("gross", res.costs.gross_cost, 20_000.0, 1e-6);
    assert_close("federal", res.costs.federal_credit, 6_000.0, 1e-6);
    assert_close("net", res.costs.net_price, 14_000.0, 1e-6);
    assert_close("eff $/W", res.costs.effective_cost_per_watt, 1.75, 1e-9);
    assert_close("ratio", res.assumptions.performance_ratio, 0.96, 1e-9);
    assert_close("year1 kWh", res.production.year1_kwh, 12_288.0, 1e-6);
    assert_close("year1 savings", res.savings.year1, 12_288.0 * 0.1762, 1e-6);
    assert_close("year1 savings literal", res.savings.year1, 2_165.1456, 1e-6);
    assert_eq!(res.assumptions.utility_rate_source, RateSource::National);
    assert_eq!(res.savings.break_even_year, Some(7));
    assert_eq!(res.scenarios.recommended, ScenarioKind::Cash);
    assert_eq!(res.scenarios.cash.payback_years, 7);
}

#[test]
fn same_inputs_same_numbers() {
    let a = generate("x", 24, 1450.0, Some("TX"), None);
    let b = generate("x", 24, 1450.0, Some("TX"), None);
    assert_eq!(a.system, b.system);
    assert_eq!(a.production, b.production);
    assert_eq!(a.costs, b.costs);
    assert_eq!(a.savings, b.savings);
    assert_eq!(a.scenarios, b.scenarios);
    assert_eq!(a.assumptions, b.assumptions);
}

#[test]
fn production_decays_and_sums_to_lifetime() {
    let res = generate("x", 30, 1800.0, None, None);
    let per_year = &res.production.per_year_kwh;
    assert_eq!(per_year.len(), 25);
    assert_eq!(per_year[0], res.production.year1_kwh);
    for pair in per_year.windows(2) {
        assert!(pair[1] <= pair[0]);
    }
    let total: f64 = per_year.iter().sum();
    assert_close("lifetime", res.production.lifetime_kwh, total, 1e-9);
    assert_close(
        "year 10",
        per_year[9],
        res.production.year1_kwh * 0.995_f64.powi(9),
        1e-9,
    );
}

#[test]
fn cumulative_savings_and_break_even_are_consistent() {
    for (panels, hours, state) in [(20, 1600.0, None), (12, 1100.0, Some("WA")), (40, 2100.0, Some("hi"))] {
        let res = generate("x", panels, hours, state, None);
        let cumulative = &res.savings.cumulative_by_year;
        assert_eq!(cumulative.len(), 25);
        for pair in cumulative.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        for pair in res.savings.utility_rate_by_year.windows(2) {
            assert!(pair[1] > pair[0]);
        }
        let net = res.costs.net_price;
        if let Some(n) = res.savings.break_even_year {
            let idx = n as usize - 1;
            assert!(cumulative[idx] >= net);
            if n > 1 {
                assert!(cumulative[idx - 1] < net);
            }
        } else {
            assert!(cumulative.iter().all(|c| *c < net));
        }
        assert_close("year5", res.savings.year5, cumulative[4], 0.0);
        assert_close("year10", res.savings.year10, cumulative[9], 0.0);
        assert_close("year25", res.savings.year25, cumulative[24], 0.0);
        assert_close(
            "net savings",
            res.savings.net_savings_25yr,
            cumulative[24] - net,
            1e-9,
        );
    }
}

#[test]
fn recommended_scenario_has_highest_net_savings() {
    for (panels, hours) in [(20, 1600.0), (8, 900.0), (50, 2400.0)] {
        let res = generate("x", panels, hours, Some("CA"), None);
        let set = &res.scenarios;
        let best = set.net_savings(set.recommended);
        for kind in ScenarioKind::EVALUATION_ORDER {
            assert!(best >= set.net_savings(kind));
        }
        assert_eq!(
            set.recommended_scenario().net_savings_25yr(),
            best
        );
    }
}

#[test]
fn expensive_system_favours_ppa() {
    let assumptions = Assumptions {
        cost_per_watt: 20.0,
        ..Assumptions::default()
    };
    let res = generate_with(&assumptions, &request(20, 1600.0));
    assert!(res.scenarios.cash.net_savings_25yr < 0.0);
    assert_eq!(res.scenarios.recommended, ScenarioKind::Ppa);
}

#[test]
fn cost_identity_holds_exactly() {
    let assumptions = Assumptions {
        state_rebate: 1_234.56,
        cost_per_watt: 2.87,
        ..Assumptions::default()
    };
    for panels in [1, 7, 19, 33] {
        let c = generate_with(&assumptions, &request(panels, 1500.0)).costs;
        assert_eq!(c.total_incentives, c.federal_credit + c.state_rebate);
        assert_eq!(c.net_price, c.gross_cost - c.total_incentives);
    }
}

#[test]
fn zero_apr_loan_has_no_interest() {
    let assumptions = Assumptions {
        loan10: LoanTerms::new(10, 0.0),
        ..Assumptions::default()
    };
    let res = generate_with(&assumptions, &request(20, 1600.0));
    let loan = &res.scenarios.loan10;
    assert_close("monthly", loan.monthly_payment, 14_000.0 / 120.0, 1e-9);
    assert_close("interest", loan.total_interest, 0.0, 1e-6);
    assert_close(
        "year1 cash flow",
        loan.year1_cash_flow,
        res.savings.year1 - 14_000.0 / 120.0 * 12.0,
        1e-9,
    );
}

#[test]
fn loan_net_savings_subtract_total_payments() {
    let res = generate("x", 20, 1600.0, None, None);
    for loan in [&res.scenarios.loan10, &res.scenarios.loan15] {
        assert!(loan.monthly_payment > 14_000.0 / f64::from(loan.term_years * 12));
        assert_close(
            "total",
            loan.total_cost,
            loan.monthly_payment * f64::from(loan.term_years * 12),
            1e-9,
        );
        assert_close(
            "net",
            loan.net_savings_25yr,
            res.savings.cumulative_by_year[24] - loan.total_cost,
            1e-9,
        );
    }
}

#[test]
fn loan_longer_than_horizon_counts_only_horizon_payments() {
    let assumptions = Assumptions {
        loan15: LoanTerms::new(30, 0.05),
        ..Assumptions::default()
    };
    let res = generate_with(&assumptions, &request(20, 1600.0));
    let loan = &res.scenarios.loan15;
    assert_close("total", loan.total_cost, loan.monthly_payment * 360.0, 1e-9);
    assert_close(
        "net",
        loan.net_savings_25yr,
        res.savings.cumulative_by_year[24] - loan.monthly_payment * 300.0,
        1e-9,
    );
}

#[test]
fn ppa_payments_escalate_yearly() {
    let res = generate("x", 20, 1600.0, None, None);
    let ppa = &res.scenarios.ppa;
    let production = &res.production.per_year_kwh;
    assert!(ppa.ownership_transfer);
    assert_close("year1", ppa.year1_payment, production[0] * 0.12, 1e-9);
    let mut expected = 0.0;
    let mut rate = 0.12;
    for kwh in production {
        expected += kwh * rate;
        rate *= 1.029;
    }
    assert_close("total", ppa.total_payments_25yr, expected, 1e-6);
    assert_close(
        "net",
        ppa.net_savings_25yr,
        res.savings.cumulative_by_year[24] - expected,
        1e-6,
    );
}

#[test]
fn cash_roi_matches_net_savings() {
    let res = generate("x", 20, 1600.0, None, None);
    let cash = &res.scenarios.cash;
    assert_eq!(cash.upfront_cost, res.costs.net_price);
    assert_close(
        "roi",
        cash.roi_25_year,
        cash.net_savings_25yr / res.costs.net_price * 100.0,
        1e-6,
    );
}

#[test]
fn utility_rate_resolution_order() {
    let custom = generate("x", 20, 1600.0, Some("CA"), Some(0.2));
    assert_eq!(custom.assumptions.utility_rate_source, RateSource::Custom);
    assert_close("custom", custom.assumptions.utility_rate, 0.2, 0.0);

    let state = generate("x", 20, 1600.0, Some("ca"), None);
    assert_eq!(
        state.assumptions.utility_rate_source,
        RateSource::State("CA".into())
    );
    assert_close("state", state.assumptions.utility_rate, 0.306, 0.0);

    let unknown = generate("x", 20, 1600.0, Some("ZZ"), None);
    assert_eq!(unknown.assumptions.utility_rate_source, RateSource::National);
    assert_close("national", unknown.assumptions.utility_rate, 0.1762, 0.0);
}

#[test]
fn short_horizon_never_breaks_even() {
    let assumptions = Assumptions {
        lifespan_years: 3,
        ..Assumptions::default()
    };
    let res = generate_with(&assumptions, &request(20, 1600.0));
    assert_eq!(res.production.per_year_kwh.len(), 3);
    assert_eq!(res.savings.cumulative_by_year.len(), 3);
    assert_eq!(res.savings.break_even_year, None);
    assert_eq!(res.scenarios.cash.payback_years, 0);
    assert_eq!(res.savings.year5, 0.0);
    assert_eq!(res.savings.year25, 0.0);
    assert_close(
        "net",
        res.savings.net_savings_25yr,
        res.savings.cumulative_by_year[2] - res.costs.net_price,
        1e-9,
    );
}

#[test]
fn longer_horizon_extends_every_sequence() {
    let assumptions = Assumptions {
        lifespan_years: 30,
        ..Assumptions::default()
    };
    let res = generate_with(&assumptions, &request(20, 1600.0));
    assert_eq!(res.production.per_year_kwh.len(), 30);
    assert_eq!(res.savings.utility_rate_by_year.len(), 30);
    assert_eq!(res.savings.year25, res.savings.cumulative_by_year[24]);
    assert_close(
        "net",
        res.savings.net_savings_25yr,
        res.savings.cumulative_by_year[29] - res.costs.net_price,
        1e-9,
    );
}

#[test]
fn degenerate_inputs_produce_numbers_not_panics() {
    let res = generate("", 0, 0.0, None, None);
    assert_eq!(res.system.watts, 0.0);
    assert_eq!(res.production.year1_kwh, 0.0);
    assert_eq!(res.savings.break_even_year, Some(1));

    let negative = generate("x", 10, -500.0, None, None);
    assert!(negative.production.year1_kwh < 0.0);
    assert_eq!(negative.savings.break_even_year, None);
}
