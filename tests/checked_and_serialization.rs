//! 검증 계층, 설정 파일, JSON 출력 테스트.
use solar_proposal_toolbox::config;
use solar_proposal_toolbox::projection::{
    extract_state_code, generate, generate_checked, Assumptions, LoanTerms, ProposalRequest,
    ProposalResult, ValidationError,
};

fn request(panels: u32, hours: f64) -> ProposalRequest {
    ProposalRequest {
        lead_id: "lead-7".into(),
        panel_count: panels,
        sunshine_hours_year: hours,
        state_code: Some("AZ".into()),
        custom_utility_rate: None,
    }
}

#[test]
fn checked_generation_accepts_valid_input() {
    let res = generate_checked(&Assumptions::default(), &request(20, 1900.0)).expect("valid");
    assert_eq!(res.lead_id, "lead-7");
    assert_eq!(res.production.per_year_kwh.len(), 25);
}

#[test]
fn checked_generation_rejects_degenerate_input() {
    let defaults = Assumptions::default();
    assert!(matches!(
        generate_checked(&defaults, &request(0, 1900.0)),
        Err(ValidationError::InvalidInput(_))
    ));
    assert!(generate_checked(&defaults, &request(20, 0.0)).is_err());
    assert!(generate_checked(&defaults, &request(20, f64::NAN)).is_err());

    let mut bad_rate = request(20, 1900.0);
    bad_rate.custom_utility_rate = Some(-0.1);
    assert!(generate_checked(&defaults, &bad_rate).is_err());

    let mut no_lead = request(20, 1900.0);
    no_lead.lead_id = "  ".into();
    assert!(generate_checked(&defaults, &no_lead).is_err());

    let zero_horizon = Assumptions {
        lifespan_years: 0,
        ..Assumptions::default()
    };
    assert!(generate_checked(&zero_horizon, &request(20, 1900.0)).is_err());
}

#[test]
fn checked_generation_rejects_broken_loan_terms() {
    let broken = [
        LoanTerms::new(0, 0.0),
        LoanTerms::new(0, 0.05),
        LoanTerms::new(400_000_000, 0.05),
        LoanTerms::new(10, -0.01),
        LoanTerms::new(10, f64::NAN),
        LoanTerms::new(10, f64::INFINITY),
    ];
    for terms in broken {
        let as_loan10 = Assumptions {
            loan10: terms,
            ..Assumptions::default()
        };
        let as_loan15 = Assumptions {
            loan15: terms,
            ..Assumptions::default()
        };
        assert!(
            generate_checked(&as_loan10, &request(20, 1900.0)).is_err(),
            "loan10 {terms:?}"
        );
        assert!(
            generate_checked(&as_loan15, &request(20, 1900.0)).is_err(),
            "loan15 {terms:?}"
        );
    }

    let long_horizon = Assumptions {
        lifespan_years: u32::MAX,
        ..Assumptions::default()
    };
    assert!(generate_checked(&long_horizon, &request(20, 1900.0)).is_err());

    let interest_free = Assumptions {
        loan10: LoanTerms::new(10, 0.0),
        ..Assumptions::default()
    };
    let res = generate_checked(&interest_free, &request(20, 1900.0)).expect("valid");
    assert!(res.scenarios.loan10.monthly_payment.is_finite());
    assert!(res.scenarios.loan10.net_savings_25yr.is_finite());
}

#[test]
fn unchecked_generation_survives_extreme_loan_terms() {
    let huge_term = Assumptions {
        loan15: LoanTerms::new(400_000_000, 0.05),
        ..Assumptions::default()
    };
    let res = solar_proposal_toolbox::projection::generate_with(&huge_term, &request(20, 1900.0));
    let loan = &res.scenarios.loan15;
    assert!(loan.monthly_payment.is_finite());
    assert!(loan.net_savings_25yr.is_finite());

    let zero_term = Assumptions {
        loan10: LoanTerms::new(0, 0.0),
        ..Assumptions::default()
    };
    let res = solar_proposal_toolbox::projection::generate_with(&zero_term, &request(20, 1900.0));
    assert_eq!(res.scenarios.loan10.monthly_payment, 0.0);
    assert!(res.scenarios.loan10.net_savings_25yr.is_finite());
}

#[test]
fn checked_generation_rejects_negative_net_price() {
    let generous = Assumptions {
        state_rebate: 50_000.0,
        ..Assumptions::default()
    };
    let err = generate_checked(&generous, &request(20, 1900.0)).unwrap_err();
    assert!(err.to_string().contains("인센티브"));
}

#[test]
fn result_serializes_with_scenario_tags() {
    let res = generate("lead-1", 20, 1600.0, Some("NY"), None);
    let json = serde_json::to_value(&res).expect("json");
    assert_eq!(json["lead_id"], "lead-1");
    assert_eq!(json["scenarios"]["recommended"], "cash");
    assert_eq!(json["assumptions"]["utility_rate_source"]["kind"], "state");
    assert_eq!(json["assumptions"]["utility_rate_source"]["code"], "NY");
    assert_eq!(json["assumptions"]["lifespan_years"], 25);
    assert_eq!(
        json["savings"]["cumulative_by_year"].as_array().map(Vec::len),
        Some(25)
    );

    for (field, tag) in [
        ("cash", "cash"),
        ("loan10", "loan"),
        ("loan15", "loan"),
        ("ppa", "ppa"),
    ] {
        assert_eq!(json["scenarios"][field]["type"], tag, "{field}");
    }
    assert_eq!(json["scenarios"]["loan15"]["term_years"], 15);

    let tagged = serde_json::to_value(res.scenarios.recommended_scenario()).expect("json");
    assert_eq!(tagged["type"], "cash");
    assert!(tagged["payback_years"].is_u64());
}

#[test]
fn stored_result_reads_back() {
    let res = generate("lead-2", 24, 1750.0, Some("CA"), None);
    let text = serde_json::to_string(&res).expect("json");
    let back: ProposalResult = serde_json::from_str(&text).expect("read back");
    assert_eq!(back.scenarios.recommended, res.scenarios.recommended);
    assert_eq!(back.scenarios.loan10.term_years, 10);
    assert_eq!(back.lead_id, "lead-2");
}

#[test]
fn mismatched_scenario_tag_is_rejected() {
    let res = generate("lead-3", 20, 1600.0, None, None);
    let mut json = serde_json::to_value(&res).expect("json");
    json["scenarios"]["cash"]["type"] = serde_json::Value::from("ppa");
    assert!(serde_json::from_value::<ProposalResult>(json).is_err());
}

#[test]
fn missing_break_even_serializes_as_null() {
    let short = Assumptions {
        lifespan_years: 2,
        ..Assumptions::default()
    };
    let res = solar_proposal_toolbox::projection::generate_with(&short, &request(20, 1600.0));
    let json = serde_json::to_value(&res).expect("json");
    assert!(json["savings"]["break_even_year"].is_null());
}

#[test]
fn partial_config_fills_defaults() {
    let cfg = config::parse(
        r#"
language = "ko"

[assumptions]
cost_per_watt = 3.1

[assumptions.loan10]
term_years = 12
apr = 0.055
"#,
    )
    .expect("config");
    assert_eq!(cfg.language, "ko");
    assert_eq!(cfg.assumptions.cost_per_watt, 3.1);
    assert_eq!(cfg.assumptions.itc_rate, 0.30);
    assert_eq!(cfg.assumptions.loan10.term_years, 12);
    assert_eq!(cfg.assumptions.loan15.term_years, 15);
    assert_eq!(cfg.assumptions.lifespan_years, 25);
}

#[test]
fn default_config_survives_toml_write() {
    let cfg = config::Config::default();
    let text = cfg.to_toml().expect("toml");
    assert_eq!(config::parse(&text).expect("parse"), cfg);
}

#[test]
fn address_heuristic_feeds_rate_lookup() {
    let code = extract_state_code("77 Massachusetts Ave, Cambridge, MA 02139");
    assert_eq!(code, Some("MA"));
    let res = generate("x", 20, 1300.0, code, None);
    assert_eq!(res.assumptions.utility_rate, 0.295);
}
