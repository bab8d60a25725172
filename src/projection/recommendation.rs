use serde::{Deserialize, Serialize};

use super::scenarios::{CashScenario, FinancingScenario, LoanScenario, PpaScenario};

/// 추천 대상이 되는 시나리오 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    Cash,
    Loan10,
    Loan15,
    Ppa,
}

impl ScenarioKind {
    /// 비교 순서. 순절감액이 같으면 앞쪽이 이긴다.
    pub const EVALUATION_ORDER: [ScenarioKind; 4] = [
        ScenarioKind::Cash,
        ScenarioKind::Loan10,
        ScenarioKind::Loan15,
        ScenarioKind::Ppa,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScenarioKind::Cash => "cash",
            ScenarioKind::Loan10 => "loan10",
            ScenarioKind::Loan15 => "loan15",
            ScenarioKind::Ppa => "ppa",
        }
    }
}

/// 네 가지 시나리오와 추천 결과.
///
/// 직렬화할 때는 각 시나리오를 `type` 태그가 붙은 `FinancingScenario`로 저장한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "StoredScenarioSet", try_from = "StoredScenarioSet")]
pub struct ScenarioSet {
    pub cash: CashScenario,
    pub loan10: LoanScenario,
    pub loan15: LoanScenario,
    pub ppa: PpaScenario,
    pub recommended: ScenarioKind,
}

impl ScenarioSet {
    /// 시나리오 네 개로 세트를 만들고 추천을 고른다.
    pub fn new(
        cash: CashScenario,
        loan10: LoanScenario,
        loan15: LoanScenario,
        ppa: PpaScenario,
    ) -> Self {
        let recommended = select_best(|kind| match kind {
            ScenarioKind::Cash => cash.net_savings_25yr,
            ScenarioKind::Loan10 => loan10.net_savings_25yr,
            ScenarioKind::Loan15 => loan15.net_savings_25yr,
            ScenarioKind::Ppa => ppa.net_savings_25yr,
        });
        Self {
            cash,
            loan10,
            loan15,
            ppa,
            recommended,
        }
    }

    /// 종류에 해당하는 시나리오를 태그가 붙은 형태로 돌려준다.
    pub fn get(&self, kind: ScenarioKind) -> FinancingScenario {
        match kind {
            ScenarioKind::Cash => FinancingScenario::Cash(self.cash.clone()),
            ScenarioKind::Loan10 => FinancingScenario::Loan(self.loan10.clone()),
            ScenarioKind::Loan15 => FinancingScenario::Loan(self.loan15.clone()),
            ScenarioKind::Ppa => FinancingScenario::Ppa(self.ppa.clone()),
        }
    }

    pub fn net_savings(&self, kind: ScenarioKind) -> f64 {
        match kind {
            ScenarioKind::Cash => self.cash.net_savings_25yr,
            ScenarioKind::Loan10 => self.loan10.net_savings_25yr,
            ScenarioKind::Loan15 => self.loan15.net_savings_25yr,
            ScenarioKind::Ppa => self.ppa.net_savings_25yr,
        }
    }

    pub fn recommended_scenario(&self) -> FinancingScenario {
        self.get(self.recommended)
    }
}

/// `ScenarioSet`의 저장 형태.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredScenarioSet {
    pub cash: FinancingScenario,
    pub loan10: FinancingScenario,
    pub loan15: FinancingScenario,
    pub ppa: FinancingScenario,
    pub recommended: ScenarioKind,
}

impl From<ScenarioSet> for StoredScenarioSet {
    fn from(set: ScenarioSet) -> Self {
        Self {
            cash: FinancingScenario::Cash(set.cash),
            loan10: FinancingScenario::Loan(set.loan10),
            loan15: FinancingScenario::Loan(set.loan15),
            ppa: FinancingScenario::Ppa(set.ppa),
            recommended: set.recommended,
        }
    }
}

/// 저장된 시나리오의 `type` 태그가 필드와 맞지 않을 때의 오류.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioTagError(&'static str);

impl std::fmt::Display for ScenarioTagError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} 시나리오의 type 태그가 올바르지 않습니다.", self.0)
    }
}

impl std::error::Error for ScenarioTagError {}

impl TryFrom<StoredScenarioSet> for ScenarioSet {
    type Error = ScenarioTagError;

    fn try_from(stored: StoredScenarioSet) -> Result<Self, Self::Error> {
        let FinancingScenario::Cash(cash) = stored.cash else {
            return Err(ScenarioTagError("cash"));
        };
        let FinancingScenario::Loan(loan10) = stored.loan10 else {
            return Err(ScenarioTagError("loan10"));
        };
        let FinancingScenario::Loan(loan15) = stored.loan15 else {
            return Err(ScenarioTagError("loan15"));
        };
        let FinancingScenario::Ppa(ppa) = stored.ppa else {
            return Err(ScenarioTagError("ppa"));
        };
        // 저장된 추천값을 그대로 복원한다
        Ok(Self {
            cash,
            loan10,
            loan15,
            ppa,
            recommended: stored.recommended,
        })
    }
}

/// 고정된 비교 순서로 순절감액 최댓값을 찾는다. 동률이면 먼저 본 쪽을 유지한다.
pub fn select_best<F>(net_savings: F) -> ScenarioKind
where
    F: Fn(ScenarioKind) -> f64,
{
    let mut best = ScenarioKind::EVALUATION_ORDER[0];
    let mut best_value = net_savings(best);
    for kind in &ScenarioKind::EVALUATION_ORDER[1..] {
        let value = net_savings(*kind);
        if value > best_value {
            best = *kind;
            best_value = value;
        }
    }
    best
}
