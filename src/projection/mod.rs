//! 태양광 제안서 재무 예측 엔진.
//! 규모/비용 → 발전량 → 절감액 → 금융 시나리오 → 추천 순으로 한 방향으로만 계산한다.

pub mod address;
pub mod assumptions;
pub mod production;
pub mod proposal;
pub mod recommendation;
pub mod savings;
pub mod scenarios;
pub mod sizing;

pub use address::extract_state_code;
pub use assumptions::{Assumptions, LoanTerms, RateSource};
pub use proposal::{
    generate, generate_checked, generate_with, ProposalAssumptions, ProposalRequest,
    ProposalResult, ValidationError,
};
pub use recommendation::{ScenarioKind, ScenarioSet};
pub use scenarios::FinancingScenario;
