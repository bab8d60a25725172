//! 태양광 제안서 재무 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 다른 서비스에서도 호출할 수 있게 한다.

pub mod app;
pub mod config;
pub mod i18n;
pub mod projection;
pub mod ui_cli;
