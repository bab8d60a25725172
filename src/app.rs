use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use log::info;

use crate::config::{self, Config, DEFAULT_CONFIG_PATH};
use crate::i18n::{self, Translator};
use crate::projection::{self, ProposalRequest, ProposalResult};
use crate::ui_cli::{self, MenuChoice};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(config::ConfigError),
    /// 입력 검증 오류
    Validation(projection::ValidationError),
    /// JSON 직렬화 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Validation(e) => write!(f, "제안서 계산 오류: {e}"),
            AppError::Json(e) => write!(f, "JSON 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<projection::ValidationError> for AppError {
    fn from(value: projection::ValidationError) -> Self {
        AppError::Validation(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// 명령행 인자.
#[derive(Debug, Parser)]
#[command(name = "solar_proposal_cli", version, about = "Residential solar proposal calculator")]
pub struct Cli {
    /// 언어 코드 (auto/ko/en-us)
    #[arg(long, short = 'L', default_value = "auto", global = true)]
    pub lang: String,
    /// 설정 파일 경로
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 제안서를 한 번 계산하고 출력한다.
    Generate(GenerateArgs),
    /// 주별 전기요금표를 출력한다.
    States,
    /// 현재 적용되는 가정값을 TOML로 출력한다.
    Assumptions,
}

#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    #[arg(long)]
    pub lead_id: String,
    /// 패널 수량
    #[arg(long)]
    pub panels: u32,
    /// 연간 일사시간 [h]
    #[arg(long)]
    pub sunshine_hours: f64,
    /// 두 글자 주 코드
    #[arg(long, conflicts_with = "address")]
    pub state: Option<String>,
    /// 주 코드를 추정할 주소
    #[arg(long)]
    pub address: Option<String>,
    /// 전기요금 직접 지정 [$/kWh]
    #[arg(long)]
    pub rate: Option<f64>,
    /// JSON으로 출력
    #[arg(long)]
    pub json: bool,
    /// 입력 전제조건을 검증한다
    #[arg(long)]
    pub strict: bool,
}

impl GenerateArgs {
    /// 주 코드가 없으면 주소에서 추정해 요청을 만든다.
    pub fn to_request(&self) -> ProposalRequest {
        let state_code = self.state.clone().or_else(|| {
            self.address
                .as_deref()
                .and_then(projection::extract_state_code)
                .map(str::to_string)
        });
        ProposalRequest {
            lead_id: self.lead_id.clone(),
            panel_count: self.panels,
            sunshine_hours_year: self.sunshine_hours,
            state_code,
            custom_utility_rate: self.rate,
        }
    }
}

/// 설정의 가정값으로 제안서를 계산한다. `strict`면 검증 계층을 거친다.
pub fn compute(
    config: &Config,
    request: &ProposalRequest,
    strict: bool,
) -> Result<ProposalResult, AppError> {
    if strict {
        Ok(projection::generate_checked(&config.assumptions, request)?)
    } else {
        Ok(projection::generate_with(&config.assumptions, request))
    }
}

fn translator_for(cli_lang: &str, config: &Config) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.locale_dir.as_deref())
}

/// 인자에 따라 단발 명령 또는 대화형 메뉴를 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = config::load_or_default(&cli.config)?;
    let tr = translator_for(&cli.lang, &config);
    match cli.command {
        Some(Command::Generate(args)) => {
            let request = args.to_request();
            info!(
                "generating proposal for lead {} ({} panels)",
                request.lead_id, request.panel_count
            );
            let result = compute(&config, &request, args.strict)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                ui_cli::print_proposal(&tr, &result);
            }
        }
        Some(Command::States) => ui_cli::print_state_rates(&tr),
        Some(Command::Assumptions) => ui_cli::print_assumptions(&tr, &config)?,
        None => run_interactive(&mut config, &cli.config, tr)?,
    }
    Ok(())
}

/// 대화형 메인 루프를 실행한다.
fn run_interactive(
    config: &mut Config,
    config_path: &Path,
    mut tr: Translator,
) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&tr)? {
            MenuChoice::Generate => ui_cli::handle_generate(&tr, config)?,
            MenuChoice::StateRates => ui_cli::print_state_rates(&tr),
            MenuChoice::Assumptions => ui_cli::print_assumptions(&tr, config)?,
            MenuChoice::Settings => {
                if ui_cli::handle_settings(&tr, config)? {
                    config.save(config_path)?;
                    tr = translator_for("auto", config);
                }
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
