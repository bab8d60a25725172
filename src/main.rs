use std::process::ExitCode;

use clap::Parser;
use solar_proposal_toolbox::app::{self, Cli};
use solar_proposal_toolbox::i18n::{self, keys, Translator};

/// 프로그램의 엔트리 포인트. 인자를 해석한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    let lang = i18n::resolve_language(&cli.lang, None);
    match app::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let tr = Translator::new(&lang);
            eprintln!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            ExitCode::FAILURE
        }
    }
}
