use clap::Parser;
use skirmish_client::config::ClientConfig;
use skirmish_client::runtime::run_match;

fn main() -> std::process::ExitCode {
    let config = ClientConfig::parse();
    match run_match(config) {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(report) => {
            eprintln!("{report:?}");
            std::process::ExitCode::FAILURE
        }
    }
}
