mod cli;
mod workflow;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    webp_batch_converter::init_logging();

    // コマンドライン引数を解析します
    let args = cli::Args::parse();

    match workflow::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("エラー: {}", e);
            ExitCode::FAILURE
        }
    }
}
