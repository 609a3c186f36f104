// src/main.rs

use quiesce::{cli, logging, run};
use tracing::error;

#[tokio::main]
async fn main() {
    let args = match cli::parse() {
        Ok(args) => args,
        Err(err) => {
            let code = cli::usage_exit_code(&err);
            if let Err(print_err) = err.print() {
                eprintln!("quiesce: {print_err}");
            }
            std::process::exit(code);
        }
    };

    if args.mode.is_none() {
        cli::print_usage();
        std::process::exit(1);
    }

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("quiesce: {err:#}");
    }

    if let Err(err) = run(args).await {
        error!("{err}");
        std::process::exit(err.exit_code());
    }
}
