//! Command-line entry point for npm-health

use npm_health::{Host, run};
use std::io::{Write, stderr, stdout};

/// Host backed by the real process streams
#[derive(Debug, Clone, Copy, Default)]
struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    // Pick up GITHUB_TOKEN and friends from a local .env before clap reads the environment
    let _ = dotenvy::dotenv();

    run(&mut RealHost, std::env::args()).await
}
