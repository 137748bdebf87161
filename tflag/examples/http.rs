//! Binds an HTTP server configuration to `--http.*` flags.
//!
//! ```text
//! cargo run -p tflag --example http -- --http.timeout=5s --http.origins a --http.origins b
//! ```
#![expect(
    clippy::print_stdout,
    reason = "the example reports the resolved configuration"
)]

use std::time::Duration;

use tflag::{FlagError, Flags};

#[derive(Debug, Flags)]
struct Http {
    #[tflag(flag = "addr", usage = "listen address", default = "127.0.0.1:2233")]
    addr: String,
    #[tflag(flag = "timeout", usage = "http timeout", default = "1s")]
    timeout: Duration,
    #[tflag(usage = "allowed CORS origins")]
    origins: Vec<String>,
}

fn load(cfg: &mut Http) -> Result<(), FlagError> {
    let (mut flags, mut parse) = tflag::var("http", cfg)?;
    flags.parse()?;
    // Sequence fields are only filled once the command line is parsed.
    parse.call()
}

fn main() -> Result<(), FlagError> {
    let mut cfg = Http {
        addr: String::new(),
        timeout: Duration::ZERO,
        origins: Vec::new(),
    };
    if let Err(err) = load(&mut cfg) {
        if let FlagError::Cli(cli) = &err
            && err.is_display_request()
        {
            cli.exit();
        }
        return Err(err);
    }
    println!("listening on {} (timeout {})", cfg.addr, tflag::format_duration(cfg.timeout));
    for origin in &cfg.origins {
        println!("allowing origin {origin}");
    }
    Ok(())
}
