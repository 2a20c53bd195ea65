//! # flagbind demo application
//!
//! A sample server launcher that binds two config records to flags and
//! environment variables. It does not serve anything; it prints what it
//! resolved.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example server_demo
//! cargo run --example server_demo -- -Port=9090 -Timeout=500ms
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature | How to exercise it |
//! |---------|--------------------|
//! | Declared defaults | `cargo run --example server_demo` |
//! | Flag override | `cargo run --example server_demo -- -Port=9090` |
//! | Env fallback | `Port=8000 cargo run --example server_demo` |
//! | Env prefix | `DEMO_PREFIX=APP_ APP_Port=8100 cargo run --example server_demo` |
//! | Shared flag | `cargo run --example server_demo -- -Verbose` |
//! | Validation | `cargo run --example server_demo -- -Port=80` |
//! | Help | `cargo run --example server_demo -- --help` |
//! | JSON report | `cargo run --example server_demo -- json` |
//! | Debug logs | `RUST_LOG=flagbind=debug cargo run --example server_demo` |

mod config;

use flagbind::{Flagbind, FlagbindError};
use tracing_subscriber::EnvFilter;

use config::{DisplayConfig, ServerConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut server = ServerConfig::default();
    let mut display = DisplayConfig::default();

    let mut builder = Flagbind::builder().app_name("server-demo");
    if let Ok(prefix) = std::env::var("DEMO_PREFIX") {
        builder = builder.env_prefix(&prefix);
    }

    let report = match builder.load(&mut [&mut server, &mut display]) {
        Ok(report) => report,
        Err(FlagbindError::CommandLine(err)) => err.exit(),
        Err(err) => {
            eprintln!("Failed to load config:\n{err}");
            std::process::exit(1);
        }
    };

    if report.args().first().map(String::as_str) == Some("json") {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        }
        return;
    }

    if display.verbose {
        println!("[verbose] resolved configuration:");
        println!("{report}");
        println!();
    }
    println!(
        "listening on {} (timeout {:?}, max {} connections, color {}, ratio {})",
        server.addr, server.timeout, server.max_connections, display.color, display.ratio
    );
}
