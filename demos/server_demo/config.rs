//! Configuration records for the flagbind demo application.
//!
//! Two records share the `Verbose` flag to show how one external name can
//! drive fields in several records.
//!
//! | Flag / env var | Field |
//! |----------------|-------|
//! | `Host` | `ServerConfig::host` |
//! | `Port` | `ServerConfig::port` |
//! | `Timeout` | `ServerConfig::timeout` |
//! | `MaxConnections` | `ServerConfig::max_connections` |
//! | `Verbose` | `ServerConfig::verbose`, `DisplayConfig::verbose` |
//! | `Ratio` | `DisplayConfig::ratio` |
//! | `Color` | `DisplayConfig::color` |

use std::time::Duration;

use flagbind::{BoxError, FieldSpec, Record, Slot};

#[derive(Debug, Default)]
pub struct ServerConfig {
    pub host: String,
    pub port: isize,
    pub timeout: Duration,
    pub max_connections: u64,
    pub verbose: bool,
    /// `host:port`, derived after loading.
    pub addr: String,
}

impl Record for ServerConfig {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("host")
                .name("Host")
                .default("127.0.0.1")
                .desc("Hostname to bind to"),
            FieldSpec::new("port")
                .name("Port")
                .default("3000")
                .desc("Port number (must be unprivileged)"),
            FieldSpec::new("timeout")
                .name("Timeout")
                .default("30s")
                .desc("Upstream request timeout"),
            FieldSpec::new("max_connections")
                .name("MaxConnections")
                .default("100")
                .desc("Maximum number of allowed connections"),
            FieldSpec::new("verbose").name("Verbose").desc("Enable verbose output"),
            FieldSpec::new("addr").skip(),
        ]
    }

    fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
        match field {
            "host" => Some((&mut self.host).into()),
            "port" => Some((&mut self.port).into()),
            "timeout" => Some((&mut self.timeout).into()),
            "max_connections" => Some((&mut self.max_connections).into()),
            "verbose" => Some((&mut self.verbose).into()),
            _ => None,
        }
    }

    fn validate(&self) -> Result<(), BoxError> {
        if self.port < 1024 {
            return Err(format!("port {} is privileged, use 1024 or above", self.port).into());
        }
        Ok(())
    }

    fn initialize(&mut self) {
        self.addr = format!("{}:{}", self.host, self.port);
    }

    fn record_name(&self) -> &'static str {
        "ServerConfig"
    }
}

#[derive(Debug, Default)]
pub struct DisplayConfig {
    pub color: String,
    pub ratio: f64,
    pub verbose: bool,
}

impl Record for DisplayConfig {
    fn fields(&self) -> Vec<FieldSpec> {
        vec![
            FieldSpec::new("color")
                .name("Color")
                .default("yellow")
                .desc("Terminal color for output"),
            FieldSpec::new("ratio").name("Ratio").default("0.75"),
            FieldSpec::new("verbose").name("Verbose"),
        ]
    }

    fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
        match field {
            "color" => Some((&mut self.color).into()),
            "ratio" => Some((&mut self.ratio).into()),
            "verbose" => Some((&mut self.verbose).into()),
            _ => None,
        }
    }

    fn record_name(&self) -> &'static str {
        "DisplayConfig"
    }
}
