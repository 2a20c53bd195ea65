#[cfg(test)]
pub mod test {
    use std::time::Duration;

    use crate::error::BoxError;
    use crate::record::{FieldSpec, Record, Slot};
    use crate::types::Kind;

    #[derive(Debug, Default, PartialEq)]
    pub struct ServerConfig {
        pub port: isize,
        pub host: String,
        pub timeout: Duration,
        pub debug: bool,
        /// Derived in `initialize` from host and port.
        pub addr: String,
    }

    impl Record for ServerConfig {
        fn fields(&self) -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("port")
                    .name("Port")
                    .default("8080")
                    .desc("Port to listen on"),
                FieldSpec::new("host").name("Host"),
                FieldSpec::new("timeout").name("Timeout").default("2s"),
                FieldSpec::new("debug").name("Debug"),
                FieldSpec::new("addr").skip(),
            ]
        }

        fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
            match field {
                "port" => Some((&mut self.port).into()),
                "host" => Some((&mut self.host).into()),
                "timeout" => Some((&mut self.timeout).into()),
                "debug" => Some((&mut self.debug).into()),
                _ => None,
            }
        }

        fn validate(&self) -> Result<(), BoxError> {
            if self.port < 1024 {
                return Err(format!("port {} is privileged", self.port).into());
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

    /// Shares the `Port` flag with [`ServerConfig`].
    #[derive(Debug, Default, PartialEq)]
    pub struct DbConfig {
        pub port: isize,
        pub url: String,
        pub pool_size: u64,
    }

    impl Record for DbConfig {
        fn fields(&self) -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("port").name("Port").default("5432"),
                FieldSpec::new("url").name("DbUrl").default("pg://localhost"),
                FieldSpec::new("pool_size").name("PoolSize").default("0x10"),
            ]
        }

        fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
            match field {
                "port" => Some((&mut self.port).into()),
                "url" => Some((&mut self.url).into()),
                "pool_size" => Some((&mut self.pool_size).into()),
                _ => None,
            }
        }

        fn record_name(&self) -> &'static str {
            "DbConfig"
        }
    }

    /// One field of every kind, flag names `S`, `I`, `I64`, `U`, `F`, `B`, `D`.
    /// Declares defaults only when `with_defaults` is set.
    #[derive(Debug, Default, PartialEq)]
    pub struct AllKinds {
        pub s: String,
        pub i: isize,
        pub i64: i64,
        pub u: u64,
        pub f: f64,
        pub b: bool,
        pub d: Duration,
        pub with_defaults: bool,
    }

    impl AllKinds {
        /// `(flag name, field, kind)` for each bound field.
        pub const BINDINGS: [(&'static str, &'static str, Kind); 7] = [
            ("S", "s", Kind::String),
            ("I", "i", Kind::Int),
            ("I64", "i64", Kind::Int64),
            ("U", "u", Kind::Uint64),
            ("F", "f", Kind::Float64),
            ("B", "b", Kind::Bool),
            ("D", "d", Kind::Duration),
        ];

        pub const DEFAULTS: [&'static str; 7] = ["dflt", "-2", "0o777", "7", "2.5", "true", "1h"];

        /// Distinct non-zero values, in the same order as `BINDINGS`.
        pub fn sample() -> Self {
            Self {
                s: "A".into(),
                i: 1,
                i64: 1,
                u: 1,
                f: 1.0,
                b: true,
                d: Duration::from_nanos(1),
                with_defaults: false,
            }
        }
    }

    impl Record for AllKinds {
        fn fields(&self) -> Vec<FieldSpec> {
            Self::BINDINGS
                .into_iter()
                .zip(Self::DEFAULTS)
                .map(|((name, field, _), default)| {
                    let spec = FieldSpec::new(field).name(name);
                    if self.with_defaults {
                        spec.default(default)
                    } else {
                        spec
                    }
                })
                .collect()
        }

        fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
            match field {
                "s" => Some((&mut self.s).into()),
                "i" => Some((&mut self.i).into()),
                "i64" => Some((&mut self.i64).into()),
                "u" => Some((&mut self.u).into()),
                "f" => Some((&mut self.f).into()),
                "b" => Some((&mut self.b).into()),
                "d" => Some((&mut self.d).into()),
                _ => None,
            }
        }

        fn record_name(&self) -> &'static str {
            "AllKinds"
        }
    }

    /// Has a field with no codec.
    #[derive(Debug, Default)]
    pub struct TaggedConfig {
        pub port: isize,
        pub tags: Vec<String>,
    }

    impl Record for TaggedConfig {
        fn fields(&self) -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("port").name("TagPort").default("1"),
                FieldSpec::new("tags").name("Tags"),
            ]
        }

        fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
            match field {
                "port" => Some((&mut self.port).into()),
                "tags" => Some(Slot::unsupported::<Vec<String>>()),
                _ => None,
            }
        }
    }

    /// Claims the `Port` flag name as a string.
    #[derive(Debug, Default)]
    pub struct ConflictingConfig {
        pub port: String,
    }

    impl Record for ConflictingConfig {
        fn fields(&self) -> Vec<FieldSpec> {
            vec![FieldSpec::new("port").name("Port")]
        }

        fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
            (field == "port").then(|| (&mut self.port).into())
        }
    }

    /// Declares `ghost` but hands out no slot for it.
    #[derive(Debug, Default)]
    pub struct GhostConfig {
        pub level: u64,
    }

    impl Record for GhostConfig {
        fn fields(&self) -> Vec<FieldSpec> {
            vec![
                FieldSpec::new("level").name("Level").default("3"),
                FieldSpec::new("ghost").name("Ghost"),
            ]
        }

        fn slot(&mut self, field: &str) -> Option<Slot<'_>> {
            (field == "level").then(|| (&mut self.level).into())
        }

        fn record_name(&self) -> &'static str {
            "GhostConfig"
        }
    }

    #[test]
    fn server_config_declares_skip_field() {
        let config = ServerConfig::default();
        let fields = config.fields();
        assert_eq!(fields.len(), 5);
        assert!(fields.iter().any(|f| f.field() == "addr" && f.is_skipped()));
    }

    #[test]
    fn all_kinds_defaults_follow_flag() {
        let plain = AllKinds::default();
        assert!(plain.fields().iter().all(|f| f.default_text().is_none()));
        let with = AllKinds {
            with_defaults: true,
            ..AllKinds::default()
        };
        assert!(with.fields().iter().all(|f| f.default_text().is_some()));
    }
}
