pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
pub mod cli {
    use crate::core::{ConfigProvider, DEFAULT_REGISTRATION_BASE};
    use clap::{Parser, Subcommand};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize, Parser)]
    #[command(name = "oiddir")]
    #[command(about = "Convert between dotNotation OIDs and registration DNs")]
    pub struct CliConfig {
        /// Path to a TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Registration base DN (overrides the config file)
        #[arg(long, global = true)]
        pub base: Option<String>,

        /// Report rejected input as an error instead of printing an empty value
        #[arg(long, global = true)]
        pub strict: bool,

        /// Print JSON lines instead of `dn:` / `oid:` lines
        #[arg(long, global = true)]
        pub json: bool,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Serialize, Deserialize, Subcommand)]
    pub enum Command {
        /// dotNotation -> DN (values read from stdin when none are given)
        Oid2dn { dots: Vec<String> },
        /// DN -> dotNotation (values read from stdin when none are given)
        Dn2oid { dns: Vec<String> },
        /// Convert 1.3.6.1.4.1.56521 both ways
        Demo,
    }

    impl ConfigProvider for CliConfig {
        fn registration_base(&self) -> &str {
            self.base.as_deref().unwrap_or(DEFAULT_REGISTRATION_BASE)
        }
    }

}
