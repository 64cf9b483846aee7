//! Argument parsing and logger setup shared by the `line-reader` and
//! `byte-dumper` binaries.

use clap::Args;
use serprobe_core::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_PORT};

#[derive(Debug, Clone, Args)]
pub struct PortArgs {
    /// Serial device path
    #[arg(short, long, default_value = DEFAULT_PORT)]
    pub port: String,

    /// Baud rate
    #[arg(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud: u32,
}

impl PortArgs {
    /// Applies the overrides on top of a preset; everything else stays 8N1.
    pub fn apply(&self, preset: SerialConfig) -> SerialConfig {
        preset.with_port(self.port.clone()).with_baud_rate(self.baud)
    }
}

/// Logs go to stderr; stdout carries only the data read from the port.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        port: PortArgs,
    }

    #[test]
    fn defaults_match_fixed_setup() {
        let cli = Cli::parse_from(["test"]);
        let cfg = cli.port.apply(SerialConfig::line_reader());
        assert_eq!(cfg, SerialConfig::line_reader());
    }

    #[test]
    fn overrides_port_and_baud() {
        let cli = Cli::parse_from(["test", "--port", "/dev/ttyAMA0", "-b", "115200"]);
        let cfg = cli.port.apply(SerialConfig::byte_dumper());
        assert_eq!(cfg.port_name, "/dev/ttyAMA0");
        assert_eq!(cfg.baud_rate, 115_200);
        assert_eq!(cfg.timeout, None);
    }
}
