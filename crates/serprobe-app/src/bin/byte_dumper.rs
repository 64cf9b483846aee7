//! Prints the first 32 bytes received on a serial port as hex, then exits.

use anyhow::{Context, Result};
use clap::Parser;
use serprobe_app::{init_logging, PortArgs};
use serprobe_core::{byte_dumper, SerialConfig, SerialConnection};

#[derive(Parser)]
#[command(name = "byte-dumper", version, about = "Dump 32 bytes from a serial port as hex")]
struct Cli {
    #[command(flatten)]
    port: PortArgs,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = cli.port.apply(SerialConfig::byte_dumper());
    let connection = SerialConnection::open(&config)?;

    let stdout = std::io::stdout();
    byte_dumper::run(connection, &mut stdout.lock())
        .with_context(|| format!("dumping bytes from {}", config.port_name))
}
