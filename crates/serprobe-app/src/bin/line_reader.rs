//! Prints every line received on a serial port, forever.

use anyhow::{Context, Result};
use clap::Parser;
use serprobe_app::{init_logging, PortArgs};
use serprobe_core::{LineReader, SerialConfig, SerialConnection, TextEncoding};

#[derive(Parser)]
#[command(name = "line-reader", version, about = "Print lines read from a serial port")]
struct Cli {
    #[command(flatten)]
    port: PortArgs,

    /// Output encoding: raw passes bytes through; auto, utf-8, utf-16, ascii,
    /// gbk and gb2312 decode to UTF-8 text
    #[arg(short, long, default_value = "raw")]
    encoding: TextEncoding,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = cli.port.apply(SerialConfig::line_reader());
    let connection = SerialConnection::open(&config)?;
    let mut reader = LineReader::new(connection).with_encoding(cli.encoding);

    let stdout = std::io::stdout();
    match reader.run(&mut stdout.lock()) {
        Ok(never) => match never {},
        Err(e) => Err(e).with_context(|| format!("reading lines from {}", config.port_name)),
    }
}
