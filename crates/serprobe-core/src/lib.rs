//! Serial port readers: a line printer and a fixed-count hex byte dumper.

pub mod byte_dumper;
pub mod config;
pub mod connection;
pub mod encoding;
pub mod error;
pub mod line_reader;
pub mod ports;

#[cfg(test)]
mod testing;

pub use config::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_PORT, STANDARD_BAUD_RATES};
pub use connection::{SerialConnection, Transport};
pub use encoding::TextEncoding;
pub use error::{Error, Result};
pub use line_reader::{LineReader, LINE_TERMINATOR};
pub use ports::{PortInfo, PortKind};
