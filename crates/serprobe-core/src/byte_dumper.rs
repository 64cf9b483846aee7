use crate::connection::{SerialConnection, Transport};
use crate::error::Result;
use std::io::{self, Write};

pub const BYTE_COUNT: usize = 32;

/// Lowercase hex with a `0x` prefix and no padding: `0x0`, `0xa`, `0xff`.
pub fn format_byte(byte: u8) -> String {
    format!("{byte:#x}")
}

/// Reads exactly `count` bytes one at a time, printing each as it arrives.
pub fn dump<T: Transport, W: Write>(
    connection: &mut SerialConnection<T>,
    out: &mut W,
    count: usize,
) -> Result<()> {
    for _ in 0..count {
        let byte = connection
            .read_byte()?
            .ok_or_else(|| io::Error::new(io::ErrorKind::TimedOut, "no byte before timeout"))?;
        writeln!(out, "{}", format_byte(byte))?;
        out.flush()?;
    }
    Ok(())
}

/// Dumps [`BYTE_COUNT`] bytes and closes the connection. On error the
/// connection is dropped without an explicit close.
pub fn run<T: Transport, W: Write>(mut connection: SerialConnection<T>, out: &mut W) -> Result<()> {
    dump(&mut connection, out, BYTE_COUNT)?;
    log::debug!("read {BYTE_COUNT} bytes from {}", connection.config().port_name);
    connection.close();
    Ok(())
}
