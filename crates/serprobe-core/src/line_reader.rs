use crate::connection::{SerialConnection, Transport};
use crate::encoding::TextEncoding;
use crate::error::Result;
use serialport::SerialPort;
use std::convert::Infallible;
use std::io::{self, Write};

pub const LINE_TERMINATOR: u8 = b'\n';

/// Reads terminator-ended lines from a connection and prints them.
pub struct LineReader<T = Box<dyn SerialPort>> {
    connection: SerialConnection<T>,
    encoding: TextEncoding,
}

impl<T: Transport> LineReader<T> {
    pub fn new(connection: SerialConnection<T>) -> Self {
        Self {
            connection,
            encoding: TextEncoding::Raw,
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// One line including its terminator, or the partial bytes read before
    /// the timeout elapsed.
    pub fn read_line(&mut self) -> Result<Vec<u8>> {
        let line = self.connection.read_until(LINE_TERMINATOR)?;
        log::trace!("rx {}", hex::encode(&line));
        Ok(line)
    }

    /// Prints lines until the connection fails. Never returns `Ok`.
    pub fn run<W: Write>(&mut self, out: &mut W) -> Result<Infallible> {
        loop {
            let line = self.read_line()?;
            print_line(out, &line, self.encoding)?;
        }
    }
}

/// Writes the line followed by a newline, so a terminated line ends up
/// followed by an empty one and a timeout prints a blank line. With
/// [`TextEncoding::Raw`] the received bytes are written as they are.
pub fn print_line<W: Write>(out: &mut W, line: &[u8], encoding: TextEncoding) -> io::Result<()> {
    out.write_all(&encoding.render(line))?;
    out.write_all(b"\n")?;
    out.flush()
}
