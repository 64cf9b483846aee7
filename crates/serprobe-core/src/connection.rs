use crate::config::SerialConfig;
use crate::error::{Error, Result};
use crate::ports;
use log::{debug, trace, warn};
use serialport::SerialPort;
use std::io::{self, Read};
use std::time::{Duration, Instant};

/// Per-read wait when no timeout is configured. Expiry is retried, so the
/// caller never observes it.
const IDLE_POLL: Duration = Duration::from_secs(1);

/// Byte source with a settable read timeout.
///
/// A read that waits longer than the timeout must fail with
/// [`io::ErrorKind::TimedOut`], which is what `serialport` does.
pub trait Transport: Read + Send {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()>;
}

impl Transport for Box<dyn SerialPort> {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.set_timeout(timeout).map_err(io::Error::from)
    }
}

pub struct SerialConnection<T = Box<dyn SerialPort>> {
    transport: T,
    config: SerialConfig,
}

impl SerialConnection {
    pub fn open(config: &SerialConfig) -> Result<Self> {
        if !config.is_standard_baud_rate() {
            warn!("{} baud is not a standard rate", config.baud_rate);
        }

        let port = serialport::new(&config.port_name, config.baud_rate)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(config.flow_control)
            .timeout(config.timeout.unwrap_or(IDLE_POLL))
            .open()
            .map_err(|source| {
                if is_missing_device(&source) {
                    log_available_ports(&config.port_name);
                }
                Error::Open {
                    port: config.port_name.clone(),
                    source,
                }
            })?;

        debug!(
            "opened {} at {} baud, timeout {:?}",
            config.port_name, config.baud_rate, config.timeout
        );
        Ok(Self::from_transport(config.clone(), port))
    }
}

impl<T: Transport> SerialConnection<T> {
    pub fn from_transport(config: SerialConfig, transport: T) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &SerialConfig {
        &self.config
    }

    /// Reads a single byte. `Ok(None)` means the configured timeout elapsed;
    /// without a timeout this waits until a byte arrives.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        let deadline = self.deadline();
        let mut buf = [0u8; 1];
        match self.read_before(&mut buf, deadline)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }

    /// Reads up to and including `terminator`. If the configured timeout
    /// elapses first, whatever was read so far is returned, possibly nothing.
    pub fn read_until(&mut self, terminator: u8) -> Result<Vec<u8>> {
        let deadline = self.deadline();
        let mut line = Vec::new();
        let mut buf = [0u8; 1];
        loop {
            if self.read_before(&mut buf, deadline)? == 0 {
                trace!("timed out with {} bytes pending", line.len());
                break;
            }
            line.push(buf[0]);
            if buf[0] == terminator {
                break;
            }
        }
        Ok(line)
    }

    pub fn close(self) {
        debug!("closing {}", self.config.port_name);
    }

    fn deadline(&self) -> Option<Instant> {
        self.config.timeout.map(|timeout| Instant::now() + timeout)
    }

    /// Returns 0 once `deadline` has passed or the device reports end of input.
    fn read_before(&mut self, buf: &mut [u8], deadline: Option<Instant>) -> Result<usize> {
        loop {
            let wait = match deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_duration_since(Instant::now());
                    if remaining.is_zero() {
                        return Ok(0);
                    }
                    remaining
                }
                None => IDLE_POLL,
            };
            self.transport.set_read_timeout(wait)?;

            match self.transport.read(buf) {
                Ok(0) if deadline.is_none() => {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "device closed").into());
                }
                Ok(n) => return Ok(n),
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    if deadline.is_some() {
                        return Ok(0);
                    }
                    trace!("no data on {}, still waiting", self.config.port_name);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
    }
}

fn is_missing_device(err: &serialport::Error) -> bool {
    matches!(
        err.kind(),
        serialport::ErrorKind::NoDevice | serialport::ErrorKind::Io(io::ErrorKind::NotFound)
    )
}

fn log_available_ports(wanted: &str) {
    let available = ports::list_ports();
    if available.is_empty() {
        warn!("{wanted} not found and no serial ports are present");
        return;
    }
    warn!("{wanted} not found, available ports:");
    for port in &available {
        warn!("  {port}");
    }
}
