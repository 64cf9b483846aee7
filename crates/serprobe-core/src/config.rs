use serialport::{DataBits, FlowControl, Parity, StopBits};
use std::time::Duration;

pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Rates the usual USB-serial adapters and flight controllers accept.
pub const STANDARD_BAUD_RATES: &[u32] = &[1200, 2400, 4800, 9600, 19200, 38400, 57600, 115200];

#[derive(Debug, Clone, PartialEq)]
pub struct SerialConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    /// `None` makes every read block until data arrives.
    pub timeout: Option<Duration>,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            timeout: None,
        }
    }
}

impl SerialConfig {
    /// 57600 8N1 with a one second read timeout.
    pub fn line_reader() -> Self {
        Self {
            timeout: Some(Duration::from_secs(1)),
            ..Default::default()
        }
    }

    /// 57600 8N1, reads block forever.
    pub fn byte_dumper() -> Self {
        Self::default()
    }

    pub fn with_port(mut self, port_name: impl Into<String>) -> Self {
        self.port_name = port_name.into();
        self
    }

    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn is_standard_baud_rate(&self) -> bool {
        STANDARD_BAUD_RATES.contains(&self.baud_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_reader_preset() {
        let cfg = SerialConfig::line_reader();
        assert_eq!(cfg.port_name, "/dev/ttyUSB0");
        assert_eq!(cfg.baud_rate, 57600);
        assert_eq!(cfg.data_bits, DataBits::Eight);
        assert_eq!(cfg.parity, Parity::None);
        assert_eq!(cfg.stop_bits, StopBits::One);
        assert_eq!(cfg.timeout, Some(Duration::from_secs(1)));
    }

    #[test]
    fn byte_dumper_preset_has_no_timeout() {
        let cfg = SerialConfig::byte_dumper();
        assert_eq!(cfg.baud_rate, 57600);
        assert_eq!(cfg.timeout, None);
    }

    #[test]
    fn builder_overrides() {
        let cfg = SerialConfig::line_reader()
            .with_port("/dev/ttyACM1")
            .with_baud_rate(115_200)
            .with_timeout(None);
        assert_eq!(cfg.port_name, "/dev/ttyACM1");
        assert_eq!(cfg.baud_rate, 115_200);
        assert_eq!(cfg.timeout, None);
        assert!(cfg.is_standard_baud_rate());
        assert!(!cfg.with_baud_rate(250_000).is_standard_baud_rate());
    }
}
