//! In-memory transport that replays a script of reads.

use crate::connection::Transport;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io::{self, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Step {
    /// Bytes handed out over as many reads as the caller's buffer needs.
    Data(Vec<u8>),
    Timeout,
    Eof,
    Fail(io::ErrorKind),
}

#[derive(Default)]
struct Shared {
    timeouts: Mutex<Vec<Duration>>,
    closed: AtomicBool,
}

#[derive(Clone)]
pub struct Handle(Arc<Shared>);

impl Handle {
    pub fn timeouts(&self) -> Vec<Duration> {
        self.0.timeouts.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.0.closed.load(Ordering::SeqCst)
    }
}

pub struct ScriptedTransport {
    steps: VecDeque<Step>,
    stall_when_done: bool,
    shared: Arc<Shared>,
}

impl ScriptedTransport {
    /// Fails with `BrokenPipe` once the script runs out.
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            stall_when_done: false,
            shared: Arc::default(),
        }
    }

    /// Times out forever once the script runs out, like an idle line.
    pub fn stalling(steps: Vec<Step>) -> Self {
        let mut transport = Self::new(steps);
        transport.stall_when_done = true;
        transport
    }

    pub fn handle(&self) -> Handle {
        Handle(self.shared.clone())
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(step) = self.steps.pop_front() else {
            if self.stall_when_done {
                std::thread::sleep(Duration::from_millis(5));
                return Err(io::ErrorKind::TimedOut.into());
            }
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "script exhausted"));
        };

        match step {
            Step::Data(mut data) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                if n < data.len() {
                    self.steps.push_front(Step::Data(data.split_off(n)));
                }
                Ok(n)
            }
            Step::Timeout => Err(io::ErrorKind::TimedOut.into()),
            Step::Eof => Ok(0),
            Step::Fail(kind) => Err(kind.into()),
        }
    }
}

impl Transport for ScriptedTransport {
    fn set_read_timeout(&mut self, timeout: Duration) -> io::Result<()> {
        self.shared.timeouts.lock().push(timeout);
        Ok(())
    }
}

impl Drop for ScriptedTransport {
    fn drop(&mut self) {
        self.shared.closed.store(true, Ordering::SeqCst);
    }
}
