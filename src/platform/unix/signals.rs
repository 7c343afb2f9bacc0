//! Unix signal operations

use crate::error::{Error, Result};
use crate::platform::traits::SignalOps;
use nix::sys::signal::{kill, Signal as NixSignal};
use nix::unistd::Pid;

pub struct UnixSignals;

impl UnixSignals {
    pub fn new() -> Self {
        Self
    }
}

impl SignalOps for UnixSignals {
    fn send_signal(&self, pid: i32, signal: i32) -> Result<()> {
        let signal = NixSignal::try_from(signal).map_err(|e| Error::SignalSendFailed {
            signal: signal.to_string(),
            reason: e.to_string(),
        })?;

        kill(Pid::from_raw(pid), signal).map_err(Error::Nix)
    }

    fn is_process_running(&self, pid: i32) -> bool {
        // Signal 0 performs the permission and existence checks only
        kill(Pid::from_raw(pid), None::<NixSignal>).is_ok()
    }
}
