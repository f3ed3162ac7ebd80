// mode.rs

use crate::error::{Action, TerminalError};
use crate::terminal::{TerminalDevice, Tty};
use tracing::{trace, warn};

/// Runs work with temporary terminal settings.
///
/// Echo suppression is opt-out (`echo(false, ..)` changes the terminal) while
/// raw mode is opt-in (`raw(true, ..)` changes it). Whatever was changed is put
/// back when the work finishes, including when it panics.
#[derive(Debug, Default)]
pub struct Mode<D: TerminalDevice = Tty> {
    device: D,
}

impl<D: TerminalDevice> Mode<D> {
    pub fn new(device: D) -> Self {
        Self { device }
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn echo<F, R>(&self, enabled: bool, work: F) -> Result<R, TerminalError>
    where
        F: FnOnce() -> R,
    {
        if enabled {
            return Ok(work());
        }
        trace!("suppressing echo");
        self.scoped(|device, attrs| device.without_echo(attrs), work)
    }

    pub fn raw<F, R>(&self, enabled: bool, work: F) -> Result<R, TerminalError>
    where
        F: FnOnce() -> R,
    {
        if !enabled {
            return Ok(work());
        }
        trace!("entering raw mode");
        self.scoped(|device, attrs| device.raw(attrs), work)
    }

    /// If restoring fails after `work` returned, its result is dropped and the
    /// failure is reported instead.
    fn scoped<T, F, R>(&self, transform: T, work: F) -> Result<R, TerminalError>
    where
        T: FnOnce(&D, &D::Attributes) -> D::Attributes,
        F: FnOnce() -> R,
    {
        let saved = self
            .device
            .attributes()
            .map_err(|source| TerminalError::Attributes { action: Action::Read, source })?;
        let changed = transform(&self.device, &saved);
        self.device
            .set_attributes(&changed)
            .map_err(|source| TerminalError::Attributes { action: Action::Write, source })?;

        let guard = Restore { device: &self.device, saved: Some(saved) };
        let result = work();
        guard.release()?;
        Ok(result)
    }
}

struct Restore<'a, D: TerminalDevice> {
    device: &'a D,
    saved: Option<D::Attributes>,
}

impl<D: TerminalDevice> Restore<'_, D> {
    fn release(mut self) -> Result<(), TerminalError> {
        match self.saved.take() {
            Some(saved) => self
                .device
                .set_attributes(&saved)
                .map_err(|source| TerminalError::Attributes { action: Action::Restore, source }),
            None => Ok(()),
        }
    }
}

impl<D: TerminalDevice> Drop for Restore<'_, D> {
    fn drop(&mut self) {
        // Only reached without `release`, i.e. while unwinding.
        if let Some(saved) = self.saved.take() {
            if let Err(err) = self.device.set_attributes(&saved) {
                warn!(error = %err, "failed to restore terminal attributes");
            }
        }
    }
}
