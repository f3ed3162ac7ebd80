// terminal.rs

use nix::sys::termios::{self, LocalFlags, SetArg, Termios};
use nix::unistd::isatty;
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Attribute access a [`crate::mode::Mode`] needs from the host terminal.
///
/// `without_echo` and `raw` are pure: they derive new attributes from a
/// snapshot and never touch the device.
pub trait TerminalDevice {
    type Attributes: Clone;

    fn attributes(&self) -> io::Result<Self::Attributes>;
    fn set_attributes(&self, attrs: &Self::Attributes) -> io::Result<()>;
    fn without_echo(&self, attrs: &Self::Attributes) -> Self::Attributes;
    fn raw(&self, attrs: &Self::Attributes) -> Self::Attributes;
}

/// A termios-backed terminal on a file descriptor.
///
/// The descriptor is borrowed, not owned; it must stay open while the `Tty`
/// is in use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tty {
    fd: RawFd,
}

impl Default for Tty {
    fn default() -> Self {
        Self::stdin()
    }
}

impl Tty {
    pub fn stdin() -> Self {
        Self { fd: libc::STDIN_FILENO }
    }

    pub fn from_fd(fd: RawFd) -> Self {
        Self { fd }
    }

    pub fn of<F: AsRawFd>(source: &F) -> Self {
        Self::from_fd(source.as_raw_fd())
    }

    pub fn fd(&self) -> RawFd {
        self.fd
    }

    pub fn is_terminal(&self) -> bool {
        isatty(self.fd).unwrap_or(false)
    }
}

fn errno_to_io(err: nix::Error) -> io::Error {
    io::Error::from_raw_os_error(err as i32)
}

impl TerminalDevice for Tty {
    type Attributes = Termios;

    fn attributes(&self) -> io::Result<Termios> {
        termios::tcgetattr(self.fd).map_err(errno_to_io)
    }

    fn set_attributes(&self, attrs: &Termios) -> io::Result<()> {
        termios::tcsetattr(self.fd, SetArg::TCSANOW, attrs).map_err(errno_to_io)
    }

    fn without_echo(&self, attrs: &Termios) -> Termios {
        let mut quiet = attrs.clone();
        quiet.local_flags.remove(LocalFlags::ECHO | LocalFlags::ECHOE | LocalFlags::ECHOK | LocalFlags::ECHONL);
        quiet
    }

    fn raw(&self, attrs: &Termios) -> Termios {
        let mut raw = attrs.clone();
        termios::cfmakeraw(&mut raw);
        raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nix::unistd::{close, pipe};

    #[test]
    fn pipe_is_not_a_terminal() {
        let (r, w) = pipe().unwrap();
        let tty = Tty::from_fd(r);
        assert!(!tty.is_terminal());
        let err = tty.attributes().unwrap_err();
        assert_eq!(err.raw_os_error(), Some(libc::ENOTTY));
        close(r).unwrap();
        close(w).unwrap();
    }

    #[test]
    fn of_uses_the_source_descriptor() {
        let file = std::fs::File::open("/dev/null").unwrap();
        assert_eq!(Tty::of(&file).fd(), file.as_raw_fd());
    }
}
