use prompt_reader::{Action, Mode, TerminalDevice, Tty};
use std::cell::RefCell;
use std::io;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Flags {
    echo: bool,
    raw: bool,
}

#[derive(Default)]
struct Recorder {
    log: RefCell<Vec<String>>,
    state: RefCell<Option<Flags>>,
}

impl Recorder {
    fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }
}

impl TerminalDevice for Recorder {
    type Attributes = Flags;

    fn attributes(&self) -> io::Result<Flags> {
        Ok(self.state.borrow().clone().unwrap_or(Flags { echo: true, raw: false }))
    }

    fn set_attributes(&self, attrs: &Flags) -> io::Result<()> {
        self.log.borrow_mut().push(format!("echo={} raw={}", attrs.echo, attrs.raw));
        *self.state.borrow_mut() = Some(attrs.clone());
        Ok(())
    }

    fn without_echo(&self, attrs: &Flags) -> Flags {
        Flags { echo: false, raw: attrs.raw }
    }

    fn raw(&self, _attrs: &Flags) -> Flags {
        Flags { echo: false, raw: true }
    }
}

#[test]
fn echo_off_wraps_work() {
    let mode = Mode::new(Recorder::default());
    let out = mode
        .echo(false, || {
            mode.device().log.borrow_mut().push("work".into());
            "secret".to_string()
        })
        .unwrap();
    assert_eq!(out, "secret");
    assert_eq!(mode.device().log(), ["echo=false raw=false", "work", "echo=true raw=false"]);
}

#[test]
fn raw_on_wraps_work_and_passes_result() {
    let mode = Mode::new(Recorder::default());
    let out = mode.raw(true, || vec![1u8, 2, 3]).unwrap();
    assert_eq!(out, [1, 2, 3]);
    assert_eq!(mode.device().log(), ["echo=false raw=true", "echo=true raw=false"]);
}

#[test]
fn pass_through_branches_do_not_touch_terminal() {
    let mode = Mode::new(Recorder::default());
    assert_eq!(mode.echo(true, || 1).unwrap(), 1);
    assert_eq!(mode.raw(false, || 2).unwrap(), 2);
    assert!(mode.device().log().is_empty());
}

#[test]
fn restores_after_panicking_work() {
    let mode = Mode::new(Recorder::default());
    let caught = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _ = mode.echo(false, || panic!("interrupted"));
    }));
    assert!(caught.is_err());
    assert_eq!(mode.device().log().last().map(String::as_str), Some("echo=true raw=false"));
}

#[test]
fn non_terminal_input_fails_to_suppress_echo() {
    let (r, w) = nix::unistd::pipe().unwrap();
    let mode = Mode::new(Tty::from_fd(r));
    let err = mode.echo(false, || ()).unwrap_err();
    assert_eq!(err.action(), Action::Read);
    assert!(err.to_string().contains("terminal attribute access failed"));
    // The pass-through branch never consults the device.
    assert!(mode.echo(true, || ()).is_ok());
    nix::unistd::close(r).unwrap();
    nix::unistd::close(w).unwrap();
}
