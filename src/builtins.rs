// builtins.rs

use anyhow::{Context, Result};
use prompt_reader::{History, Mode, Tty};
use std::fs::File;
use std::io::{self, BufReader, Read, Write};

pub const BUILTINS: [&str; 6] = ["exit", "history", "password", "key", "prev", "next"];

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit(i32),
}

/// Commands that move the history cursor; recording them would reset it.
const NAVIGATION: [&str; 2] = ["prev", "next"];

/// Stores an accepted input line, returning whether it was kept.
///
/// Only trailing whitespace is stripped so that the exclude predicate still
/// sees a leading space.
pub fn record_line(history: &mut History, line: &str) -> bool {
    let line = line.trim_end();
    if let [command] = line.split_whitespace().collect::<Vec<_>>()[..] {
        if NAVIGATION.contains(&command) {
            return false;
        }
    }
    let stored = history.accepts(line);
    history.push(line);
    stored
}

fn print_line<S: AsRef<str>>(s: S) -> io::Result<()> {
    let mut out = io::stdout().lock();
    match writeln!(out, "{}", s.as_ref()) {
        Err(ref e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

pub fn run_builtin(tokens: &[&str], history: &mut History, mode: &Mode<Tty>) -> Result<Outcome> {
    match tokens {
        [] => {}
        ["exit"] => return Ok(Outcome::Exit(0)),
        ["exit", code] => return Ok(Outcome::Exit(code.parse().unwrap_or(255))),
        ["history"] => list(history, history.len())?,
        ["history", "-c"] => history.clear(),
        ["history", "-r", path] => {
            let file = File::open(path).with_context(|| format!("history: cannot read {}", path))?;
            history.load(BufReader::new(file))?;
        }
        ["history", "-w", path] => {
            let file = File::create(path).with_context(|| format!("history: cannot write {}", path))?;
            history.save(file)?;
        }
        ["history", n] => match n.parse::<usize>() {
            Ok(n) => list(history, n)?,
            Err(_) => print_line(format!("history: {}: numeric argument required", n))?,
        },
        ["password"] => {
            print!("Password: ");
            io::stdout().flush()?;
            let secret = mode.echo(false, || {
                let mut line = String::new();
                io::stdin().read_line(&mut line).map(|_| line)
            })??;
            print_line("")?;
            let secret = secret.trim_end_matches(['\r', '\n']);
            print_line(format!("read {} characters", secret.chars().count()))?;
        }
        ["key"] => {
            print_line("press any key")?;
            let byte = mode.raw(true, || {
                let mut buf = [0u8; 1];
                io::stdin().read_exact(&mut buf).map(|_| buf[0])
            })??;
            print_line(format!("0x{:02x}", byte))?;
        }
        ["prev"] => {
            history.previous();
            show_cursor(history)?;
        }
        ["next"] => {
            history.next();
            show_cursor(history)?;
        }
        [other, ..] => print_line(format!("{}: command not found", other))?,
    }
    Ok(Outcome::Continue)
}

fn list(history: &History, last: usize) -> io::Result<()> {
    let start = history.len().saturating_sub(last);
    for (i, line) in history.iter().enumerate().skip(start) {
        print_line(format!("{:>5}  {}", i + 1, line))?;
    }
    Ok(())
}

fn show_cursor(history: &History) -> io::Result<()> {
    match history.pop() {
        Some(line) => print_line(format!("{:>5}  {}", history.index() + 1, line)),
        None => print_line("history is empty"),
    }
}
