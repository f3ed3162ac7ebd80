// completion.rs

use crate::builtins::BUILTINS;
use itertools::Itertools;
use prompt_reader::History;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::{ValidationContext, ValidationResult, Validator};
use rustyline::{Context, Helper};
use std::cell::RefCell;
use std::rc::Rc;

/// Completes the typed prefix from builtin names and stored history lines,
/// most recent lines first.
pub struct HistoryCompleter {
    history: Rc<RefCell<History>>,
}

impl HistoryCompleter {
    pub fn new(history: Rc<RefCell<History>>) -> Self {
        Self { history }
    }

    pub fn candidates(&self, prefix: &str) -> Vec<String> {
        let history = self.history.borrow();
        BUILTINS
            .iter()
            .map(|name| name.to_string())
            .chain(history.iter().rev().cloned())
            .filter(|candidate| candidate.starts_with(prefix) && candidate != prefix)
            .unique()
            .collect()
    }
}

impl Completer for HistoryCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Result<(usize, Vec<Pair>), ReadlineError> {
        let prefix = &line[..pos];
        let completions = self
            .candidates(prefix)
            .into_iter()
            .map(|candidate| Pair { display: candidate.clone(), replacement: candidate })
            .collect();
        Ok((0, completions))
    }
}

impl Hinter for HistoryCompleter {
    type Hint = String;
    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Highlighter for HistoryCompleter {}

impl Validator for HistoryCompleter {
    fn validate(&self, _ctx: &mut ValidationContext) -> Result<ValidationResult, ReadlineError> {
        Ok(ValidationResult::Valid(None))
    }
}

impl Helper for HistoryCompleter {}
