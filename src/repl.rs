// repl.rs

use crate::builtins::{record_line, run_builtin, Outcome};
use crate::completion::HistoryCompleter;
use anyhow::{Context, Result};
use prompt_reader::{History, Mode, ReaderConfig, Tty};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{CompletionType, Config, Editor};
use std::cell::RefCell;
use std::fs::File;
use std::io::BufReader;
use std::rc::Rc;
use tracing::{debug, warn};

pub fn start_repl(config: &ReaderConfig) -> Result<i32> {
    let history = Rc::new(RefCell::new(config.history()));
    if let Some(histfile) = &config.histfile {
        match File::open(histfile) {
            Ok(file) => {
                history.borrow_mut().load(BufReader::new(file)).with_context(|| format!("reading {}", histfile.display()))?;
            }
            Err(err) => debug!(path = %histfile.display(), error = %err, "no history file loaded"),
        }
    }

    let editor_config = Config::builder()
        .completion_type(CompletionType::List)
        .max_history_size(config.histsize.max(1))?
        .history_ignore_dups(!config.duplicates)?
        .history_ignore_space(config.ignore_space)
        .build();
    let mut rl: Editor<HistoryCompleter, DefaultHistory> = Editor::with_config(editor_config)?;
    rl.set_helper(Some(HistoryCompleter::new(Rc::clone(&history))));
    for line in history.borrow().iter() {
        rl.add_history_entry(line.as_str())?;
    }

    let mode = Mode::new(Tty::stdin());
    let code = loop {
        match rl.readline("$ ") {
            Ok(line) => {
                if record_line(&mut history.borrow_mut(), &line) {
                    rl.add_history_entry(line.trim_end())?;
                }
                let tokens: Vec<&str> = line.split_whitespace().collect();
                match run_builtin(&tokens, &mut history.borrow_mut(), &mode) {
                    Ok(Outcome::Continue) => {}
                    Ok(Outcome::Exit(code)) => break code,
                    Err(err) => eprintln!("{:#}", err),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break 0,
            Err(err) => return Err(err).context("reading input"),
        }
    };

    if let Some(histfile) = &config.histfile {
        if let Err(err) = save(&history.borrow(), histfile) {
            warn!(error = %err, "failed to save history");
        }
    }
    Ok(code)
}

fn save(history: &History, path: &std::path::Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    history.save(file)?;
    Ok(())
}
