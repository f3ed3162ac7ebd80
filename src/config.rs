// config.rs

use crate::history::{History, HistoryOptions, DEFAULT_SIZE};
use std::path::PathBuf;
use tracing::warn;

/// Reader settings taken from the shell-style `HIST*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReaderConfig {
    pub histfile: Option<PathBuf>,
    pub histsize: usize,
    pub duplicates: bool,
    pub ignore_space: bool,
    pub cycle: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            histfile: None,
            histsize: DEFAULT_SIZE,
            duplicates: true,
            ignore_space: false,
            cycle: false,
        }
    }
}

impl ReaderConfig {
    pub fn from_env() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Unknown variables are skipped; malformed values keep the default.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in vars {
            let value = value.as_ref();
            match key.as_ref() {
                "HISTFILE" if !value.trim().is_empty() => config.histfile = Some(PathBuf::from(value)),
                "HISTSIZE" => match value.trim().parse::<usize>() {
                    Ok(size) => config.histsize = size,
                    Err(_) => warn!(value, "ignoring malformed HISTSIZE"),
                },
                "HISTCONTROL" => {
                    for control in value.split(':') {
                        match control {
                            "ignoredups" | "erasedups" => config.duplicates = false,
                            "ignorespace" => config.ignore_space = true,
                            "ignoreboth" => {
                                config.duplicates = false;
                                config.ignore_space = true;
                            }
                            "" => {}
                            other => warn!(control = other, "unknown HISTCONTROL setting"),
                        }
                    }
                }
                "HISTCYCLE" => config.cycle = matches!(value.trim(), "1" | "true" | "yes" | "on"),
                _ => {}
            }
        }
        config
    }

    pub fn history(&self) -> History {
        let mut options = HistoryOptions::default().duplicates(self.duplicates).cycle(self.cycle);
        if self.ignore_space {
            options = options.exclude(|line| line.starts_with(' '));
        }
        History::with_options(self.histsize, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        let config = ReaderConfig::from_vars(Vec::<(String, String)>::new());
        assert_eq!(config, ReaderConfig::default());
        assert_eq!(config.history().max_size(), 512);
    }

    #[test]
    fn reads_hist_variables() {
        let config = ReaderConfig::from_vars([
            ("HISTFILE", "/tmp/hist"),
            ("HISTSIZE", "10"),
            ("HISTCONTROL", "ignoreboth"),
            ("HISTCYCLE", "1"),
            ("PATH", "/bin"),
        ]);
        assert_eq!(config.histfile, Some(PathBuf::from("/tmp/hist")));
        assert_eq!(config.histsize, 10);
        assert!(!config.duplicates);
        assert!(config.ignore_space);
        assert!(config.cycle);
    }

    #[test]
    fn malformed_size_keeps_default() {
        let config = ReaderConfig::from_vars([("HISTSIZE", "lots")]);
        assert_eq!(config.histsize, DEFAULT_SIZE);
    }

    #[test]
    fn built_history_follows_settings() {
        let config = ReaderConfig::from_vars([("HISTCONTROL", "ignorespace:erasedups")]);
        let mut history = config.history();
        history.push("ls").push(" rm -rf tmp").push("ls");
        assert_eq!(history.len(), 1);
        assert_eq!(history.pop(), Some("ls"));
    }
}
