// history.rs

use itertools::Itertools;
use std::fmt;
use std::io::{self, BufRead, Write};
use tracing::{debug, trace};

/// Default capacity of a history buffer.
pub const DEFAULT_SIZE: usize = 32 << 4;

type Exclude = Box<dyn Fn(&str) -> bool>;

/// Storage and navigation policies for a [`History`].
pub struct HistoryOptions {
    pub duplicates: bool,
    pub exclude: Exclude,
    pub cycle: bool,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            duplicates: true,
            exclude: Box::new(|_| false),
            cycle: false,
        }
    }
}

impl HistoryOptions {
    pub fn duplicates(mut self, duplicates: bool) -> Self {
        self.duplicates = duplicates;
        self
    }

    pub fn exclude<F>(mut self, exclude: F) -> Self
    where
        F: Fn(&str) -> bool + 'static,
    {
        self.exclude = Box::new(exclude);
        self
    }

    pub fn cycle(mut self, cycle: bool) -> Self {
        self.cycle = cycle;
        self
    }
}

impl fmt::Debug for HistoryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryOptions")
            .field("duplicates", &self.duplicates)
            .field("cycle", &self.cycle)
            .finish_non_exhaustive()
    }
}

/// Previously entered lines with a movable read cursor.
///
/// Capacity is bounded: once full, pushing evicts the oldest line. All
/// operations are total; navigating an empty buffer or past either end is
/// absorbed (saturating, or wrapping when `cycle` is on).
pub struct History {
    entries: Vec<String>,
    index: usize,
    max_size: usize,
    options: HistoryOptions,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl History {
    /// A `max_size` of zero is clamped to one.
    pub fn new(max_size: usize) -> Self {
        Self::with_options(max_size, HistoryOptions::default())
    }

    pub fn with_options(max_size: usize, options: HistoryOptions) -> Self {
        Self {
            entries: Vec::new(),
            index: 0,
            max_size: max_size.max(1),
            options,
        }
    }

    /// Records `line` as the most recent entry and points the cursor at it.
    ///
    /// Empty and excluded lines are not stored. With duplicates disabled any
    /// earlier copy of `line` is dropped first, even when `line` itself ends
    /// up excluded.
    pub fn push<S: Into<String>>(&mut self, line: S) -> &mut Self {
        let line = line.into();
        if !self.options.duplicates {
            let before = self.entries.len();
            let behind_cursor = self.entries.iter().take(self.index).filter(|entry| **entry == line).count();
            self.entries.retain(|entry| *entry != line);
            if self.entries.len() != before {
                self.index -= behind_cursor;
                trace!(removed = before - self.entries.len(), "dropped duplicate history lines");
            }
        }
        if !self.accepts(&line) {
            self.clamp_index();
            return self;
        }

        if self.entries.len() >= self.max_size {
            let evicted = self.entries.remove(0);
            debug!(max_size = self.max_size, evicted = %evicted, "history full, evicting oldest line");
        }
        self.entries.push(line);
        self.index = self.entries.len() - 1;
        self
    }

    /// Moves the cursor one step toward the most recent line.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.index == self.entries.len() - 1 {
            if self.options.cycle {
                self.index = 0;
            }
        } else {
            self.index += 1;
        }
    }

    pub fn has_next(&self) -> bool {
        !self.entries.is_empty() && !(self.index == self.entries.len() - 1 && !self.options.cycle)
    }

    /// Moves the cursor one step toward the oldest line.
    pub fn previous(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        if self.index == 0 {
            if self.options.cycle {
                self.index = self.entries.len() - 1;
            }
        } else {
            self.index -= 1;
        }
    }

    pub fn has_previous(&self) -> bool {
        !self.entries.is_empty() && !(self.index == 0 && !self.options.cycle)
    }

    /// The line under the cursor. Does not move the cursor.
    pub fn pop(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn cycle(&self) -> bool {
        self.options.cycle
    }

    pub fn duplicates(&self) -> bool {
        self.options.duplicates
    }

    pub fn set_cycle(&mut self, cycle: bool) {
        debug!(cycle, "history cycling changed");
        self.options.cycle = cycle;
    }

    /// Only affects later pushes; lines already stored are kept.
    pub fn set_duplicates(&mut self, duplicates: bool) {
        debug!(duplicates, "history duplicate policy changed");
        self.options.duplicates = duplicates;
    }

    pub fn set_exclude<F>(&mut self, exclude: F)
    where
        F: Fn(&str) -> bool + 'static,
    {
        debug!("history exclude predicate replaced");
        self.options.exclude = Box::new(exclude);
    }

    /// Shrinking below the current length evicts the oldest lines. The cursor
    /// stays on the same line unless that line was evicted.
    pub fn set_max_size(&mut self, max_size: usize) {
        self.max_size = max_size.max(1);
        if self.entries.len() > self.max_size {
            let overflow = self.entries.len() - self.max_size;
            self.entries.drain(..overflow);
            self.index = self.index.saturating_sub(overflow);
            debug!(evicted = overflow, max_size = self.max_size, "history shrunk");
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.entries.iter()
    }

    /// Pushes every line of `reader`, returning how many were stored.
    pub fn load<R: BufRead>(&mut self, reader: R) -> io::Result<usize> {
        let mut stored = 0;
        for line in reader.lines() {
            let line = line?;
            if self.accepts(&line) {
                stored += 1;
            }
            self.push(line);
        }
        debug!(stored, "loaded history");
        Ok(stored)
    }

    pub fn save<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.entries {
            writeln!(writer, "{}", entry)?;
        }
        writer.flush()
    }

    /// Whether `push(line)` would store the line under the current policies.
    pub fn accepts(&self, line: &str) -> bool {
        !line.is_empty() && !(self.options.exclude)(line)
    }

    fn clamp_index(&mut self) {
        self.index = self.index.min(self.entries.len().saturating_sub(1));
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.entries.iter().join("\n"))
    }
}

impl fmt::Debug for History {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("entries", &self.entries)
            .field("index", &self.index)
            .field("max_size", &self.max_size)
            .field("options", &self.options)
            .finish()
    }
}
