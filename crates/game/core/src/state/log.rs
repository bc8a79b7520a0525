use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

/// Who or what a log entry is about, for presentation styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    Player,
    Enemy,
    System,
    Item,
    Skill,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub id: u64,
    pub kind: LogKind,
    pub text: String,
}

/// Bounded event log, newest entry first.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    next_id: u64,
    max_entries: usize,
}

impl EventLog {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            next_id: 0,
            max_entries,
        }
    }

    pub fn push(&mut self, kind: LogKind, text: impl Into<String>) {
        let entry = LogEntry {
            id: self.next_id,
            kind,
            text: text.into(),
        };
        self.next_id += 1;
        self.entries.push_front(entry);
        self.entries.truncate(self.max_entries);
    }

    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&LogEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries but keep the id counter monotonic.
    pub fn reset(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_first_and_bounded() {
        let mut log = EventLog::new(3);
        for i in 0..5 {
            log.push(LogKind::System, format!("event {i}"));
        }
        assert_eq!(log.len(), 3);
        let texts: Vec<&str> = log.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["event 4", "event 3", "event 2"]);
    }

    #[test]
    fn ids_stay_monotonic_across_reset() {
        let mut log = EventLog::new(10);
        log.push(LogKind::Player, "a");
        log.push(LogKind::Player, "b");
        log.reset();
        log.push(LogKind::Player, "c");
        assert_eq!(log.latest().map(|e| e.id), Some(2));
    }
}
