// crates/autovid-core/src/status.rs
//
// The user-facing "Status & Information" log.
//
// Lines are stamped `[HH:MM:SS]` when appended and the buffer keeps only the
// most recent MAX_STATUS_LINES. Appends come exclusively from the UI thread;
// worker output reaches it through the runner's channel.

use std::collections::VecDeque;

use chrono::Local;

pub const MAX_STATUS_LINES: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    /// Prefix prepended to the message text, empty for plain info.
    pub fn prefix(self) -> &'static str {
        match self {
            LogLevel::Info    => "",
            LogLevel::Success => "[OK] ",
            LogLevel::Warning => "[WARN] ",
            LogLevel::Error   => "[ERROR] ",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusLine {
    pub level: LogLevel,
    pub text:  String,
}

pub struct StatusLog {
    lines: VecDeque<StatusLine>,
    cap:   usize,
}

impl Default for StatusLog {
    fn default() -> Self {
        Self::with_capacity(MAX_STATUS_LINES)
    }
}

impl StatusLog {
    pub fn with_capacity(cap: usize) -> Self {
        Self { lines: VecDeque::with_capacity(cap.min(1024)), cap: cap.max(1) }
    }

    pub fn push(&mut self, level: LogLevel, msg: impl AsRef<str>) {
        let stamp = Local::now().format("%H:%M:%S");
        let text  = format!("[{stamp}] {}{}", level.prefix(), msg.as_ref());
        self.lines.push_back(StatusLine { level, text });
        while self.lines.len() > self.cap {
            self.lines.pop_front();
        }
    }

    pub fn info(&mut self, msg: impl AsRef<str>)    { self.push(LogLevel::Info, msg) }
    pub fn success(&mut self, msg: impl AsRef<str>) { self.push(LogLevel::Success, msg) }
    pub fn warning(&mut self, msg: impl AsRef<str>) { self.push(LogLevel::Warning, msg) }
    pub fn error(&mut self, msg: impl AsRef<str>)   { self.push(LogLevel::Error, msg) }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> impl Iterator<Item = &StatusLine> {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_are_stamped_and_prefixed() {
        let mut log = StatusLog::default();
        log.error("boom");
        let line = log.lines().next().unwrap();
        assert_eq!(line.level, LogLevel::Error);
        // "[HH:MM:SS] [ERROR] boom"
        assert_eq!(&line.text[0..1], "[");
        assert_eq!(&line.text[9..], "] [ERROR] boom");
    }

    #[test]
    fn cap_drops_oldest_and_preserves_order() {
        let mut log = StatusLog::default();
        for i in 0..1500 {
            log.info(format!("line {i}"));
        }
        assert_eq!(log.len(), MAX_STATUS_LINES);
        let kept: Vec<_> = log.lines().map(|l| l.text[11..].to_string()).collect();
        assert_eq!(kept.first().map(String::as_str), Some("line 500"));
        assert_eq!(kept.last().map(String::as_str), Some("line 1499"));
        for (n, text) in kept.iter().enumerate() {
            assert_eq!(text, &format!("line {}", 500 + n));
        }
    }

    #[test]
    fn clear_empties_buffer() {
        let mut log = StatusLog::with_capacity(3);
        log.success("a");
        log.warning("b");
        log.clear();
        assert!(log.is_empty());
    }
}
