use crate::e_errors::PanelError;
use crate::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// Where panel messages go: the console for the CLI, the status line for the TUI.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);

    fn info(&mut self, text: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice {
            level: NoticeLevel::Info,
            text: text.into(),
        });
    }

    fn error(&mut self, text: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice {
            level: NoticeLevel::Error,
            text: text.into(),
        });
    }
}

impl From<&PanelError> for Notice {
    fn from(err: &PanelError) -> Self {
        Notice {
            level: if err.is_informational() {
                NoticeLevel::Info
            } else {
                NoticeLevel::Error
            },
            text: err.to_string(),
        }
    }
}

/// Prints info to stdout and errors to stderr.
#[derive(Debug, Default)]
pub struct ConsoleNotifier {
    /// Errors reported so far; the CLI turns a non-zero count into exit status 1.
    pub errors: usize,
    /// Send info notices to stderr too, keeping stdout for machine output.
    pub quiet_stdout: bool,
}

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => {
                info!("{}", notice.text);
                if self.quiet_stdout {
                    eprintln!("{}", notice.text);
                } else {
                    println!("{}", notice.text);
                }
            }
            NoticeLevel::Error => {
                error!("{}", notice.text);
                self.errors += 1;
                eprintln!("error: {}", notice.text);
            }
        }
    }
}

/// Keeps notices in memory; the TUI drains it into its status line.
#[derive(Debug, Default)]
pub struct NoticeLog {
    notices: Vec<Notice>,
}

impl NoticeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn last(&self) -> Option<&Notice> {
        self.notices.last()
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for NoticeLog {
    fn notify(&mut self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => info!("{}", notice.text),
            NoticeLevel::Error => error!("{}", notice.text),
        }
        self.notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_notice_level_follows_error_kind() {
        let info = Notice::from(&PanelError::NotConfigured);
        assert_eq!(info.level, NoticeLevel::Info);
        let err = Notice::from(&PanelError::FileNotFound(PathBuf::from("b.xml")));
        assert_eq!(err.level, NoticeLevel::Error);
        assert_eq!(err.text, "Build file not found: b.xml");
    }

    #[test]
    fn test_console_counts_errors() {
        let mut console = ConsoleNotifier::default();
        console.info("Search cleared");
        console.error("Failed to open file: gone");
        assert_eq!(console.errors, 1);
    }

    #[test]
    fn test_log_drains() {
        let mut log = NoticeLog::new();
        log.info("one");
        log.error("two");
        assert_eq!(log.last().map(|n| n.text.as_str()), Some("two"));
        assert_eq!(log.drain().len(), 2);
        assert!(log.notices().is_empty());
    }
}
