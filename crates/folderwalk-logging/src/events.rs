use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Structured log events for a harvest run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    HarvestStarted {
        root_id: String,
    },
    FoldersEnumerated {
        count: usize,
        duration_secs: f64,
    },
    /// Sessions pulled from a single folder
    FolderSessionsCollected {
        index: usize,
        total: usize,
        folder_id: String,
        folder_name: String,
        count: usize,
    },
    SessionsCollected {
        count: usize,
    },
    DatasetExported {
        dataset: String,
        path: PathBuf,
        rows: usize,
    },
    HarvestCompleted {
        folders: usize,
        sessions: usize,
        duration_secs: f64,
    },
    ErrorEncountered {
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for harvest events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::HarvestStarted { root_id } => {
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "{}",
                    "╭─────────────────────────────────────────────────────────────────────╮"
                        .bright_blue()
                );
                let _ = writeln!(
                    stderr,
                    "{}  {}{}",
                    "│".bright_blue(),
                    "folderwalk".bold().bright_white(),
                    " ".repeat(57) + &"│".bright_blue().to_string()
                );
                let _ = writeln!(
                    stderr,
                    "{}  {} {}",
                    "│".bright_blue(),
                    "Root:".dimmed(),
                    Self::truncate_with_padding(root_id, 62, 67).dimmed()
                );
                let _ = writeln!(
                    stderr,
                    "{}",
                    "╰─────────────────────────────────────────────────────────────────────╯"
                        .bright_blue()
                );
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "▶".bright_cyan(),
                    "FOLDERS".bright_cyan().bold()
                );
            }
            LogEvent::FoldersEnumerated {
                count,
                duration_secs,
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} {} {} received ({:.1}s)",
                    "✓".bright_green(),
                    count,
                    if *count == 1 { "folder" } else { "folders" },
                    duration_secs
                );
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "  {} {}",
                    "▶".bright_magenta(),
                    "SESSIONS".bright_magenta().bold()
                );
            }
            LogEvent::FolderSessionsCollected {
                index,
                total,
                folder_name,
                count,
                ..
            } => {
                let prefix = "    │".dimmed();
                let progress = format!("[{}/{}]", index + 1, total).dimmed();
                let count_text = if *count == 0 {
                    "0 sessions".dimmed().to_string()
                } else {
                    format!("{} {}", count, if *count == 1 { "session" } else { "sessions" })
                        .normal()
                        .to_string()
                };
                let _ = writeln!(
                    stderr,
                    "{} {} {}: {}",
                    prefix, progress, folder_name, count_text
                );
            }
            LogEvent::SessionsCollected { count } => {
                let _ = writeln!(
                    stderr,
                    "    {} {} {} received",
                    "✓".bright_green(),
                    count,
                    if *count == 1 { "session" } else { "sessions" }
                );
                let _ = writeln!(stderr);
            }
            LogEvent::DatasetExported {
                dataset,
                path,
                rows,
            } => {
                let _ = writeln!(
                    stderr,
                    "    {} {} {} rows → {}",
                    "📁".dimmed(),
                    format!("{}:", dataset).dimmed(),
                    rows,
                    path.display()
                );
            }
            LogEvent::HarvestCompleted { .. } => {
                // Final totals are printed by the binary
            }
            LogEvent::ErrorEncountered { error } => {
                let _ = writeln!(stderr);
                let _ = writeln!(stderr, "{} Error: {}", "✗".bright_red(), error.bright_red());
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::HarvestStarted { root_id } => {
                format!("[{}] harvest:start root={}", timestamp, root_id)
            }
            LogEvent::FoldersEnumerated {
                count,
                duration_secs,
            } => format!(
                "[{}] folders:done {} {:.1}s",
                timestamp, count, duration_secs
            ),
            LogEvent::FolderSessionsCollected {
                index,
                total,
                folder_id,
                count,
                ..
            } => format!(
                "[{}] sessions:{}/{} {} n={}",
                timestamp,
                index + 1,
                total,
                folder_id,
                count
            ),
            LogEvent::SessionsCollected { count } => {
                format!("[{}] sessions:done {}", timestamp, count)
            }
            LogEvent::DatasetExported {
                dataset,
                path,
                rows,
            } => format!(
                "[{}] export:{} {} rows={}",
                timestamp,
                dataset,
                path.display(),
                rows
            ),
            LogEvent::HarvestCompleted {
                folders,
                sessions,
                duration_secs,
            } => format!(
                "[{}] harvest:done folders={} sessions={} {:.1}s",
                timestamp, folders, sessions, duration_secs
            ),
            LogEvent::ErrorEncountered { error } => format!("[{}] error:{}", timestamp, error),
        };
        let _ = writeln!(stderr, "{}", msg);
    }

    /// Truncate a string and pad to exact width
    fn truncate_with_padding(s: &str, max_len: usize, total_width: usize) -> String {
        let truncated = if s.chars().count() > max_len {
            let head: String = s.chars().take(max_len - 3).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        };

        let padding_needed = total_width.saturating_sub(truncated.chars().count() + 1);
        format!("{}{}│", truncated, " ".repeat(padding_needed))
    }
}
