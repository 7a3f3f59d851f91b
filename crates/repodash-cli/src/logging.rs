use std::collections::VecDeque;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};

use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

/// One display line for the dashboard's log panel, flattened at record time.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    pub text: String,
}

impl LogEntry {
    pub fn format_line(&self) -> String {
        format!("{} {:<5} {}", self.timestamp, self.level, self.text)
    }
}

/// Bounded in-memory sink for log entries. The terminal UI owns stdout, so
/// tracing output collects here and is rendered inside the dashboard.
#[derive(Clone)]
pub struct LogBuffer {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl LogBuffer {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::new())),
            max_entries,
        }
    }

    /// The newest `count` entries, oldest first.
    pub fn tail(&self, count: usize) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| {
                let skip = entries.len().saturating_sub(count);
                entries.iter().skip(skip).cloned().collect()
            })
            .unwrap_or_default()
    }

    fn push(&self, entry: LogEntry) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(entry);
            while entries.len() > self.max_entries {
                entries.pop_front();
            }
        }
    }
}

/// Tracing layer that feeds the log panel.
#[derive(Clone)]
pub struct PanelLayer {
    buffer: LogBuffer,
}

impl PanelLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for PanelLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut collector = LineCollector::default();
        event.record(&mut collector);
        self.buffer.push(LogEntry {
            timestamp: format_timestamp(OffsetDateTime::now_utc()),
            level: *event.metadata().level(),
            text: collector.into_line(),
        });
    }
}

#[derive(Default)]
struct LineCollector {
    message: String,
    extras: Vec<String>,
}

impl LineCollector {
    fn into_line(self) -> String {
        if self.extras.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.extras.join(" ")
        } else {
            format!("{} | {}", self.message, self.extras.join(" "))
        }
    }

    fn record(&mut self, field: &tracing::field::Field, value: String) {
        if field.name() == "message" {
            self.message = value;
        } else {
            self.extras.push(format!("{}={}", field.name(), value));
        }
    }
}

impl tracing::field::Visit for LineCollector {
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.record(field, value.to_string());
    }

    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.record(field, value.to_string());
    }

    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.record(field, value.to_string());
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.record(field, value.to_string());
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn Debug) {
        self.record(field, format!("{value:?}"));
    }
}

fn format_timestamp(timestamp: OffsetDateTime) -> String {
    let Ok(format) = time::format_description::parse("[hour repr:24]:[minute]:[second]") else {
        return timestamp.unix_timestamp().to_string();
    };
    timestamp
        .format(&format)
        .unwrap_or_else(|_| timestamp.unix_timestamp().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> LogEntry {
        LogEntry {
            timestamp: "12:34:56".to_string(),
            level: Level::INFO,
            text: text.to_string(),
        }
    }

    #[test]
    fn buffer_keeps_only_the_newest_entries() {
        let buffer = LogBuffer::new(2);
        for text in ["one", "two", "three"] {
            buffer.push(entry(text));
        }
        let tail = buffer.tail(10);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail[0].text, "two");
        assert_eq!(tail[1].text, "three");
    }

    #[test]
    fn tail_returns_newest_first_to_last() {
        let buffer = LogBuffer::new(10);
        for text in ["one", "two", "three"] {
            buffer.push(entry(text));
        }
        let tail = buffer.tail(2);
        assert_eq!(tail[0].text, "two");
        assert_eq!(tail[1].text, "three");
    }

    #[test]
    fn line_appends_extras_after_the_message() {
        let collector = LineCollector {
            message: "syncing".to_string(),
            extras: vec!["repo=alpha".to_string(), "push=true".to_string()],
        };
        assert_eq!(collector.into_line(), "syncing | repo=alpha push=true");
    }

    #[test]
    fn format_line_includes_level_and_timestamp() {
        let formatted = entry("hello").format_line();
        assert!(formatted.contains("12:34:56"));
        assert!(formatted.contains("INFO"));
        assert!(formatted.contains("hello"));
    }
}
