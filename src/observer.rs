use crate::logger::{log, LogSeverity};

/// Progress events reported by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The cache file was found and loaded.
    CacheLoaded { entries: usize },
    /// No cache file exists yet; matching starts from an empty cache.
    CacheMissing,
    /// Another writer changed the cache file since it was opened; its new keys were merged.
    CacheMerged { external: usize },
    CacheSaved { entries: usize },
    /// Row `row` (0-based) of `total` has been matched to blocks.
    RowMatched { row: usize, total: usize },
    CommandsEmitted { commands: usize, chunks: usize },
}

/// Receives pipeline events. The core never prints; whatever wants progress output
/// implements this.
pub trait Observer {
    fn on_event(&mut self, event: &Event);
}

/// Ignores every event.
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&mut self, _event: &Event) {}
}

/// Records events in order, mostly useful in tests.
impl Observer for Vec<Event> {
    fn on_event(&mut self, event: &Event) {
        self.push(event.clone());
    }
}

/// Forwards events to the logger.
pub struct LogObserver;

impl Observer for LogObserver {
    fn on_event(&mut self, event: &Event) {
        use LogSeverity::*;

        match event {
            Event::CacheLoaded { entries } => {
                log(format!("Color cache found, loaded {} entries", entries), Info)
            }
            Event::CacheMissing => log(
                "Color cache wasn't found, image processing may take longer".to_owned(),
                Warning,
            ),
            Event::CacheMerged { external } => log(
                format!(
                    "Color cache changed on disk, merged {} new entries",
                    external
                ),
                Info,
            ),
            Event::CacheSaved { entries } => {
                log(format!("Saved color cache ({} entries)", entries), Info)
            }
            Event::RowMatched { row, total } => {
                log(format!("Determining blocks... row {}/{}", row + 1, total), Debug)
            }
            Event::CommandsEmitted { commands, chunks } => log(
                format!("Generated {} commands in {} function files", commands, chunks),
                Info,
            ),
        }
    }
}
