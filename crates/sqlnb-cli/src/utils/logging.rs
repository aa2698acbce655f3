use log::{Level, LevelFilter, Log, Metadata, Record};

/// Writes prefixed log lines to stderr so stdout only carries rendered output.
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

fn prefix(level: Level) -> &'static str {
    match level {
        Level::Error => "Error",
        Level::Warn => "Warning",
        Level::Info => "Info",
        Level::Debug | Level::Trace => "Verbose",
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}: {}", prefix(record.level()), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    // Only fails when a logger is already installed.
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes() {
        assert_eq!(prefix(Level::Error), "Error");
        assert_eq!(prefix(Level::Warn), "Warning");
        assert_eq!(prefix(Level::Info), "Info");
        assert_eq!(prefix(Level::Debug), "Verbose");
        assert_eq!(prefix(Level::Trace), "Verbose");
    }
}
