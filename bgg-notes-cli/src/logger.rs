//! Terminal logger behind the `log` facade.
//!
//! Info lines go to stdout as-is; warnings and errors go to stderr with a
//! coloured prefix. `--verbose` adds debug output from our own crates and a
//! timestamp on every line. `--logfile` mirrors each line to a file with the
//! colour codes stripped.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

/// Verbose wins over quiet.
pub(crate) fn level_for(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

pub(crate) struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    logfile: Option<Mutex<File>>,
}

impl CliLogger {
    pub(crate) fn new(
        quiet: bool,
        verbose: bool,
        logfile: Option<&Path>,
    ) -> Result<Self, CliError> {
        let logfile = logfile.map(File::create).transpose()?.map(Mutex::new);
        Ok(Self {
            level: level_for(quiet, verbose),
            timestamps: verbose,
            logfile,
        })
    }

    fn format_line(&self, record: &Record) -> String {
        let msg = record.args().to_string();
        let line = match record.level() {
            Level::Error => format!(
                "{} {}",
                "error:".if_supports_color(Stderr, |t| t.red()),
                msg
            ),
            Level::Warn => format!(
                "{} {}",
                "warning:".if_supports_color(Stderr, |t| t.yellow()),
                msg
            ),
            Level::Info => msg,
            Level::Debug | Level::Trace => {
                let target = format!("[{}]", record.target());
                format!("{} {}", target.if_supports_color(Stderr, |t| t.dimmed()), msg)
            }
        };

        if self.timestamps {
            format!("{} {}", chrono::Local::now().format("%H:%M:%S%.3f"), line)
        } else {
            line
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        // Debug output from dependencies (hyper, reqwest) is noise here
        metadata.level() <= self.level
            && (metadata.level() <= Level::Info || metadata.target().starts_with("bgg_notes"))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record);

        if record.level() == Level::Info {
            let _ = writeln!(std::io::stdout().lock(), "{}", line);
        } else {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
        }

        if let Some(file) = &self.logfile {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.logfile {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// Install the CLI logger as the global `log` backend.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let logger = CliLogger::new(quiet, verbose, logfile)?;
    let level = logger.level;
    log::set_boxed_logger(Box::new(logger)).map_err(|e| CliError::runtime(e.to_string()))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_flags() {
        assert_eq!(level_for(false, false), LevelFilter::Info);
        assert_eq!(level_for(true, false), LevelFilter::Warn);
        assert_eq!(level_for(false, true), LevelFilter::Debug);
        assert_eq!(level_for(true, true), LevelFilter::Debug);
    }

    #[test]
    fn test_dependency_debug_is_filtered() {
        let logger = CliLogger::new(false, true, None).unwrap();
        let ours = Metadata::builder()
            .level(Level::Debug)
            .target("bgg_notes_catalog::client")
            .build();
        let theirs = Metadata::builder()
            .level(Level::Debug)
            .target("hyper_util::client")
            .build();
        let their_warning = Metadata::builder()
            .level(Level::Warn)
            .target("reqwest::connect")
            .build();

        assert!(logger.enabled(&ours));
        assert!(!logger.enabled(&theirs));
        assert!(logger.enabled(&their_warning));
    }

    #[test]
    fn test_quiet_drops_info() {
        let logger = CliLogger::new(true, false, None).unwrap();
        let info = Metadata::builder()
            .level(Level::Info)
            .target("bgg_notes_cli")
            .build();
        assert!(!logger.enabled(&info));
    }

    #[test]
    fn test_logfile_strips_ansi() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        let logger = CliLogger::new(false, false, Some(&path)).unwrap();

        logger.log(
            &Record::builder()
                .args(format_args!("\x1b[1mCatan\x1b[0m written"))
                .level(Level::Warn)
                .target("bgg_notes_cli")
                .build(),
        );
        logger.flush();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "warning: Catan written\n"
        );
    }
}
