use crossterm::{ExecutableCommand, cursor, terminal};
use owo_colors::OwoColorize;
use std::fmt::Debug;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, OnceLock};

pub struct Logger {
    quiet: bool,
    verbose: bool,
    current_line: Arc<Mutex<String>>,
}

pub enum LogLevel {
    Info,
    Warning,
    Error,
    Verbose,
}

impl Logger {
    #[must_use]
    pub fn new(quiet: bool, verbose: bool) -> Self {
        Self {
            quiet,
            verbose,
            current_line: Arc::new(Mutex::new(String::new())),
        }
    }

    fn clear_current_line(&self) {
        if self.quiet {
            return;
        }

        let has_pending = self
            .current_line
            .lock()
            .map(|line| !line.is_empty())
            .unwrap_or(false);
        if !has_pending {
            return;
        }

        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::MoveToColumn(0));
        let _ = stdout.execute(terminal::Clear(terminal::ClearType::CurrentLine));
        let _ = stdout.flush();
    }

    pub fn update_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        print!("{message}");
        let _ = io::stdout().flush();

        if let Ok(mut line) = self.current_line.lock() {
            *line = message.to_string();
        }
    }

    pub fn finish_line(&self, message: &str) {
        if self.quiet {
            return;
        }

        self.clear_current_line();
        println!("{message}");

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if matches!(level, LogLevel::Verbose) && !self.verbose {
            return;
        }
        if self.quiet && !matches!(level, LogLevel::Error) {
            return;
        }

        self.clear_current_line();

        let heading = "gtm".bright_black().to_string();
        let (prefix, colored_message) = match level {
            LogLevel::Info => (
                "info".bright_cyan().bold().to_string(),
                message.white().to_string(),
            ),
            LogLevel::Warning => (
                "⚠".bright_yellow().bold().to_string(),
                message.bright_yellow().to_string(),
            ),
            LogLevel::Error => (
                "✗".bright_red().bold().to_string(),
                message.bright_red().to_string(),
            ),
            LogLevel::Verbose => (
                "verb".bright_black().bold().to_string(),
                message.bright_black().to_string(),
            ),
        };

        match level {
            LogLevel::Error | LogLevel::Warning => {
                eprintln!("{heading} {prefix} {colored_message}");
            }
            _ => println!("{heading} {prefix} {colored_message}"),
        }

        if let Ok(mut line) = self.current_line.lock() {
            line.clear();
        }
    }

    pub fn status(&self, message: &str) {
        if self.quiet {
            return;
        }

        let status_msg = format!("{} {}", "◦".bright_cyan(), message.bright_white());
        self.update_line(&status_msg);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Key/value diagnostics, printed only in verbose mode.
    pub fn verbose(&self, key: &str, value: &str) {
        self.log(LogLevel::Verbose, &format!("{key} {value}"));
    }

    /// Logs the error message, plus its debug representation in verbose mode.
    pub fn error_with_detail<E: Debug + std::fmt::Display + ?Sized>(&self, err: &E) {
        for (level, message) in self.error_entries(err) {
            self.log(level, &message);
        }
    }

    fn error_entries<E: Debug + std::fmt::Display + ?Sized>(
        &self,
        err: &E,
    ) -> Vec<(LogLevel, String)> {
        let mut entries = vec![(LogLevel::Error, err.to_string())];
        if self.verbose {
            entries.push((LogLevel::Verbose, format!("{err:#?}")));
        }
        entries
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process-wide logger. Only the first call takes effect.
pub fn init_logger(quiet: bool, verbose: bool) {
    let _ = LOGGER.set(Logger::new(quiet, verbose));
}

fn get_logger() -> &'static Logger {
    LOGGER.get_or_init(|| Logger::new(false, false))
}

pub fn status(message: &str) {
    get_logger().status(message);
}

pub fn info(message: &str) {
    get_logger().info(message);
}

pub fn warn(message: &str) {
    get_logger().warn(message);
}

pub fn error(message: &str) {
    get_logger().error(message);
}

pub fn verbose(key: &str, value: &str) {
    get_logger().verbose(key, value);
}

pub fn error_with_detail<E: Debug + std::fmt::Display + ?Sized>(err: &E) {
    get_logger().error_with_detail(err);
}

pub fn finish_line(message: &str) {
    get_logger().finish_line(message);
}
