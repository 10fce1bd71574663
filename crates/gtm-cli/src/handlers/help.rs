use owo_colors::OwoColorize;

use gtm_constants::{BIN_NAME, COMMANDS, DESCRIPTION, EXAMPLES, VERSION};

const OPTIONS: &[(&str, &str)] = &[
    ("-d, --debug", "Enable verbose output"),
    ("-t, --target-path <PATH>", "Run plugins from a local directory"),
    ("-h, --help", "Print help"),
    ("-V, --version", "Print version"),
];

pub struct HelpHandler;

impl HelpHandler {
    pub fn show_help() {
        println!("{}", DESCRIPTION.bright_white().bold());
        println!(
            "{} {}",
            "Version:".bright_white().bold(),
            VERSION.bright_black().bold()
        );
        println!();

        println!("{}", "Usage:".bright_magenta().bold());
        println!(
            "  {} {} {} {}",
            BIN_NAME.bright_cyan().bold(),
            "[OPTIONS]".bright_black().bold(),
            "<COMMAND>".bright_white(),
            "[ARGS]".bright_black().bold()
        );
        println!();

        println!("{}", "Commands:".bright_magenta().bold());
        let mut rows: Vec<(&str, &str)> = COMMANDS
            .iter()
            .map(|(name, _, description)| (*name, *description))
            .collect();
        rows.push(("commands", "List the plugin commands and their packages"));
        Self::print_rows(&rows, |name| name.bright_cyan().bold().to_string());
        println!();

        println!("{}", "Options:".bright_magenta().bold());
        Self::print_rows(OPTIONS, |option| option.bright_cyan().bold().to_string());
        println!();

        println!("{}", "Examples:".bright_magenta().bold());
        Self::print_rows(EXAMPLES, Self::format_example);
    }

    /// Left column padded on its visible width, since colour codes have none.
    fn print_rows(rows: &[(&str, &str)], paint: impl Fn(&str) -> String) {
        let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
        for (left, right) in rows {
            let painted = paint(left);
            let padding = width.saturating_sub(left.len());
            println!(
                "  {painted}{}  # {}",
                " ".repeat(padding),
                right.bright_black().bold()
            );
        }
    }

    fn format_example(example: &str) -> String {
        example
            .split_whitespace()
            .enumerate()
            .map(|(i, part)| {
                if i == 0 {
                    part.bright_cyan().bold().to_string()
                } else if part.starts_with('-') {
                    part.bright_black().bold().to_string()
                } else {
                    part.bright_white().to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}
