use owo_colors::OwoColorize;

use gtm_core::CommandTable;

pub struct CommandsHandler;

impl CommandsHandler {
    pub fn list(table: &CommandTable) {
        let width = table
            .entries()
            .iter()
            .map(|entry| entry.name.len())
            .max()
            .unwrap_or(0);

        for entry in table.entries() {
            let padding = " ".repeat(width.saturating_sub(entry.name.len()));
            println!(
                "  {}{padding}  {}  {}",
                entry.name.bright_cyan().bold(),
                entry.package.bright_white(),
                entry.description.bright_black()
            );
        }
    }
}
