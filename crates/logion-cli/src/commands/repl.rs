use anyhow::Result;
use colored::Colorize;
use logion_application::{DemoUseCase, DraftCollectionMutator, SessionView, TokensRecordMutator};
use logion_core::LogionError;
use logion_infrastructure::sandbox::SandboxNetwork;
use rustyline::Editor;
use rustyline::error::ReadlineError;

use crate::app::AppBootstrap;
use crate::helper::CliHelper;

/// Command names, in the order `help` lists them.
pub const COMMANDS: [&str; 8] = [
    "connect",
    "add-file",
    "add-tokens-record",
    "show",
    "calls",
    "help",
    "quit",
    "exit",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplCommand {
    Connect,
    AddFile,
    AddTokensRecord,
    Show,
    Calls,
    Help,
    Quit,
}

impl ReplCommand {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "connect" => Some(Self::Connect),
            "add-file" => Some(Self::AddFile),
            "add-tokens-record" => Some(Self::AddTokensRecord),
            "show" => Some(Self::Show),
            "calls" => Some(Self::Calls),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Runs the interactive demo until `quit` or end of input.
pub async fn run(bootstrap: &AppBootstrap) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Logion demo ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Sandbox: {} identity LOC(s), draft collection: {}, invited collection: {}",
            bootstrap.seed_report.identity_locs.len(),
            yes_no(bootstrap.seed_report.draft_collection.is_some()),
            yes_no(bootstrap.seed_report.invited_collection.is_some()),
        )
        .bright_black()
    );
    println!();
    print_view(&bootstrap.usecase.view().await);

    loop {
        let line = match rl.readline(">> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        let Some(command) = ReplCommand::parse(trimmed) else {
            println!(
                "{}",
                format!("Unknown command '{}'. Type 'help'.", trimmed).bright_black()
            );
            continue;
        };

        if command == ReplCommand::Quit {
            println!("{}", "Goodbye!".bright_green());
            break;
        }

        execute(command, bootstrap).await;
    }

    Ok(())
}

async fn execute(command: ReplCommand, bootstrap: &AppBootstrap) {
    let usecase: &DemoUseCase = &bootstrap.usecase;
    let outcome = match command {
        ReplCommand::Connect => {
            println!("{}", "Connecting...".bright_black());
            usecase.connect().await.map(|_| ())
        }
        ReplCommand::AddFile => {
            if DraftCollectionMutator::can_add_file(&usecase.snapshot().await) {
                println!("{}", "Adding file...".bright_black());
            }
            usecase.add_file().await.map(|_| ())
        }
        ReplCommand::AddTokensRecord => {
            if TokensRecordMutator::can_add_tokens_record(&usecase.snapshot().await) {
                println!("{}", "Adding tokens record...".bright_black());
            }
            usecase.add_tokens_record().await.map(|_| ())
        }
        ReplCommand::Show => Ok(()),
        ReplCommand::Calls => {
            print_calls(&bootstrap.network);
            return;
        }
        ReplCommand::Help => {
            print_help();
            return;
        }
        ReplCommand::Quit => return,
    };

    if let Err(e) = outcome {
        print_error(&e);
    }
    print_view(&usecase.view().await);
}

fn print_view(view: &SessionView) {
    for section in &view.sections {
        println!("{}", section.title.bright_magenta().bold());
        for line in &section.lines {
            println!("  {}", line);
        }
        if let Some((command, label)) = section.action {
            println!("  {} {}", format!("[{}]", command).bright_cyan(), label);
        }
    }
    println!();
}

fn print_error(error: &LogionError) {
    if error.is_action_in_progress() {
        eprintln!("{}", error.to_string().yellow());
    } else {
        eprintln!("{}", format!("Error: {}", error).red());
    }
}

fn print_calls(network: &SandboxNetwork) {
    let calls = network.calls();
    if calls.is_empty() {
        println!("{}", "No SDK calls yet.".bright_black());
        return;
    }
    for (i, call) in calls.iter().enumerate() {
        let line = format!("{:>3}. {:?}", i + 1, call);
        if call.is_mutation() {
            println!("{}", line.green());
        } else {
            println!("{}", line);
        }
    }
}

fn print_help() {
    let help = [
        ("connect", "Derive the account, authenticate and discover records"),
        ("add-file", "Add the next demo file to the draft collection"),
        ("add-tokens-record", "Add a tokens record to the invited collection"),
        ("show", "Show the current screen"),
        ("calls", "List the SDK calls made so far"),
        ("help", "Show this help"),
        ("quit, exit", "Leave the demo"),
    ];
    for (command, description) in help {
        println!("  {:<20} {}", command.bright_cyan(), description);
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse(" connect "), Some(ReplCommand::Connect));
        assert_eq!(ReplCommand::parse("add-file"), Some(ReplCommand::AddFile));
        assert_eq!(
            ReplCommand::parse("add-tokens-record"),
            Some(ReplCommand::AddTokensRecord)
        );
        assert_eq!(ReplCommand::parse("exit"), Some(ReplCommand::Quit));
        assert_eq!(ReplCommand::parse("?"), Some(ReplCommand::Help));
        assert_eq!(ReplCommand::parse("add file"), None);
    }

    #[test]
    fn test_every_listed_command_parses() {
        for command in COMMANDS {
            assert!(ReplCommand::parse(command).is_some(), "{}", command);
        }
    }
}
