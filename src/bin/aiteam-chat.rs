//! Interactive chat REPL for AI Team agents.
//!
//! Each line runs a full round trip against the current agent's DM channel:
//! a thread is created with the message as its title and polled until the
//! agent replies or the timeout expires.
//!
//! # Usage
//!
//! ```bash
//! # Chat with the default agent
//! aiteam-chat
//!
//! # Pick an agent and a longer timeout
//! aiteam-chat --agent security-engineer --timeout 300
//! ```
//!
//! # Commands
//!
//! While chatting, you can use slash commands:
//! - `/agent <id>` - Switch to another agent
//! - `/timeout <seconds>` - Change the response timeout
//! - `/raw on|off` - Show full thread JSON instead of the text reply
//! - `/help` - Show available commands
//! - `/quit` - Exit the application

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use aiteam::chat::{ChatArgs, ChatCommand, help_text, parse_command};
use aiteam::render::{ANSI_CYAN, ANSI_DIM, ANSI_RESET};
use aiteam::{
    AiTeam, ClientOptions, Credentials, Error, Result, RoundTripConfig, dm_channel, send_and_await,
};

const DEFAULT_AGENT: &str = "sre";

#[tokio::main]
async fn main() -> Result<()> {
    let (args, _) = ChatArgs::from_command_line_relaxed("aiteam-chat [OPTIONS]");
    let use_color = !args.no_color;

    let overrides = Credentials {
        org_id: args.org_id.clone(),
        jwt: args.jwt.clone(),
        ..Credentials::default()
    };
    let creds = Credentials::resolve(overrides, args.env_file.as_deref().map(Path::new))?;
    let org_id = creds.require_org_id()?.to_string();
    let jwt = creds.jwt.clone().ok_or_else(|| {
        Error::authentication("no JWT found; set ED_JWT, pass --jwt, or run 'aiteam login' first")
    })?;
    let client = AiTeam::with_options(org_id, Some(jwt), ClientOptions::default())?;

    let mut agent_id = args.agent.clone().unwrap_or_else(|| DEFAULT_AGENT.to_string());
    let mut config = RoundTripConfig::default();
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    let mut raw = false;

    let mut rl = DefaultEditor::new().map_err(|e| {
        Error::io(
            format!("failed to initialize line editor: {e}"),
            std::io::Error::other(e),
        )
    })?;

    // Flag for abandoning an in-flight wait; the remote thread keeps running.
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.store(true, Ordering::Relaxed);
    })
    .map_err(|e| Error::validation(format!("failed to set Ctrl-C handler: {e}"), None))?;

    println!("AI Team Chat (agent: {agent_id})");
    println!("Type /help for commands, /quit to exit\n");

    loop {
        interrupted.store(false, Ordering::Relaxed);

        let readline = rl.readline("You: ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if let Some(cmd) = parse_command(line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {line}");
                            }
                        }
                        ChatCommand::Agent(agent) => {
                            agent_id = agent;
                            println!("Now chatting with: {agent_id}");
                        }
                        ChatCommand::Timeout(seconds) => {
                            config = config.with_timeout(Duration::from_secs(seconds));
                            println!("Response timeout set to {seconds}s");
                        }
                        ChatCommand::Raw(value) => {
                            raw = value;
                            println!("Raw output {}", if raw { "enabled" } else { "disabled" });
                        }
                        ChatCommand::Invalid(message) => {
                            eprintln!("{message}");
                        }
                    }
                    continue;
                }

                if use_color {
                    println!("{ANSI_DIM}Sending to {agent_id}...{ANSI_RESET}");
                } else {
                    println!("Sending to {agent_id}...");
                }

                let channel = dm_channel(&agent_id);
                let wait = send_and_await(&client, &channel, line, config);
                tokio::select! {
                    result = wait => match result {
                        Ok(result) => {
                            if raw {
                                match serde_json::to_string_pretty(&result.thread) {
                                    Ok(json) => println!("{json}"),
                                    Err(err) => eprintln!("Error: {err}"),
                                }
                            } else if use_color {
                                println!("\n{ANSI_CYAN}Agent:{ANSI_RESET} {}", result.first_text_reply());
                            } else {
                                println!("\nAgent: {}", result.first_text_reply());
                            }
                        }
                        Err(err) => eprintln!("Error: {err}"),
                    },
                    _ = watch_interrupt(interrupted.clone()) => {
                        // The round trip is abandoned; the remote thread continues.
                        println!("\n[interrupted]");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                eprintln!("Input error: {err}");
                break;
            }
        }
    }

    Ok(())
}

async fn watch_interrupt(flag: Arc<AtomicBool>) {
    while !flag.load(Ordering::Relaxed) {
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
