use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};

use api_shared::{ChatService, TranscriptStore};
use pulmo_core::{AssistantService, ConditionCategory};

#[derive(Parser)]
#[command(name = "pulmo")]
#[command(about = "Pediatric pulmonology information assistant")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single description of symptoms
    Ask {
        /// Free-text description, e.g. "my 3-year-old is wheezing at night"
        text: Vec<String>,
    },
    /// List the conditions this assistant can describe
    Conditions,
    /// Show example questions
    Examples,
    /// Start an interactive chat (/clear, /history, /quit)
    Chat {
        /// Turns kept in the on-screen history
        #[arg(long, default_value_t = 200)]
        max_turns: usize,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let assistant = AssistantService::new()?;

    match cli.command {
        Some(Commands::Ask { text }) => {
            println!("{}", assistant.reply(&text.join(" ")).text);
        }
        Some(Commands::Conditions) => {
            let conditions = assistant.list_conditions();
            for (heading, category) in [
                ("Common Conditions:", ConditionCategory::Common),
                ("Specialized Conditions:", ConditionCategory::Specialized),
            ] {
                println!("{heading}");
                for condition in conditions.iter().filter(|c| c.category == category) {
                    println!("- {}", condition.short_label);
                }
                println!();
            }
        }
        Some(Commands::Examples) => {
            println!("Example questions you can ask:");
            for example in assistant.example_questions() {
                println!("- \"{example}\"");
            }
        }
        Some(Commands::Chat { max_turns }) => {
            let chat = ChatService::new(assistant, TranscriptStore::new(max_turns, 1));
            run_chat(&chat, io::stdin().lock(), io::stdout().lock())?;
        }
        None => {
            println!("Use 'pulmo --help' for commands");
        }
    }

    Ok(())
}

/// Interactive loop. Every line is answered independently; the history is display only.
fn run_chat(
    chat: &ChatService,
    input: impl BufRead,
    mut out: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = chat.transcripts().open();
    let session_id = session.to_string();

    writeln!(
        out,
        "Describe your child's symptoms (e.g. 'My 3-year-old has been wheezing and coughing at night')."
    )?;
    writeln!(out, "Commands: /history, /clear, /quit")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        match line.trim() {
            "/quit" | "/exit" => break,
            "/clear" => {
                chat.clear(&session_id)?;
                writeln!(out, "History cleared.")?;
            }
            "/history" => {
                let turns = chat.transcript(&session_id)?;
                if turns.is_empty() {
                    writeln!(out, "No messages yet.")?;
                }
                for turn in turns {
                    writeln!(out, "[{}] you: {}", turn.at.format("%H:%M:%S"), turn.user)?;
                }
            }
            "" => {}
            _ => {
                let outcome = chat.chat(Some(&session_id), &line)?;
                writeln!(out, "\n{}\n", outcome.reply.text)?;
            }
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    Ok(())
}
