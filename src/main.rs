use crate::console::{Console, MenuChoice};
use crate::hotel::hotel::Hotel;
use clap::Parser;
use env_logger::Env;
use rustyline::completion::{Completer, Pair};
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::path::PathBuf;

mod console;
mod customer;
mod error;
mod food;
mod hotel;
mod money;
mod room;

#[derive(Parser)]
#[command(version, about = "Book And Stay front desk")]
struct Args {
    /// JSON file with `rooms` and `menu`; the built-in inventory is used when omitted
    #[arg(short, long, value_name = "FILE")]
    inventory: Option<PathBuf>,

    /// Default log filter, RUST_LOG takes precedence
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();

        Ok((0, candidates))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    env_logger::init_from_env(Env::default().default_filter_or(args.log_level.as_str()));

    let hotel = match &args.inventory {
        Some(path) => {
            let hotel = Hotel::load_from_file(path)?;
            println!("Front desk open. Loaded inventory from {}", path.display());
            hotel
        }
        None => Hotel::default(),
    };

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: MenuChoice::ALL
            .iter()
            .map(|c| c.command().to_string())
            .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    Console::new(rl, hotel).run()?;
    Ok(())
}
