//! Pigheaded -- an interactive Pig table against a language-model opponent.
//!
//! Reads commands from stdin (`roll`, `hold`, `new`, `quit`) and renders
//! the table to stdout after every event. The computer's turns play out
//! automatically between commands.

use std::io::Write;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;

use pigheaded::advisor::{Advisor, AnyAdvisor, DEFAULT_MODEL};
use pigheaded::engine::Engine;
use pigheaded::game::Player;
use pigheaded::session::{Session, Timing};
use pigheaded::ui;

#[derive(Parser)]
#[command(name = "pigheaded", about = "Play Pig against a language-model opponent", version)]
struct Args {
    /// Fixed RNG seed for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Skip the presentation delays.
    #[arg(long)]
    fast: bool,

    /// Gemini API key. Without one, a deterministic local policy plays.
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model id.
    #[arg(long, default_value = DEFAULT_MODEL)]
    model: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr so the table on stdout stays clean.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let advisor = AnyAdvisor::select(args.api_key, args.model);
    let engine = match args.seed {
        Some(seed) => Engine::with_seed(seed),
        None => Engine::new(),
    };
    let timing = if args.fast {
        Timing::INSTANT
    } else {
        Timing::default()
    };
    let mut session = Session::with_engine(engine, advisor, timing);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", ui::render(&session.view()));

    loop {
        let state = session.state();
        if state.active_player == Player::Computer && !state.is_finished() {
            if computer_turn(&mut session).await {
                continue;
            }
            // The cycle declined to start; fall through to the prompt so
            // `new` and `quit` stay reachable.
        }

        let Some(line) = prompt(&mut lines).await else {
            break;
        };

        match line.trim() {
            "" => continue,
            "roll" | "r" => {
                if session.human_roll().await.is_none() {
                    eprintln!("roll is not available right now");
                    continue;
                }
            }
            "hold" | "h" => {
                if session.human_hold().is_none() {
                    eprintln!("hold is not available right now");
                    continue;
                }
            }
            "new" | "n" => session.new_game(),
            "quit" | "q" => break,
            other => {
                eprintln!("unknown command: {} (try roll, hold, new, quit)", other);
                continue;
            }
        }

        println!("{}", ui::render(&session.view()));
    }
}

/// Plays one computer decision cycle and renders the result. Returns
/// false if the cycle declined to start.
async fn computer_turn<A: Advisor>(session: &mut Session<A>) -> bool {
    println!("Gemini is thinking...");
    let Some(action) = session.plan_computer_action().await else {
        return false;
    };
    if let Some(reasoning) = session.view().reasoning {
        println!("Gemini: \"{}\"", reasoning);
    }
    session.execute(action).await;
    println!("{}", ui::render(&session.view()));
    true
}

/// Prints the prompt and reads the next command line. `None` on EOF.
async fn prompt(lines: &mut Lines<BufReader<Stdin>>) -> Option<String> {
    print!("> ");
    let _ = std::io::stdout().flush();
    lines.next_line().await.ok().flatten()
}
