use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use trivia_rush::config::Config;
use trivia_rush::fetch::{BackoffPolicy, FetchEvent};
use trivia_rush::game::MAX_QUESTIONS;
use trivia_rush::session::{CategoryChange, TriviaSession};
use trivia_rush::trivia::{load_categories, CategoryId, QuestionSource, TriviaClient};

/// Terminal trivia quiz backed by Open Trivia DB.
#[derive(Debug, Parser)]
#[command(name = "trivia", version)]
struct Args {
    /// Config file (default: platform config dir/trivia/config.toml).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Category id to play (see --list-categories).
    #[arg(long)]
    category: Option<u32>,

    /// Override the API base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Print available categories and exit.
    #[arg(long)]
    list_categories: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("loading configuration")?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    if let Some(category) = args.category {
        config.game.category = Some(CategoryId(category));
    }
    config.validate().context("validating configuration")?;

    let client: Arc<dyn QuestionSource> =
        Arc::new(TriviaClient::new(&config.api).context("building trivia client")?);

    if args.list_categories {
        for category in load_categories(client.as_ref()).await {
            println!("{:>3}  {}", category.id, category.name);
        }
        return Ok(());
    }

    let policy = BackoffPolicy::from(&config.retry);
    let mut session = TriviaSession::new(client, policy, config.game.category);
    run(&mut session).await
}

async fn run(session: &mut TriviaSession) -> anyhow::Result<()> {
    println!("Commands: 1-4 answer, n next, r try again, c <id|all> category, reset, q quit");
    if let Some(event) = session.on_mount() {
        render_event(session, &event);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            event = session.next_event() => match event {
                Some(event) => render_event(session, &event),
                None => break,
            },
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else { break };
                if !handle_command(session, line.trim()) {
                    break;
                }
            }
        }
    }

    session.shutdown();
    Ok(())
}

/// Returns `false` when the player quits.
fn handle_command(session: &mut TriviaSession, input: &str) -> bool {
    if session.game().is_confirming_category() {
        match input {
            "y" | "yes" => {
                if let Some(event) = session.confirm_category_change() {
                    render_event(session, &event);
                }
            }
            _ => {
                session.cancel_category_change();
                println!("Category unchanged.");
            }
        }
        return true;
    }

    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("q"), _) | (Some("quit"), _) => return false,
        (Some("n"), _) => match session.on_user_requested_next() {
            Some(event) => render_event(session, &event),
            None if session.game().completed => {
                println!("The game is over. Type reset to play again.")
            }
            None if session.game().can_submit() => println!("Answer the question first."),
            None => {}
        },
        (Some("r"), _) => {
            if let Some(event) = session.on_try_again() {
                render_event(session, &event);
            }
        }
        (Some("reset"), _) => {
            if let Some(event) = session.on_reset() {
                render_event(session, &event);
            }
        }
        (Some("c"), Some(arg)) => {
            let category = match arg {
                "all" => None,
                id => match id.parse::<u32>() {
                    Ok(id) => Some(CategoryId(id)),
                    Err(_) => {
                        println!("Unknown category '{}'.", id);
                        return true;
                    }
                },
            };
            match session.on_category_changed(category) {
                CategoryChange::AwaitingConfirmation => {
                    println!("Changing category resets your progress. Continue? (y/n)")
                }
                CategoryChange::Started(Some(event)) => render_event(session, &event),
                CategoryChange::Started(None) => {}
            }
        }
        (Some(choice), None) => match choice.parse::<usize>() {
            Ok(n) if n >= 1 => answer(session, n - 1),
            _ => println!("Unknown command '{}'.", choice),
        },
        _ => {}
    }
    true
}

fn answer(session: &mut TriviaSession, index: usize) {
    let Some(choice) = session
        .game()
        .current
        .as_ref()
        .and_then(|c| c.answers.get(index).cloned())
    else {
        println!("No such answer.");
        return;
    };

    let Some(feedback) = session.on_answer(&choice) else {
        println!("Already answered. Press n for the next question.");
        return;
    };

    if feedback.is_correct {
        println!("Correct! +{} points!", feedback.score_delta);
    } else {
        println!("Wrong! The correct answer was: {}", feedback.correct_answer);
    }

    let game = session.game();
    println!(
        "Score: {} | Streak: {} | Correct: {} | Incorrect: {}",
        game.stats.score, game.stats.streak, game.stats.correct_answers, game.stats.incorrect_answers,
    );
    println!(
        "[{}] {:.2}/{}",
        progress_bar(game.progress.fraction()),
        game.progress.value(),
        MAX_QUESTIONS
    );
    if game.completed {
        println!("You finished the game with {} points! Type reset to play again.", game.stats.score);
    }
}

fn progress_bar(fraction: f64) -> String {
    const WIDTH: usize = 24;
    let filled = ((fraction * WIDTH as f64).round() as usize).min(WIDTH);
    format!("{}{}", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

fn render_event(session: &TriviaSession, event: &FetchEvent) {
    match event {
        FetchEvent::Loading { attempt: 0 } => println!("Loading question..."),
        FetchEvent::Loading { attempt } => println!(
            "Loading question (Attempt {}/{})",
            attempt,
            session.fetch().max_retries()
        ),
        FetchEvent::RetryScheduled { delay, reason, .. } => {
            println!("{} ({}s)", reason.user_message(), delay.as_secs_f32().round())
        }
        FetchEvent::Failed(error) => println!("{} (r to try again)", error.user_message()),
        FetchEvent::QuestionReady(_) => {
            if let Some(current) = &session.game().current {
                println!();
                println!(
                    "[{} | {}] {}",
                    current.question.category(),
                    current.question.difficulty(),
                    current.question.text()
                );
                for (i, answer) in current.answers.iter().enumerate() {
                    println!("  {}. {}", i + 1, answer);
                }
                println!("Choose 1-{}:", current.question.answer_count());
            }
        }
    }
}
