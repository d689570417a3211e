use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use watchlog_client::api::HttpMediaService;
use watchlog_client::app::{App, Command, Flow, HELP};
use watchlog_core::model::MediaItem;

const DEFAULT_API_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    // stdout carries the views; logs go to stderr.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "watchlog_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // --- Configuration ---
    let api_url = std::env::var("WATCHLOG_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
    tracing::info!(api_url = %api_url, "Starting watchlog client");

    let service =
        HttpMediaService::new(&api_url).context("Failed to build the HTTP client")?;
    let mut app = App::new(service);

    app.start().await;
    println!("{}", app.render());
    println!("Type `help` for commands.");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        let show_help = command == Command::Help;

        let mut confirm = |item: &MediaItem| prompt_delete(&stdin, item);
        if app.execute(command, &mut confirm).await == Flow::Quit {
            break;
        }

        if show_help {
            println!("{HELP}");
        } else {
            println!("{}", app.render());
        }
    }

    tracing::info!("Client exiting");
    Ok(())
}

fn prompt_delete(stdin: &io::Stdin, item: &MediaItem) -> bool {
    print!("Delete \"{}\"? [y/N] ", item.title);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match stdin.lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim(), "y" | "Y" | "yes"),
        Err(_) => false,
    }
}
