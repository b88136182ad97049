use clap::Parser;
use mixtape::api::{Durability, MixtapeApi};
use mixtape::config::BotConfig;
use mixtape::error::Result;
use mixtape::router::{Event, Router};
use mixtape::store::fs::FileStore;
use std::io::{self, BufRead};

mod args;
mod console;

use args::Cli;
use console::ConsoleTransport;

const BOT_USERNAME: &str = "mixtape_bot";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => BotConfig::load(path)?,
        None => BotConfig::default(),
    };
    if let Some(data_file) = &cli.data_file {
        config.data_file = data_file.clone();
    }
    if cli.strict {
        config.strict_durability = true;
    }

    let durability = if config.strict_durability {
        Durability::Strict
    } else {
        Durability::BestEffort
    };
    let api = MixtapeApi::load(FileStore::new(&config.data_file)).with_durability(durability);
    let transport = ConsoleTransport::new(BOT_USERNAME);
    let mut router = Router::new(api, transport, config.share_host.clone());

    // One console session maps to one conversation: each line becomes a
    // transport event for the configured user and chat.
    //   /start [payload]      start event, optionally with a deep link
    //   audio <id> [name]     an audio-bearing message
    //   cb <data>             an inline button press
    //   quit                  end the session
    // Anything else is a plain text message.
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(event) = parse_line(line, cli.chat, &cli.user) else {
            break;
        };
        router.handle(event)?;
    }
    Ok(())
}

/// Map a console line to a transport event; `None` ends the session.
fn parse_line(line: &str, chat: i64, user: &str) -> Option<Event> {
    if line == "quit" || line == "exit" {
        return None;
    }
    let event = if let Some(rest) = strip_command(line, "/start") {
        let payload = rest.trim();
        Event::Start {
            chat,
            user: user.to_string(),
            payload: (!payload.is_empty()).then(|| payload.to_string()),
        }
    } else if let Some(rest) = line.strip_prefix("audio ") {
        let mut parts = rest.trim().splitn(2, ' ');
        let file_id = parts.next().unwrap_or_default().to_string();
        Event::Audio {
            chat,
            user: user.to_string(),
            file_id,
            file_name: parts.next().map(|name| name.trim().to_string()),
        }
    } else if let Some(data) = line.strip_prefix("cb ") {
        Event::Callback {
            chat,
            user: user.to_string(),
            data: data.trim().to_string(),
        }
    } else {
        Event::Text {
            chat,
            user: user.to_string(),
            text: line.to_string(),
        }
    };
    Some(event)
}

/// Exact command match: `/started` is an ordinary text message, not
/// `/start` with a payload.
fn strip_command<'a>(line: &'a str, command: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(command)?;
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_lines_parse_exactly() {
        match parse_line("/start", 1, "u") {
            Some(Event::Start { payload: None, .. }) => {}
            other => panic!("Expected bare start, got {:?}", other),
        }
        match parse_line("/start playlist_abc", 1, "u") {
            Some(Event::Start {
                payload: Some(payload),
                ..
            }) => assert_eq!(payload, "playlist_abc"),
            other => panic!("Expected deep-linked start, got {:?}", other),
        }
        // A run-on token is plain text, not a start command.
        match parse_line("/started", 1, "u") {
            Some(Event::Text { text, .. }) => assert_eq!(text, "/started"),
            other => panic!("Expected text, got {:?}", other),
        }
    }

    #[test]
    fn audio_and_callback_lines_parse() {
        match parse_line("audio A x.mp3", 1, "u") {
            Some(Event::Audio {
                file_id, file_name, ..
            }) => {
                assert_eq!(file_id, "A");
                assert_eq!(file_name.as_deref(), Some("x.mp3"));
            }
            other => panic!("Expected audio, got {:?}", other),
        }
        match parse_line("cb view_playlist:Chill", 1, "u") {
            Some(Event::Callback { data, .. }) => assert_eq!(data, "view_playlist:Chill"),
            other => panic!("Expected callback, got {:?}", other),
        }
        assert!(parse_line("quit", 1, "u").is_none());
    }
}
