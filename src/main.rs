use std::io::stdout;
use std::sync::Arc;

use anyhow::Result;
use dotenv::dotenv;
use log::{error, info, warn};
use tokio::io::{stdin, AsyncBufReadExt, BufReader};

use ask_client::{
    Attempt, ClientConfig, HttpTransport, InteractionClient, SkipReason, TerminalSurface,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize environment
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting ask client");

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let surface = Arc::new(TerminalSurface::new(stdout(), config.transcript));
    let client = InteractionClient::new(config, Arc::new(HttpTransport::new()), surface.clone())?;

    surface.prompt();
    let mut lines = BufReader::new(stdin()).split(b'\n');
    while let Some(bytes) = lines.next_segment().await? {
        let line = decode_line(&bytes);
        if line.trim() == "/quit" {
            break;
        }
        // blank lines are skipped without touching the surface, so re-prompt here
        if client.submit(&line).await == Attempt::Skipped(SkipReason::Empty) {
            surface.prompt();
        }
    }

    info!("Bye");
    Ok(())
}

// invalid UTF-8 is replaced rather than ending the session
fn decode_line(bytes: &[u8]) -> String {
    let line = String::from_utf8_lossy(bytes);
    if line.contains(char::REPLACEMENT_CHARACTER) {
        warn!("Input line was not valid UTF-8, replacing invalid bytes");
    }
    line.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_utf8_is_replaced_not_fatal() {
        assert_eq!(decode_line(b"hi\r"), "hi\r");
        assert_eq!(decode_line(b"caf\xc3\xa9"), "caf\u{e9}");
        assert_eq!(decode_line(b"bad \xff byte"), "bad \u{fffd} byte");
    }
}
