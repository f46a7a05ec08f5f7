// console/listener.rs

use crate::console::command_handler::handle_command;
use crate::console::{Reply, Session};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{info, warn};

/// Reads commands from stdin line by line until `quit` or end of input.
pub async fn listen_for_commands(session: &mut Session) -> io::Result<()> {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut stdout = io::stdout();

    stdout.write_all(b"Type 'help' for the list of commands.\n> ").await?;
    stdout.flush().await?;

    while let Some(line) = lines.next_line().await? {
        match handle_command(&line, session).await {
            Reply::Text(text) => {
                if !text.is_empty() {
                    stdout.write_all(text.as_bytes()).await?;
                    stdout.write_all(b"\n").await?;
                }
            }
            Reply::Quit => {
                info!("Quit requested");
                return Ok(());
            }
        }
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;
    }

    warn!("stdin closed, exiting");
    Ok(())
}
