//! Line-oriented interactive session.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use super::command::Command;
use super::responder::Responder;
use crate::telemetry::gather_metrics;
use crate::Result;

const HELP: &str = "Commands:
  status       show what has been learned so far
  status json  same, as JSON
  metrics      show scan metrics
  help         show this list
  quit, exit   stop scanning and leave
Anything else gets a reply based on the learned knowledge.";

const PROMPT: &[u8] = b"\nyou> ";

/// Run the session until `quit`, end of input, or `shutdown` fires.
///
/// `shutdown` is cancelled on the way out so the scheduler sharing the
/// token stops as well.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run_session<R, W>(
    reader: R,
    mut writer: W,
    responder: &Responder,
    shutdown: &CancellationToken,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(b"autoscan interactive mode. Type 'status' for knowledge, 'quit' to exit.\n")
        .await?;

    let mut lines = reader.lines();

    loop {
        writer.write_all(PROMPT).await?;
        writer.flush().await?;

        let line = tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::debug!("Input closed");
            break;
        };

        let reply = match Command::parse(&line) {
            Command::Empty => continue,
            Command::Quit => {
                writer.write_all(b"Stopping background scanning.\n").await?;
                break;
            }
            Command::Status => responder.summary().to_string(),
            Command::StatusJson => responder.summary().to_json()?,
            Command::Metrics => gather_metrics(),
            Command::Help => HELP.to_string(),
            Command::Ask(text) => responder.respond(&text),
        };

        writer.write_all(reply.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }

    writer.flush().await?;
    shutdown.cancel();
    Ok(())
}
