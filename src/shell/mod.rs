/// Interactive command shell
///
/// Reads `command,arg,...` lines, hands each one to the dispatcher and
/// writes the reply. Runs over any async reader/writer pair so the same
/// loop serves stdin/stdout and tests.

// Line parsing and arity validation
pub mod command;

// Command routing into the storage layer
pub mod dispatcher;

pub use command::{Command, CommandError};
pub use dispatcher::{DispatchState, Dispatcher, Reply};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Prompt written before each line is read
pub const PROMPT: &str = "Gradebook> ";

/// Run the read-dispatch-print loop until `quit` or end of input
///
/// Answers about the data (not found, duplicate, bad reference, timeout)
/// are printed and the loop continues. A storage fault ends the session
/// and is returned to the caller.
pub async fn run<R, W>(dispatcher: &mut Dispatcher, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while dispatcher.is_running() {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("End of shell input");
            writer.write_all(b"\n").await?;
            break;
        };

        match dispatcher.dispatch(&line).await {
            Ok(reply) => {
                writer.write_all(format!("{}\n", reply).as_bytes()).await?;
                if matches!(reply, Reply::Invalid(_)) {
                    writer
                        .write_all(format!("Commands:\n{}\n", command::usage()).as_bytes())
                        .await?;
                }
            }
            Err(err) if err.is_fatal() => {
                tracing::error!("❌ Storage fault, ending shell session: {}", err);
                writer.write_all(format!("Error: {}\n", err).as_bytes()).await?;
                writer.flush().await?;
                return Err(err.into());
            }
            Err(err) => {
                tracing::warn!("Command failed: {}", err);
                writer.write_all(format!("Error: {}\n", err).as_bytes()).await?;
            }
        }
    }

    writer.flush().await?;
    Ok(())
}
