//! Line stream driver.
//!
//! Reads lines, relays each one on the default channel, and writes one
//! JSON-encoded [`RelayOutcome`](crate::common::messages::RelayOutcome)
//! per line.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::bridge::relay::Relay;
use crate::common::error::Result;

/// Relay every line from `reader` until EOF.
///
/// Returns the number of lines processed. Output is flushed after each
/// line so a downstream reader sees outcomes as they happen.
pub async fn run_lines<R, W>(relay: &Relay, reader: R, writer: &mut W) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut count = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim_end_matches('\r');
        let outcome = relay.handle_default(line);
        let mut encoded = serde_json::to_vec(&outcome)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        count += 1;
    }

    debug!("Input closed after {} line(s)", count);
    Ok(count)
}
