//! Stdio bridge: one JSON host event per stdin line in, one JSON command per
//! stdout line out.

use std::io::Write;

use anyhow::{Context, Result};
use minerdeck_core::{HostCommand, HostEvent, HostSink, TileRuntime};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::config::Config;

pub async fn run(config: &Config) -> Result<()> {
    let client = super::pool_client(config)?;
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let reader = tokio::spawn(read_events(BufReader::new(tokio::io::stdin()), events_tx));

    tracing::info!("minerdeck bridge started");
    let mut runtime = TileRuntime::new(client, JsonLinesSink::new(std::io::stdout()));
    runtime.run(events_rx).await?;

    reader.await.context("stdin reader task failed")??;
    tracing::info!("host closed stdin; exiting");
    Ok(())
}

/// Forwards parsed events until EOF or until the runtime stops listening.
async fn read_events<R>(reader: R, events: mpsc::UnboundedSender<HostEvent>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match parse_line(line) {
            Ok(event) => {
                if events.send(event).is_err() {
                    break;
                }
            }
            Err(Rejected::Unhandled(event)) => {
                tracing::debug!(%event, "ignoring unhandled host event");
            }
            Err(Rejected::Malformed(err)) => {
                tracing::warn!(error = %err, "ignoring malformed host line");
            }
        }
    }
    Ok(())
}

/// Why a stdin line produced no event.
#[derive(Debug)]
enum Rejected {
    /// Well-formed event of a kind the tile does not handle.
    Unhandled(String),
    /// Not JSON, no `event` name, or a known event with bad fields.
    Malformed(serde_json::Error),
}

fn parse_line(line: &str) -> Result<HostEvent, Rejected> {
    HostEvent::from_json(line).map_err(|err| {
        let name = serde_json::from_str::<Value>(line)
            .ok()
            .and_then(|value| value.get("event")?.as_str().map(str::to_string));
        match name {
            Some(name) if !HostEvent::NAMES.contains(&name.as_str()) => Rejected::Unhandled(name),
            _ => Rejected::Malformed(err),
        }
    })
}

/// Writes each command as a single JSON line and flushes.
pub struct JsonLinesSink<W> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> HostSink for JsonLinesSink<W> {
    fn send(&mut self, command: HostCommand) -> Result<()> {
        let line = serde_json::to_string(&command.to_wire()).context("encode host command")?;
        writeln!(self.out, "{line}").context("Failed to write to host")?;
        self.out.flush().context("Failed to flush host output")
    }
}
