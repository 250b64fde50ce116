//! Tile runtime - owns the tile, executes its effects.
//!
//! All tile state is mutated from this loop only. Pool fetches run as
//! spawned tasks and post `TileEvent::StatsLoaded` back to the inbox, so
//! host events keep flowing while a request is outstanding.

use anyhow::Result;
use tokio::sync::mpsc;

use crate::pool::PoolClient;
use crate::protocol::{HostCommand, HostEvent, TileContext};
use crate::settings::PoolTarget;
use crate::tile::{RequestId, StatusTile, TileEffect, TileEvent};

/// Destination for host commands.
pub trait HostSink {
    /// Delivers one command to the host.
    ///
    /// # Errors
    /// Returns an error if the host connection is gone.
    fn send(&mut self, command: HostCommand) -> Result<()>;
}

impl HostSink for Vec<HostCommand> {
    fn send(&mut self, command: HostCommand) -> Result<()> {
        self.push(command);
        Ok(())
    }
}

pub struct TileRuntime<S> {
    tile: StatusTile,
    client: PoolClient,
    sink: S,
    inbox_tx: mpsc::UnboundedSender<TileEvent>,
    inbox_rx: mpsc::UnboundedReceiver<TileEvent>,
    in_flight: usize,
}

impl<S: HostSink> TileRuntime<S> {
    pub fn new(client: PoolClient, sink: S) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            tile: StatusTile::new(),
            client,
            sink,
            inbox_tx,
            inbox_rx,
            in_flight: 0,
        }
    }

    pub fn tile(&self) -> &StatusTile {
        &self.tile
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Number of fetches whose results have not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Runs one event through the tile and executes the resulting effects.
    ///
    /// # Errors
    /// Returns an error if the host sink rejects a command.
    pub fn dispatch(&mut self, event: TileEvent) -> Result<()> {
        if matches!(event, TileEvent::StatsLoaded { .. }) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        let effects = self.tile.update(event);
        for effect in effects {
            self.execute_effect(effect)?;
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: TileEffect) -> Result<()> {
        match effect {
            TileEffect::Host(command) => self.sink.send(command),
            TileEffect::FetchStats {
                req,
                context,
                target,
            } => {
                self.spawn_fetch(req, context, target);
                Ok(())
            }
        }
    }

    fn spawn_fetch(&mut self, req: RequestId, context: TileContext, target: PoolTarget) {
        let client = self.client.clone();
        let inbox = self.inbox_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let result = client.fetch_dashboard(&target).await;
            // Only fails once the runtime itself is gone.
            let _ = inbox.send(TileEvent::StatsLoaded {
                req,
                context,
                result,
            });
        });
    }

    /// Waits for every outstanding fetch and applies its result.
    ///
    /// # Errors
    /// Returns an error if the host sink rejects a command.
    pub async fn settle(&mut self) -> Result<()> {
        while self.in_flight > 0 {
            let Some(event) = self.inbox_rx.recv().await else {
                break;
            };
            self.dispatch(event)?;
        }
        Ok(())
    }

    /// Processes host events until `events` closes, then lets outstanding
    /// fetches finish.
    ///
    /// # Errors
    /// Returns an error if the host sink rejects a command.
    pub async fn run(&mut self, mut events: mpsc::UnboundedReceiver<HostEvent>) -> Result<()> {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.dispatch(event.into())?,
                    None => break,
                },
                Some(event) = self.inbox_rx.recv() => self.dispatch(event)?,
            }
        }
        tracing::debug!(in_flight = self.in_flight, "host closed; settling");
        self.settle().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SettingsPayload;
    use crate::settings::TileSettings;

    #[tokio::test]
    async fn test_unconfigured_tile_spawns_nothing() {
        let mut runtime = TileRuntime::new(PoolClient::new(), Vec::new());
        runtime
            .dispatch(TileEvent::Host(HostEvent::WillAppear {
                context: TileContext::new("tile"),
                payload: Some(SettingsPayload {
                    settings: Some(TileSettings::default()),
                }),
            }))
            .unwrap();

        assert_eq!(runtime.in_flight(), 0);
        runtime.settle().await.unwrap();
        assert!(runtime.sink().is_empty());
    }

    #[tokio::test]
    async fn test_run_returns_when_host_closes() {
        let mut runtime = TileRuntime::new(PoolClient::new(), Vec::new());
        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(HostEvent::Connected).unwrap();
        drop(tx);

        runtime.run(rx).await.unwrap();
        assert!(runtime.into_sink().is_empty());
    }

    struct ClosedHost;

    impl HostSink for ClosedHost {
        fn send(&mut self, _command: HostCommand) -> Result<()> {
            anyhow::bail!("host went away")
        }
    }

    #[tokio::test]
    async fn test_sink_error_propagates() {
        let mut runtime = TileRuntime::new(PoolClient::new(), ClosedHost);
        let err = runtime
            .dispatch(TileEvent::Host(HostEvent::WillAppear {
                context: TileContext::new("tile"),
                payload: Some(SettingsPayload {
                    settings: Some(TileSettings::new("abc", "http://127.0.0.1:9")),
                }),
            }))
            .unwrap_err();
        assert!(err.to_string().contains("host went away"));
        assert_eq!(runtime.in_flight(), 0);
    }
}
