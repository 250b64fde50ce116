//! Tile effect types.
//!
//! Effects are returned by [`StatusTile::update`](super::StatusTile::update)
//! and executed by the runtime. The tile never talks to the host or the
//! network itself.

use super::RequestId;
use crate::protocol::{HostCommand, TileContext};
use crate::settings::PoolTarget;

#[derive(Debug, Clone, PartialEq)]
pub enum TileEffect {
    /// Send a command to the host.
    Host(HostCommand),
    /// Fetch the dashboard and report back with `TileEvent::StatsLoaded`.
    FetchStats {
        req: RequestId,
        context: TileContext,
        target: PoolTarget,
    },
}
