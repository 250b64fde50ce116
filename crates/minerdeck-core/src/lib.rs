//! Mining pool status tile.
//!
//! Host lifecycle events go in, rendered 144×144 tile images come out.
//! The [`tile::StatusTile`] reducer owns all state; the [`runtime::TileRuntime`]
//! executes the effects it returns (host commands and pool fetches).

pub mod error;
pub mod pool;
pub mod protocol;
pub mod render;
pub mod runtime;
pub mod settings;
pub mod stats;
pub mod tile;

pub use error::RefreshError;
pub use protocol::{HostCommand, HostEvent, TileContext};
pub use runtime::{HostSink, TileRuntime};
pub use settings::{PoolTarget, TileSettings};
pub use tile::StatusTile;
