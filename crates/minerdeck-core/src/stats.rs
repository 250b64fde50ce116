//! Dashboard normalization and display formatting.

use serde::Deserialize;

use crate::pool::{DashboardData, DashboardResponse, PoolError};

const MEGAHASHES_PER_HASH: f64 = 1e-6;
const ETH_PER_SMALLEST_UNIT: f64 = 1e-18;
const HASHRATE_DIGITS: usize = 2;
const UNPAID_DIGITS: usize = 4;
/// Digits expanded past the rounding position. A double that is not an
/// exact tie differs from one well before this many places.
const GUARD_DIGITS: usize = 30;

/// One point-in-time read of a miner's dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsSnapshot {
    pub hashrate_mhs: f64,
    pub unpaid_eth: f64,
    pub active_workers: u64,
    pub total_workers: usize,
}

/// Display strings for the three tile rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedStats {
    pub hashrate: String,
    pub unpaid: String,
    pub workers: String,
}

impl StatsSnapshot {
    /// Normalizes the `data` section of a dashboard response.
    ///
    /// # Errors
    /// Returns a `MalformedPayload` error when any nested field is missing
    /// or has the wrong type.
    pub fn from_dashboard(response: &DashboardResponse) -> Result<Self, PoolError> {
        let data = DashboardData::deserialize(&response.data).map_err(|err| PoolError::malformed(&err))?;
        let stats = data.current_statistics;
        Ok(Self {
            hashrate_mhs: stats.current_hashrate * MEGAHASHES_PER_HASH,
            unpaid_eth: stats.unpaid * ETH_PER_SMALLEST_UNIT,
            active_workers: stats.active_workers,
            total_workers: data.workers.len(),
        })
    }

    pub fn formatted(&self) -> FormattedStats {
        FormattedStats {
            hashrate: format!("{} MH/s", to_fixed(self.hashrate_mhs, HASHRATE_DIGITS)),
            unpaid: format!("{} ETH", to_fixed(self.unpaid_eth, UNPAID_DIGITS)),
            workers: format!("{}/{}", self.active_workers, self.total_workers),
        }
    }
}

/// Normalizes and formats in one step.
///
/// # Errors
/// See [`StatsSnapshot::from_dashboard`].
pub fn format_dashboard(response: &DashboardResponse) -> Result<FormattedStats, PoolError> {
    StatsSnapshot::from_dashboard(response).map(|snapshot| snapshot.formatted())
}

/// Formats `value` with `digits` decimals, rounding exact ties away from
/// zero like `Number.prototype.toFixed`. `{:.N}` would round them to even.
fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value < 0.0 { "-Infinity" } else { "Infinity" };
        return text.to_string();
    }

    let expanded = format!("{:.*}", digits + GUARD_DIGITS, value.abs());
    let (int_part, frac_part) = expanded.split_once('.').unwrap_or((expanded.as_str(), ""));
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .collect();
    let mut int_len = int_part.len();

    if frac_part.as_bytes().get(digits).is_some_and(|digit| *digit >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, b'1');
            int_len += 1;
        }
    }

    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (i, digit) in kept.iter().enumerate() {
        if i == int_len {
            out.push('.');
        }
        out.push(char::from(*digit));
    }
    out
}
