//! Time, clock sequence and node identifier sources for time-based (v1) UUIDs.
//!
//! A v1 UUID packs a 60-bit timestamp (100ns ticks since 1582-10-15), a 14-bit clock sequence
//! and a 48-bit node identifier.
//!
//! # Monotonicity Guarantee
//!
//! [`V1Clock::next_ticks`] never returns the same tick twice. If the wall clock has not
//! advanced past the previous tick (a tight loop, or a coarse system clock), the previous tick
//! plus one is used instead. Successive v1 values from one generator therefore never collide.

use crate::constants::GREGORIAN_OFFSET_TICKS;
use chrono::{DateTime, Utc};
use rand::Rng;

const TICK_MASK: u64 = 0x0FFF_FFFF_FFFF_FFFF;
const CLOCK_SEQ_MASK: u16 = 0x3FFF;

/// Source of wall-clock time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Where the node identifier of a [`V1Clock`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeSource {
    /// A hardware address exposed by the host.
    Hardware,
    /// Random bits with the multicast bit set.
    Random,
}

/// Per-process state for v1 generation.
#[derive(Clone, Debug)]
pub struct V1Clock {
    last_ticks: Option<u64>,
    clock_seq: u16,
    node: [u8; 6],
    node_source: NodeSource,
}

impl Default for V1Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl V1Clock {
    /// Creates a clock with a random clock sequence and the host's node identifier, falling back
    /// to a random multicast node when the host exposes no hardware address.
    pub fn new() -> Self {
        let (node, node_source) = match host_node_id() {
            Some(node) => (node, NodeSource::Hardware),
            None => (random_node_id(), NodeSource::Random),
        };
        tracing::debug!(?node_source, "v1 node identifier selected");

        Self::with_parts(rand::thread_rng().gen(), node, node_source)
    }

    /// Creates a clock from explicit parts. The clock sequence is truncated to 14 bits.
    pub fn with_parts(clock_seq: u16, node: [u8; 6], node_source: NodeSource) -> Self {
        Self {
            last_ticks: None,
            clock_seq: clock_seq & CLOCK_SEQ_MASK,
            node,
            node_source,
        }
    }

    /// Returns the 60-bit tick count for `now`, strictly greater than the previous call's.
    pub fn next_ticks(&mut self, now: DateTime<Utc>) -> u64 {
        let ticks = ticks_since_gregorian(now);

        let ticks = match self.last_ticks {
            Some(prev) if ticks <= prev => (prev + 1) & TICK_MASK,
            _ => ticks,
        };

        self.last_ticks = Some(ticks);
        ticks
    }

    /// The 14-bit clock sequence.
    pub fn clock_seq(&self) -> u16 {
        self.clock_seq
    }

    /// The 48-bit node identifier.
    pub fn node(&self) -> [u8; 6] {
        self.node
    }

    pub fn node_source(&self) -> NodeSource {
        self.node_source
    }
}

/// Converts a UTC instant to 100ns ticks since the Gregorian reform, masked to 60 bits.
///
/// Instants before 1582-10-15 clamp to zero.
pub fn ticks_since_gregorian(now: DateTime<Utc>) -> u64 {
    let unix_ticks =
        i128::from(now.timestamp()) * 10_000_000 + i128::from(now.timestamp_subsec_nanos() / 100);
    let ticks = (unix_ticks + i128::from(GREGORIAN_OFFSET_TICKS)).max(0);

    (ticks as u64) & TICK_MASK
}

/// Returns 48 random bits with the multicast bit set, as RFC 4122 section 4.5 requires for
/// node identifiers that are not hardware addresses.
pub fn random_node_id() -> [u8; 6] {
    let mut node: [u8; 6] = rand::thread_rng().gen();
    node[0] |= 0x01;
    node
}

/// Returns the first usable hardware address of the host, if any.
///
/// Loopback, all-zero and multicast addresses are skipped.
#[cfg(target_os = "linux")]
pub fn host_node_id() -> Option<[u8; 6]> {
    let mut interfaces: Vec<_> = std::fs::read_dir("/sys/class/net")
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name() != "lo")
        .map(|entry| entry.path())
        .collect();
    interfaces.sort();

    interfaces.iter().find_map(|path| {
        let text = std::fs::read_to_string(path.join("address")).ok()?;
        parse_mac(text.trim()).filter(is_usable_node)
    })
}

#[cfg(not(target_os = "linux"))]
pub fn host_node_id() -> Option<[u8; 6]> {
    None
}

/// Parses a colon-separated MAC address such as `00:1a:2b:3c:4d:5e`.
pub fn parse_mac(text: &str) -> Option<[u8; 6]> {
    let mut node = [0u8; 6];
    let mut parts = text.split(':');

    for byte in node.iter_mut() {
        let part = parts.next()?;
        if part.len() != 2 {
            return None;
        }
        *byte = u8::from_str_radix(part, 16).ok()?;
    }

    match parts.next() {
        Some(_) => None,
        None => Some(node),
    }
}

fn is_usable_node(node: &[u8; 6]) -> bool {
    node.iter().any(|&b| b != 0) && node[0] & 0x01 == 0
}
