//! Card system: rated players, swing charts, rosters.
//!
//! ## Key Types
//!
//! - `PlayerCard`: Immutable rated player (hitter or pitcher)
//! - `Speed`: Printed speed grade (A/B/C)
//! - `Position`: Fielding positions plus DH
//! - `FieldingRatings`: Per-position defense, with the shared LF/RF rating
//! - `Chart`: d20 roll-range to `Outcome` table
//! - `Roster`: Per-side card arena, id-addressed

pub mod card;
pub mod chart;
pub mod position;
pub mod roster;

pub use card::{FieldingRatings, PlayerCard, Speed};
pub use chart::{Chart, ChartEntry, Outcome};
pub use position::Position;
pub use roster::{replacement_hitter, replacement_pitcher, Roster};
