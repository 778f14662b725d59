//! The cross-Canada track, split into contiguous named regions.

use serde::Serialize;

use crate::constants::TOTAL_STEPS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub name: &'static str,
    pub start: u8,
    pub end: u8,
    /// Style key the presentation layer maps to a colour band.
    pub palette: &'static str,
}

impl Region {
    #[must_use]
    pub const fn contains(&self, position: u8) -> bool {
        position >= self.start && position <= self.end
    }

    /// Number of squares in the region.
    #[must_use]
    pub const fn span(&self) -> u8 {
        self.end - self.start + 1
    }
}

/// Regions in travel order. Together they cover `0..=TOTAL_STEPS` exactly once.
pub static REGIONS: [Region; 5] = [
    Region {
        name: "The Maritimes",
        start: 0,
        end: 6,
        palette: "maritimes",
    },
    Region {
        name: "The Great Lakes",
        start: 7,
        end: 12,
        palette: "great-lakes",
    },
    Region {
        name: "The Prairies",
        start: 13,
        end: 18,
        palette: "prairies",
    },
    Region {
        name: "The Rockies",
        start: 19,
        end: 24,
        palette: "rockies",
    },
    Region {
        name: "The Arctic",
        start: 25,
        end: TOTAL_STEPS,
        palette: "arctic",
    },
];

/// Region containing `position`, or `None` when it is off the track.
#[must_use]
pub fn try_region_for_position(position: u8) -> Option<&'static Region> {
    REGIONS.iter().find(|region| region.contains(position))
}

/// Region containing `position`.
///
/// Positions past the finish trip a debug assertion; release builds clamp them
/// to the last region.
#[must_use]
pub fn region_for_position(position: u8) -> &'static Region {
    debug_assert!(
        position <= TOTAL_STEPS,
        "position {position} is off the track (max {TOTAL_STEPS})"
    );
    try_region_for_position(position).unwrap_or(&REGIONS[REGIONS.len() - 1])
}

/// First region of the track, where every expedition starts.
#[must_use]
pub fn starting_region() -> &'static Region {
    &REGIONS[0]
}

/// The region entered when moving from `from` to `to`, if the move crosses a border.
#[must_use]
pub fn region_entered(from: u8, to: u8) -> Option<&'static Region> {
    let before = try_region_for_position(from);
    let after = region_for_position(to);
    match before {
        Some(before) if before.name == after.name => None,
        _ => Some(after),
    }
}
