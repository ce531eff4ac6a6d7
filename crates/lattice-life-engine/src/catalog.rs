//! The built-in pattern library.
//!
//! Catalog contents are static reference data defined once at construction
//! and never mutated. Rotation is a pure transform on
//! [`Pattern`] itself ([`Pattern::rotate_cw`]).

use lattice_life_core::{CoreError, Pattern};
use serde::{Deserialize, Serialize};

/// Grouping used when presenting the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatternCategory {
    StillLifes,
    Oscillators,
    Spaceships,
    Guns,
    Methuselahs,
}

impl PatternCategory {
    /// All categories in presentation order.
    pub const ALL: [PatternCategory; 5] = [
        PatternCategory::StillLifes,
        PatternCategory::Oscillators,
        PatternCategory::Spaceships,
        PatternCategory::Guns,
        PatternCategory::Methuselahs,
    ];

    /// Display label for the category.
    pub fn label(&self) -> &'static str {
        match self {
            PatternCategory::StillLifes => "Still Lifes",
            PatternCategory::Oscillators => "Oscillators",
            PatternCategory::Spaceships => "Spaceships",
            PatternCategory::Guns => "Guns",
            PatternCategory::Methuselahs => "Methuselahs",
        }
    }
}

/// Ordered mapping from pattern name to its cell-matrix definition.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    entries: Vec<(PatternCategory, Pattern)>,
}

impl PatternCatalog {
    /// Build the standard catalog.
    pub fn standard() -> Result<Self, CoreError> {
        let defs: &[(PatternCategory, &str, &[&str])] = &[
            // Still lifes
            (PatternCategory::StillLifes, "Block", &["##", "##"]),
            (
                PatternCategory::StillLifes,
                "Beehive",
                &[".##.", "#..#", ".##."],
            ),
            (
                PatternCategory::StillLifes,
                "Loaf",
                &[".##.", "#..#", ".#.#", "..#."],
            ),
            (PatternCategory::StillLifes, "Boat", &["##.", "#.#", ".#."]),
            (PatternCategory::StillLifes, "Tub", &[".#.", "#.#", ".#."]),
            // Oscillators
            (PatternCategory::Oscillators, "Blinker", &["###"]),
            (PatternCategory::Oscillators, "Toad", &[".###", "###."]),
            (
                PatternCategory::Oscillators,
                "Beacon",
                &["##..", "##..", "..##", "..##"],
            ),
            (
                PatternCategory::Oscillators,
                "Pulsar",
                &[
                    "..###...###..",
                    ".............",
                    "#....#.#....#",
                    "#....#.#....#",
                    "#....#.#....#",
                    "..###...###..",
                    ".............",
                    "..###...###..",
                    "#....#.#....#",
                    "#....#.#....#",
                    "#....#.#....#",
                    ".............",
                    "..###...###..",
                ],
            ),
            (
                PatternCategory::Oscillators,
                "Pentadecathlon",
                &["..#....#..", "##.####.##", "..#....#.."],
            ),
            (
                PatternCategory::Oscillators,
                "Figure Eight",
                &[
                    "###...", "###...", "###...", "...###", "...###", "...###",
                ],
            ),
            // Spaceships
            (
                PatternCategory::Spaceships,
                "Glider",
                &[".#.", "..#", "###"],
            ),
            (
                PatternCategory::Spaceships,
                "Lightweight Spaceship (LWSS)",
                &["#..#.", "....#", "#...#", ".####"],
            ),
            (
                PatternCategory::Spaceships,
                "Middleweight Spaceship (MWSS)",
                &["..#...", "#...#.", ".....#", "#....#", ".#####"],
            ),
            (
                PatternCategory::Spaceships,
                "Heavyweight Spaceship (HWSS)",
                &["..##...", "#....#.", "......#", "#.....#", ".######"],
            ),
            // Guns
            (
                PatternCategory::Guns,
                "Gosper Glider Gun",
                &[
                    "........................#...........",
                    "......................#.#...........",
                    "............##......##............##",
                    "...........#...#....##............##",
                    "##........#.....#...##..............",
                    "##........#...#.##....#.#...........",
                    "..........#.....#.......#...........",
                    "...........#...#....................",
                    "............##......................",
                ],
            ),
            // Methuselahs
            (
                PatternCategory::Methuselahs,
                "R-pentomino",
                &[".##", "##.", ".#."],
            ),
            (
                PatternCategory::Methuselahs,
                "Diehard",
                &["......#.", "##......", ".#...###"],
            ),
            (
                PatternCategory::Methuselahs,
                "Acorn",
                &[".#.....", "...#...", "##..###"],
            ),
            (
                PatternCategory::Methuselahs,
                "Thunderbird",
                &["###", "...", ".#.", ".#.", ".#."],
            ),
        ];

        let mut entries = Vec::with_capacity(defs.len());
        for (category, name, rows) in defs {
            entries.push((*category, Pattern::from_rows(*name, rows)?));
        }
        Ok(Self { entries })
    }

    /// Look up a pattern by name.
    pub fn get(&self, name: &str) -> Option<&Pattern> {
        self.entries
            .iter()
            .find(|(_, p)| p.name() == name)
            .map(|(_, p)| p)
    }

    /// All pattern names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(_, p)| p.name())
    }

    /// Patterns belonging to a category, in catalog order.
    pub fn patterns_in(&self, category: PatternCategory) -> impl Iterator<Item = &Pattern> {
        self.entries
            .iter()
            .filter(move |(c, _)| *c == category)
            .map(|(_, p)| p)
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
