/// Rating gap that moves the fallback win probability by one logistic unit
pub const DEFAULT_RATING_SCALE: f64 = 10.0;

/// Teams in a full field (64 bracket lines plus four First Four extras)
pub const FIELD_SIZE: usize = 68;

/// Games in a full field: 4 First Four + 32 + 16 + 8 + 4 + 2 + 1
pub const FIELD_GAME_COUNT: usize = 67;

/// Seeds per region
pub const SEEDS_PER_REGION: u8 = 16;

/// Round of 64 seed pairings within a region, top of the region to bottom.
pub const ROUND_OF_64_PAIRINGS: [(u8, u8); 8] = [
    (1, 16),
    (8, 9),
    (5, 12),
    (4, 13),
    (6, 11),
    (3, 14),
    (7, 10),
    (2, 15),
];

/// Highest win index with a defined survival probability
pub const MAX_WIN_INDEX: i32 = 7;

/// Points awarded per round in standard bracket scoring
pub const ROUND_POINTS: [f64; 6] = [1.0, 1.0, 2.0, 2.0, 2.0, 3.0];

/// Calcutta pool scoring multipliers (scaled by 15.5)
pub const CALCUTTA_MULTIPLIERS: [f64; 6] = [0.5, 1.25, 2.5, 7.75, 3.0, 7.0];

/// Get Calcutta points for each round
pub fn calcutta_points() -> [f64; 6] {
    let mut points = [0.0; 6];
    for (i, &mult) in CALCUTTA_MULTIPLIERS.iter().enumerate() {
        points[i] = 15.5 * mult;
    }
    points
}
