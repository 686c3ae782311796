//! The three-lane track.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of lanes on the track.
pub const LANE_COUNT: usize = 3;

/// One of the three fixed horizontal positions the runner, obstacles and
/// coins can occupy.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; LANE_COUNT] = [Lane::Left, Lane::Center, Lane::Right];

    /// Lane for an index in `0..3`. Out-of-range indices return `None`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// Horizontal screen position as a fraction of screen width.
    pub fn screen_x(self) -> f64 {
        match self {
            Self::Left => 0.22,
            Self::Center => 0.5,
            Self::Right => 0.78,
        }
    }

    /// Neighbouring lane to the left, or `None` at the track edge.
    pub fn left(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Neighbouring lane to the right, or `None` at the track edge.
    pub fn right(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Pick a lane uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..LANE_COUNT)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_index_roundtrip() {
        for lane in Lane::ALL {
            assert_eq!(Lane::from_index(lane.index()), Some(lane));
        }
        assert_eq!(Lane::from_index(3), None);
    }

    #[test]
    fn test_neighbours_clamp_at_edges() {
        assert_eq!(Lane::Left.left(), None);
        assert_eq!(Lane::Left.right(), Some(Lane::Center));
        assert_eq!(Lane::Center.left(), Some(Lane::Left));
        assert_eq!(Lane::Center.right(), Some(Lane::Right));
        assert_eq!(Lane::Right.right(), None);
    }

    #[test]
    fn test_screen_positions_ordered() {
        assert!(Lane::Left.screen_x() < Lane::Center.screen_x());
        assert!(Lane::Center.screen_x() < Lane::Right.screen_x());
        assert!((Lane::Center.screen_x() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_is_center() {
        assert_eq!(Lane::default(), Lane::Center);
    }

    #[test]
    fn test_random_covers_all_lanes() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut seen = [false; LANE_COUNT];
        for _ in 0..200 {
            seen[Lane::random(&mut rng).index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "all three lanes should be picked");
    }
}
