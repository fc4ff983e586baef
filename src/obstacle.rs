use crate::board::TileCoord;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const ROCK_COUNT: usize = 5;

const ROCK_LOCATIONS: [(i32, i32); ROCK_COUNT] = [(4, 0), (0, 1), (0, 2), (2, 4), (4, 5)];

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("reward holder {index} is out of range for {count} rocks")]
pub struct RewardHolderOutOfRange {
    pub index: usize,
    pub count: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub location: TileCoord,
    pub cleared: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InteractOutcome {
    Nothing,
    ClearedEmpty,
    ClearedReward,
}

/// The rocks on the board, which one of them hides the money bag, and whether it has been dug
/// up yet.
pub struct Obstacles {
    obstacles: Vec<Obstacle>,
    reward_holder: usize,
    reward_found: bool,
}

impl Obstacles {
    /// Hides the reward under a rock chosen uniformly at random.
    pub fn choose<R: Rng>(rng: &mut R) -> Self {
        Self::new_unchecked(rng.gen_range(0..ROCK_COUNT))
    }

    pub fn with_reward_holder(reward_holder: usize) -> Result<Self, RewardHolderOutOfRange> {
        if reward_holder < ROCK_COUNT {
            Ok(Self::new_unchecked(reward_holder))
        } else {
            Err(RewardHolderOutOfRange {
                index: reward_holder,
                count: ROCK_COUNT,
            })
        }
    }

    fn new_unchecked(reward_holder: usize) -> Self {
        let obstacles = ROCK_LOCATIONS
            .iter()
            .map(|&(x, y)| Obstacle {
                location: TileCoord::at(x, y),
                cleared: false,
            })
            .collect();
        Self {
            obstacles,
            reward_holder,
            reward_found: false,
        }
    }

    pub fn obstacle_at(&self, tile: TileCoord) -> Option<usize> {
        self.obstacles
            .iter()
            .position(|obstacle| obstacle.location == tile)
    }

    pub fn get(&self, index: usize) -> &Obstacle {
        &self.obstacles[index]
    }

    pub fn iter<'a>(&'a self) -> impl 'a + Iterator<Item = &'a Obstacle> {
        self.obstacles.iter()
    }

    pub fn reward_holder(&self) -> usize {
        self.reward_holder
    }

    pub fn reward_location(&self) -> TileCoord {
        self.obstacles[self.reward_holder].location
    }

    pub fn reward_found(&self) -> bool {
        self.reward_found
    }

    pub fn is_uncleared_at(&self, tile: TileCoord) -> bool {
        self.obstacle_at(tile)
            .map(|index| !self.get(index).cleared)
            .unwrap_or(false)
    }

    // Clearing happens at most once per rock, so repeated interaction with a cleared rock
    // (including the reward holder) changes nothing.
    pub fn interact(&mut self, tile: TileCoord) -> InteractOutcome {
        let index = match self.obstacle_at(tile) {
            Some(index) => index,
            None => return InteractOutcome::Nothing,
        };
        let obstacle = &mut self.obstacles[index];
        if obstacle.cleared {
            return InteractOutcome::ClearedEmpty;
        }
        obstacle.cleared = true;
        if index == self.reward_holder {
            self.reward_found = true;
            InteractOutcome::ClearedReward
        } else {
            InteractOutcome::ClearedEmpty
        }
    }
}
