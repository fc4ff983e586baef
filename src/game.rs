use crate::board::{Board, TileCoord};
use crate::obstacle::{InteractOutcome, Obstacles, RewardHolderOutOfRange};
use crate::status::Status;
use direction::CardinalDirection;
use rand::Rng;
use tracing::{debug, info, trace};

pub const PLAYER_START: (i32, i32) = (2, 2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Move(CardinalDirection),
    Interact,
    Quit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

pub struct Session {
    board: Board,
    obstacles: Obstacles,
    player: TileCoord,
}

impl Session {
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::from_obstacles(Obstacles::choose(rng))
    }

    pub fn with_reward_holder(reward_holder: usize) -> Result<Self, RewardHolderOutOfRange> {
        Obstacles::with_reward_holder(reward_holder).map(Self::from_obstacles)
    }

    fn from_obstacles(obstacles: Obstacles) -> Self {
        let (x, y) = PLAYER_START;
        let player = TileCoord::at(x, y);
        debug!(reward_holder = obstacles.reward_holder(), "money bag hidden");
        Self {
            board: Board::new(player),
            obstacles,
            player,
        }
    }

    pub fn handle_event(&mut self, event: InputEvent) -> LoopControl {
        match event {
            InputEvent::Move(direction) => {
                self.try_move(direction);
            }
            InputEvent::Interact => {
                self.interact();
            }
            InputEvent::Quit => return LoopControl::Exit,
        }
        LoopControl::Continue
    }

    pub fn try_move(&mut self, direction: CardinalDirection) -> bool {
        if !self.board.can_move(self.player, direction) {
            trace!(?direction, x = self.player.x(), y = self.player.y(), "move blocked");
            return false;
        }
        self.player = self.board.step(self.player, direction);
        self.board.mark_discovered(self.player);
        debug!(?direction, x = self.player.x(), y = self.player.y(), "player moved");
        true
    }

    pub fn interact(&mut self) -> InteractOutcome {
        let outcome = self.obstacles.interact(self.player);
        match outcome {
            InteractOutcome::Nothing => trace!("nothing to mine here"),
            InteractOutcome::ClearedEmpty => debug!(?outcome, "mined rock"),
            InteractOutcome::ClearedReward => info!("found the money bag"),
        }
        outcome
    }

    pub fn status(&self) -> Status {
        Status::of(self)
    }

    pub fn player(&self) -> TileCoord {
        self.player
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn obstacles(&self) -> &Obstacles {
        &self.obstacles
    }

    pub fn reward_found(&self) -> bool {
        self.obstacles.reward_found()
    }
}
