use crate::game::Session;
use serde::{Deserialize, Serialize};

/// Which message is shown in the status row below the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Start,
    PromptInteract,
    End,
}

impl Status {
    // Derived from scratch every frame; nothing about the status is stored.
    pub fn of(session: &Session) -> Self {
        if session.reward_found() {
            Self::End
        } else if session.obstacles().is_uncleared_at(session.player()) {
            Self::PromptInteract
        } else {
            Self::Start
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::Start => "Find the money bag",
            Self::PromptInteract => "Press SPACE to mine the rock",
            Self::End => "You found the money!",
        }
    }
}
