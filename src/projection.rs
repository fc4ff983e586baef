//! Turns a session into the back-to-front list of things to draw this frame.
//!
//! World space is measured in tiles, y-up, with the origin at the centre of the board. The
//! status row sits one tile below the bottom edge of the board.

use crate::board::{TileCoord, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::Session;
use crate::status::Status;
use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpriteId {
    Map,
    BlackTile,
    Rock,
    MoneyBag,
    Man,
    GameStart,
    GameEnd,
    MineWithSpace,
}

impl SpriteId {
    pub fn for_status(status: Status) -> Self {
        match status {
            Status::Start => Self::GameStart,
            Status::PromptInteract => Self::MineWithSpace,
            Status::End => Self::GameEnd,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    Sprite {
        sprite: SpriteId,
        position: Vec2,
        rotation: f32,
    },
    DebugRect {
        position: Vec2,
        half_extent: Vec2,
        tint: [u8; 4],
    },
}

impl DrawCommand {
    fn sprite(sprite: SpriteId, position: Vec2) -> Self {
        Self::Sprite {
            sprite,
            position,
            rotation: 0.,
        }
    }
}

pub const DEBUG_MARKER_HALF_EXTENT: f32 = 0.1;
const ORIGIN_MARKER_TINT: [u8; 4] = [0xff, 0x00, 0x00, 0xff];
const POINTER_MARKER_TINT: [u8; 4] = [0xff, 0xff, 0xff, 0x88];

/// Extra markers drawn on top of the frame in debug mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct DebugOverlay {
    pub pointer: Option<Vec2>,
}

pub fn tile_centre(tile: TileCoord) -> Vec2 {
    Vec2::new(
        tile.x() as f32 + 0.5 - BOARD_WIDTH as f32 / 2.,
        BOARD_HEIGHT as f32 / 2. - (tile.y() as f32 + 0.5),
    )
}

pub fn map_centre() -> Vec2 {
    Vec2::ZERO
}

pub fn status_anchor() -> Vec2 {
    Vec2::new(0., -(BOARD_HEIGHT as f32 / 2.) - 0.5)
}

pub fn project(session: &Session, debug: Option<&DebugOverlay>) -> Vec<DrawCommand> {
    let board = session.board();
    let obstacles = session.obstacles();
    // map, player, money bag, fog, rocks, status and both debug markers
    let mut commands =
        Vec::with_capacity(3 + board.undiscovered_count() + obstacles.iter().count() + 1 + 2);
    commands.push(DrawCommand::sprite(SpriteId::Map, map_centre()));
    commands.push(DrawCommand::sprite(
        SpriteId::Man,
        tile_centre(session.player()),
    ));
    // The money bag is always drawn and relies on the fog to hide it
    commands.push(DrawCommand::sprite(
        SpriteId::MoneyBag,
        tile_centre(obstacles.reward_location()),
    ));
    for tile in board.undiscovered() {
        commands.push(DrawCommand::sprite(SpriteId::BlackTile, tile_centre(tile)));
    }
    for obstacle in obstacles.iter() {
        if !obstacle.cleared && board.is_discovered(obstacle.location) {
            commands.push(DrawCommand::sprite(
                SpriteId::Rock,
                tile_centre(obstacle.location),
            ));
        }
    }
    commands.push(DrawCommand::sprite(
        SpriteId::for_status(session.status()),
        status_anchor(),
    ));
    if let Some(debug) = debug {
        let half_extent = Vec2::splat(DEBUG_MARKER_HALF_EXTENT);
        commands.push(DrawCommand::DebugRect {
            position: Vec2::ZERO,
            half_extent,
            tint: ORIGIN_MARKER_TINT,
        });
        if let Some(pointer) = debug.pointer {
            commands.push(DrawCommand::DebugRect {
                position: pointer,
                half_extent,
                tint: POINTER_MARKER_TINT,
            });
        }
    }
    commands
}
