use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::projection::{DrawCommand, SpriteId};
use glam::Vec2;
use serde::Serialize;

/// Where a sprite lives in the shared texture atlas, and how big it is in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteInfo {
    pub min_uv: Vec2,
    pub max_uv: Vec2,
    pub radius: Vec2,
}

impl SpriteInfo {
    const fn new(min_uv: Vec2, max_uv: Vec2, radius: Vec2) -> Self {
        Self {
            min_uv,
            max_uv,
            radius,
        }
    }
}

const TILE_RADIUS: Vec2 = Vec2::new(0.5, 0.5);
const STATUS_RADIUS: Vec2 = Vec2::new(BOARD_WIDTH as f32 / 2., 0.5);

pub fn sprite_info(sprite: SpriteId) -> SpriteInfo {
    use SpriteId::*;
    match sprite {
        Map => SpriteInfo::new(
            Vec2::new(0., 0.),
            Vec2::new(0.83333, 0.88888),
            Vec2::new(BOARD_WIDTH as f32 / 2., BOARD_HEIGHT as f32 / 2.),
        ),
        BlackTile => SpriteInfo::new(
            Vec2::new(0.83333, 0.),
            Vec2::new(1., 0.11111),
            TILE_RADIUS,
        ),
        Rock => SpriteInfo::new(
            Vec2::new(0.83333, 0.11111),
            Vec2::new(1., 0.22222),
            TILE_RADIUS,
        ),
        MoneyBag => SpriteInfo::new(
            Vec2::new(0.83333, 0.22222),
            Vec2::new(1., 0.33333),
            TILE_RADIUS,
        ),
        Man => SpriteInfo::new(
            Vec2::new(0.83333, 0.33333),
            Vec2::new(1., 0.44444),
            TILE_RADIUS,
        ),
        GameStart => SpriteInfo::new(
            Vec2::new(0.5, 0.88888),
            Vec2::new(1., 0.99999),
            STATUS_RADIUS,
        ),
        GameEnd => SpriteInfo::new(
            Vec2::new(0., 0.88888),
            Vec2::new(0.5, 0.99999),
            STATUS_RADIUS,
        ),
        MineWithSpace => SpriteInfo::new(
            Vec2::new(0., 0.99999),
            Vec2::new(0.5, 1.),
            STATUS_RADIUS,
        ),
    }
}

/// An axis-aligned rectangle in world space with the part of the atlas to paint on it. Debug
/// rects have no sprite and sample nothing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TexturedQuad {
    pub sprite: Option<SpriteId>,
    pub min: Vec2,
    pub max: Vec2,
    pub min_uv: Vec2,
    pub max_uv: Vec2,
    pub tint: [u8; 4],
}

const OPAQUE_WHITE: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

impl TexturedQuad {
    pub fn from_command(command: &DrawCommand) -> Self {
        match *command {
            // Nothing in the game is rotated, so sprites stay axis-aligned
            DrawCommand::Sprite {
                sprite, position, ..
            } => {
                let info = sprite_info(sprite);
                Self {
                    sprite: Some(sprite),
                    min: position - info.radius,
                    max: position + info.radius,
                    min_uv: info.min_uv,
                    max_uv: info.max_uv,
                    tint: OPAQUE_WHITE,
                }
            }
            DrawCommand::DebugRect {
                position,
                half_extent,
                tint,
            } => Self {
                sprite: None,
                min: position - half_extent,
                max: position + half_extent,
                min_uv: Vec2::ZERO,
                max_uv: Vec2::ONE,
                tint,
            },
        }
    }

    pub fn centre(&self) -> Vec2 {
        (self.min + self.max) / 2.
    }
}

pub fn quads(commands: &[DrawCommand]) -> Vec<TexturedQuad> {
    commands.iter().map(TexturedQuad::from_command).collect()
}

#[cfg(test)]
mod test {
    use super::*;

    const ALL: [SpriteId; 8] = [
        SpriteId::Map,
        SpriteId::BlackTile,
        SpriteId::Rock,
        SpriteId::MoneyBag,
        SpriteId::Man,
        SpriteId::GameStart,
        SpriteId::GameEnd,
        SpriteId::MineWithSpace,
    ];

    #[test]
    fn uv_rects_are_within_the_atlas() {
        for &sprite in &ALL {
            let info = sprite_info(sprite);
            assert!(info.min_uv.x < info.max_uv.x, "{:?}", sprite);
            assert!(info.min_uv.y < info.max_uv.y, "{:?}", sprite);
            assert!(info.min_uv.cmpge(Vec2::ZERO).all(), "{:?}", sprite);
            assert!(info.max_uv.cmple(Vec2::ONE).all(), "{:?}", sprite);
        }
    }

    #[test]
    fn tile_sprites_cover_one_tile() {
        for &sprite in &[
            SpriteId::BlackTile,
            SpriteId::Rock,
            SpriteId::MoneyBag,
            SpriteId::Man,
        ] {
            assert_eq!(sprite_info(sprite).radius, Vec2::splat(0.5));
        }
        assert_eq!(sprite_info(SpriteId::Map).radius, Vec2::new(2.5, 3.0));
    }

    #[test]
    fn sprite_quad_is_centred_on_position() {
        let quad = TexturedQuad::from_command(&DrawCommand::Sprite {
            sprite: SpriteId::Rock,
            position: Vec2::new(-2.0, 1.5),
            rotation: 0.,
        });
        assert_eq!(quad.sprite, Some(SpriteId::Rock));
        assert_eq!(quad.min, Vec2::new(-2.5, 1.0));
        assert_eq!(quad.max, Vec2::new(-1.5, 2.0));
        assert_eq!(quad.centre(), Vec2::new(-2.0, 1.5));
        assert_eq!(quad.min_uv, Vec2::new(0.83333, 0.11111));
        assert_eq!(quad.tint, OPAQUE_WHITE);
    }

    #[test]
    fn debug_rect_quad_keeps_its_tint() {
        let quad = TexturedQuad::from_command(&DrawCommand::DebugRect {
            position: Vec2::ZERO,
            half_extent: Vec2::splat(0.25),
            tint: [1, 2, 3, 4],
        });
        assert_eq!(quad.sprite, None);
        assert_eq!(quad.min, Vec2::splat(-0.25));
        assert_eq!(quad.max, Vec2::splat(0.25));
        assert_eq!(quad.tint, [1, 2, 3, 4]);
    }
}
