use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use glam::{Mat4, Vec2, Vec4};

/// A fixed orthographic camera. Clip space runs from -1 to 1 on both axes, y-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub at: Vec2,
    pub radius: Vec2,
}

impl Camera {
    pub fn new(at: Vec2, vertical_radius: f32, aspect_ratio: f32) -> Self {
        Self {
            at,
            radius: Vec2::new(vertical_radius * aspect_ratio, vertical_radius),
        }
    }

    // Frames the board plus the status row beneath it. The window must share the board's
    // aspect ratio for tiles to come out square.
    pub fn for_board() -> Self {
        let rows = BOARD_HEIGHT as f32 + 1.;
        Self::new(Vec2::new(0., -0.5), rows / 2., Self::board_aspect_ratio())
    }

    pub fn board_aspect_ratio() -> f32 {
        BOARD_WIDTH as f32 / (BOARD_HEIGHT as f32 + 1.)
    }

    pub fn world_to_clip(&self) -> Mat4 {
        let scale = Vec2::ONE / self.radius;
        let offset = scale * -self.at;
        Mat4::from_cols(
            Vec4::new(scale.x, 0., 0., 0.),
            Vec4::new(0., scale.y, 0., 0.),
            Vec4::new(0., 0., 1., 0.),
            Vec4::new(offset.x, offset.y, 0., 1.),
        )
    }

    pub fn project(&self, world: Vec2) -> Vec2 {
        self.world_to_clip()
            .transform_point3(world.extend(0.))
            .truncate()
    }

    pub fn unproject(&self, clip: Vec2) -> Vec2 {
        clip * self.radius + self.at
    }
}
