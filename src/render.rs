use crate::atlas::TexturedQuad;
use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::camera::Camera;
use crate::projection::SpriteId;
use crate::status::Status;
use chargrid::render::{ColModify, Frame, View, ViewCell, ViewContext};
use coord_2d::{Coord, Size};
use glam::Vec2;
use grid_2d::Grid;
use rgb24::Rgb24;

pub const TILE_WIDTH_CELLS: u32 = 6;
pub const TILE_HEIGHT_CELLS: u32 = 3;

// The board plus one row of tiles for the status message
pub fn screen_size() -> Size {
    Size::new(
        BOARD_WIDTH * TILE_WIDTH_CELLS,
        (BOARD_HEIGHT + 1) * TILE_HEIGHT_CELLS,
    )
}

pub mod colours {
    use rgb24::Rgb24;

    pub const CLEAR: Rgb24 = Rgb24::new(128, 128, 128);
    pub const GROUND: Rgb24 = Rgb24::new(92, 64, 40);
    pub const GROUND_DETAIL: Rgb24 = Rgb24::new(120, 88, 56);
    pub const FOG: Rgb24 = Rgb24::new(0, 0, 0);
    pub const ROCK: Rgb24 = Rgb24::new(96, 96, 104);
    pub const ROCK_DETAIL: Rgb24 = Rgb24::new(168, 168, 176);
    pub const GOLD: Rgb24 = Rgb24::new(255, 208, 0);
    pub const PLAYER: Rgb24 = Rgb24::new(255, 255, 255);
    pub const STATUS_BACKGROUND: Rgb24 = Rgb24::new(24, 24, 64);
    pub const STATUS_TEXT: Rgb24 = Rgb24::new(240, 240, 240);
    pub const END_BACKGROUND: Rgb24 = Rgb24::new(24, 80, 24);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub character: char,
    pub foreground: Rgb24,
    pub background: Rgb24,
}

impl Cell {
    const fn new(character: char, foreground: Rgb24, background: Rgb24) -> Self {
        Self {
            character,
            foreground,
            background,
        }
    }

    fn blank() -> Self {
        Self::new(' ', colours::CLEAR, colours::CLEAR)
    }
}

fn sprite_cell(sprite: SpriteId) -> Cell {
    use colours::*;
    match sprite {
        SpriteId::Map => Cell::new('.', GROUND_DETAIL, GROUND),
        SpriteId::BlackTile => Cell::new(' ', FOG, FOG),
        SpriteId::Rock => Cell::new('#', ROCK_DETAIL, ROCK),
        SpriteId::MoneyBag => Cell::new('$', GOLD, GROUND),
        SpriteId::Man => Cell::new('@', PLAYER, GROUND),
        SpriteId::GameStart | SpriteId::MineWithSpace => {
            Cell::new(' ', STATUS_TEXT, STATUS_BACKGROUND)
        }
        SpriteId::GameEnd => Cell::new(' ', STATUS_TEXT, END_BACKGROUND),
    }
}

fn status_message(sprite: SpriteId) -> Option<&'static str> {
    match sprite {
        SpriteId::GameStart => Some(Status::Start.message()),
        SpriteId::MineWithSpace => Some(Status::PromptInteract.message()),
        SpriteId::GameEnd => Some(Status::End.message()),
        _ => None,
    }
}

fn blend(under: Rgb24, over: [u8; 4]) -> Rgb24 {
    let alpha = over[3] as u32;
    let mix = |a: u8, b: u8| ((a as u32 * (255 - alpha) + b as u32 * alpha) / 255) as u8;
    Rgb24::new(
        mix(under.r, over[0]),
        mix(under.g, over[1]),
        mix(under.b, over[2]),
    )
}

/// Rasterises textured quads onto a grid of character cells, back to front.
pub struct Canvas {
    cells: Grid<Cell>,
    camera: Camera,
}

impl Canvas {
    pub fn new(size: Size, camera: Camera) -> Self {
        Self {
            cells: Grid::new_copy(size, Cell::blank()),
            camera,
        }
    }

    pub fn size(&self) -> Size {
        self.cells.size()
    }

    pub fn clear(&mut self) {
        for cell in self.cells.iter_mut() {
            *cell = Cell::blank();
        }
    }

    // Screen space is measured in cells from the top-left corner, y-down
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        let clip = self.camera.project(world);
        let size = self.size();
        Vec2::new(
            (clip.x + 1.) / 2. * size.width() as f32,
            (1. - clip.y) / 2. * size.height() as f32,
        )
    }

    pub fn screen_to_world(&self, coord: Coord) -> Vec2 {
        let size = self.size();
        let clip = Vec2::new(
            (coord.x as f32 + 0.5) / size.width() as f32 * 2. - 1.,
            1. - (coord.y as f32 + 0.5) / size.height() as f32 * 2.,
        );
        self.camera.unproject(clip)
    }

    // The cells covered by a quad as a half-open range, clamped to the canvas
    fn cell_bounds(&self, quad: &TexturedQuad) -> (Coord, Coord) {
        let size = self.size();
        let top_left = self.world_to_screen(Vec2::new(quad.min.x, quad.max.y));
        let bottom_right = self.world_to_screen(Vec2::new(quad.max.x, quad.min.y));
        let clamp_x = |x: f32| (x.round() as i32).max(0).min(size.width() as i32);
        let clamp_y = |y: f32| (y.round() as i32).max(0).min(size.height() as i32);
        (
            Coord::new(clamp_x(top_left.x), clamp_y(top_left.y)),
            Coord::new(clamp_x(bottom_right.x), clamp_y(bottom_right.y)),
        )
    }

    pub fn paint(&mut self, quads: &[TexturedQuad]) {
        for quad in quads {
            match quad.sprite {
                Some(sprite) => self.paint_sprite(sprite, quad),
                None => self.paint_marker(quad),
            }
        }
    }

    fn paint_sprite(&mut self, sprite: SpriteId, quad: &TexturedQuad) {
        let (top_left, bottom_right) = self.cell_bounds(quad);
        let cell = sprite_cell(sprite);
        for y in top_left.y..bottom_right.y {
            for x in top_left.x..bottom_right.x {
                *self.cells.get_checked_mut(Coord::new(x, y)) = cell;
            }
        }
        if let Some(message) = status_message(sprite) {
            let width = bottom_right.x - top_left.x;
            let length = message.chars().count() as i32;
            let row = (top_left.y + bottom_right.y) / 2;
            let start = top_left.x + ((width - length) / 2).max(0);
            for (i, character) in message.chars().enumerate() {
                let coord = Coord::new(start + i as i32, row);
                if coord.x >= bottom_right.x || row >= bottom_right.y {
                    break;
                }
                self.cells.get_checked_mut(coord).character = character;
            }
        }
    }

    // Debug markers are far smaller than a cell, so they tint whichever cell holds their centre
    fn paint_marker(&mut self, quad: &TexturedQuad) {
        let screen = self.world_to_screen(quad.centre());
        let coord = Coord::new(screen.x.floor() as i32, screen.y.floor() as i32);
        if let Some(cell) = self.cells.get_mut(coord) {
            cell.background = blend(cell.background, quad.tint);
        }
    }

    #[cfg(test)]
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.cells.get(coord)
    }

    pub fn enumerate<'a>(&'a self) -> impl 'a + Iterator<Item = (Coord, &'a Cell)> {
        self.cells.enumerate()
    }
}

pub struct SceneView {
    canvas: Canvas,
}

impl SceneView {
    pub fn new(camera: Camera) -> Self {
        Self {
            canvas: Canvas::new(screen_size(), camera),
        }
    }

    pub fn screen_to_world(&self, coord: Coord) -> Vec2 {
        self.canvas.screen_to_world(coord)
    }
}

impl<'a> View<&'a [TexturedQuad]> for SceneView {
    fn view<F: Frame, C: ColModify>(
        &mut self,
        quads: &'a [TexturedQuad],
        context: ViewContext<C>,
        frame: &mut F,
    ) {
        self.canvas.clear();
        self.canvas.paint(quads);
        for (coord, cell) in self.canvas.enumerate() {
            let view_cell = ViewCell::new()
                .with_character(cell.character)
                .with_foreground(cell.foreground)
                .with_background(cell.background);
            frame.set_cell_relative(coord, 0, view_cell, context);
        }
    }
}
