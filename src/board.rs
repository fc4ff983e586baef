use coord_2d::{Coord, Size};
use direction::CardinalDirection;
use grid_2d::Grid;
use serde::{Deserialize, Serialize};

pub const BOARD_WIDTH: u32 = 5;
pub const BOARD_HEIGHT: u32 = 6;

pub fn board_size() -> Size {
    Size::new(BOARD_WIDTH, BOARD_HEIGHT)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("({x}, {y}) is outside the {}x{} board", BOARD_WIDTH, BOARD_HEIGHT)]
pub struct OutOfBoardError {
    pub x: i32,
    pub y: i32,
}

// A coordinate known to lie on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord(Coord);

impl TileCoord {
    pub fn try_new(coord: Coord) -> Result<Self, OutOfBoardError> {
        if coord.is_valid(board_size()) {
            Ok(Self(coord))
        } else {
            Err(OutOfBoardError {
                x: coord.x,
                y: coord.y,
            })
        }
    }

    // For authored constants. Panics if `(x, y)` is off the board.
    pub fn at(x: i32, y: i32) -> Self {
        match Self::try_new(Coord::new(x, y)) {
            Ok(tile) => tile,
            Err(e) => panic!("{}", e),
        }
    }

    pub fn coord(self) -> Coord {
        self.0
    }

    pub fn x(self) -> i32 {
        self.0.x
    }

    pub fn y(self) -> i32 {
        self.0.y
    }

    // Every tile on the board in row major order
    pub fn all() -> impl Iterator<Item = TileCoord> {
        board_size().coord_iter_row_major().map(TileCoord)
    }
}

/// The cardinal moves that are legal out of a single tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passability {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl Passability {
    pub fn allows(self, direction: CardinalDirection) -> bool {
        match direction {
            CardinalDirection::West => self.left,
            CardinalDirection::East => self.right,
            CardinalDirection::North => self.up,
            CardinalDirection::South => self.down,
        }
    }
}

// Tiles out of which each move is legal. This is level data rather than something derived from
// the shape of the board, so nothing forces a move to be reversible.
const LEFT: &[(i32, i32)] = &[
    (1, 0), (2, 0), (3, 0), (3, 1), (1, 2), (2, 2), (4, 2),
    (2, 3), (3, 3), (4, 3), (1, 5), (2, 5), (3, 5), (4, 5),
];
const RIGHT: &[(i32, i32)] = &[
    (0, 0), (0, 1), (2, 0), (2, 1), (0, 2), (1, 2), (3, 2),
    (1, 4), (2, 4), (3, 4), (0, 5), (1, 5), (2, 5), (3, 5),
];
const UP: &[(i32, i32)] = &[
    (1, 1), (2, 1), (3, 1), (4, 1), (0, 2), (2, 2), (3, 2), (4, 2),
    (2, 3), (1, 4), (3, 4), (4, 4), (0, 5), (1, 5), (2, 5), (3, 5),
];
const DOWN: &[(i32, i32)] = &[
    (1, 0), (2, 0), (3, 0), (4, 0), (0, 1), (2, 1), (3, 1), (4, 1),
    (2, 2), (1, 3), (3, 3), (4, 3), (0, 4), (1, 4), (2, 4), (3, 4),
];

fn authored_passability() -> Grid<Passability> {
    let mut grid: Grid<Passability> = Grid::new_default(board_size());
    for &(x, y) in LEFT {
        grid.get_checked_mut(TileCoord::at(x, y).coord()).left = true;
    }
    for &(x, y) in RIGHT {
        grid.get_checked_mut(TileCoord::at(x, y).coord()).right = true;
    }
    for &(x, y) in UP {
        grid.get_checked_mut(TileCoord::at(x, y).coord()).up = true;
    }
    for &(x, y) in DOWN {
        grid.get_checked_mut(TileCoord::at(x, y).coord()).down = true;
    }
    grid
}

/// Static movement rules plus the fog-of-war state of every tile.
pub struct Board {
    passability: Grid<Passability>,
    discovered: Grid<bool>,
}

impl Board {
    pub fn new(start: TileCoord) -> Self {
        let mut board = Self {
            passability: authored_passability(),
            discovered: Grid::new_copy(board_size(), false),
        };
        board.mark_discovered(start);
        board
    }

    pub fn passability(&self, tile: TileCoord) -> Passability {
        *self.passability.get_checked(tile.coord())
    }

    pub fn can_move(&self, tile: TileCoord, direction: CardinalDirection) -> bool {
        self.passability(tile).allows(direction)
    }

    // Applies the offset for `direction` without consulting the passability table. Only call
    // this once `can_move` has returned true.
    pub fn step(&self, tile: TileCoord, direction: CardinalDirection) -> TileCoord {
        TileCoord::try_new(tile.coord() + direction.coord())
            .expect("passability table allows a move off the board")
    }

    pub fn mark_discovered(&mut self, tile: TileCoord) {
        *self.discovered.get_checked_mut(tile.coord()) = true;
    }

    pub fn is_discovered(&self, tile: TileCoord) -> bool {
        *self.discovered.get_checked(tile.coord())
    }

    pub fn undiscovered_count(&self) -> usize {
        board_size().count() - self.discovered_count()
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.iter().filter(|&&discovered| discovered).count()
    }

    pub fn undiscovered<'a>(&'a self) -> impl 'a + Iterator<Item = TileCoord> {
        TileCoord::all().filter(move |&tile| !self.is_discovered(tile))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const DIRECTIONS: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::East,
        CardinalDirection::South,
        CardinalDirection::West,
    ];

    #[test]
    fn rejects_coords_off_the_board() {
        assert!(TileCoord::try_new(Coord::new(4, 5)).is_ok());
        assert_eq!(
            TileCoord::try_new(Coord::new(5, 0)),
            Err(OutOfBoardError { x: 5, y: 0 })
        );
        assert!(TileCoord::try_new(Coord::new(0, 6)).is_err());
        assert!(TileCoord::try_new(Coord::new(-1, 2)).is_err());
    }

    #[test]
    fn all_visits_every_tile_once() {
        let tiles = TileCoord::all().collect::<Vec<_>>();
        assert_eq!(tiles.len(), 30);
        assert_eq!(tiles[0], TileCoord::at(0, 0));
        assert_eq!(tiles[29], TileCoord::at(4, 5));
    }

    #[test]
    fn unlisted_moves_are_blocked() {
        let board = Board::new(TileCoord::at(2, 2));
        // (0, 3) appears in none of the authored lists
        for &direction in &DIRECTIONS {
            assert!(!board.can_move(TileCoord::at(0, 3), direction));
        }
        assert_eq!(board.passability(TileCoord::at(0, 3)), Passability::default());
    }

    #[test]
    fn start_tile_rules() {
        let board = Board::new(TileCoord::at(2, 2));
        let start = TileCoord::at(2, 2);
        assert!(board.can_move(start, CardinalDirection::West));
        assert!(board.can_move(start, CardinalDirection::North));
        assert!(board.can_move(start, CardinalDirection::South));
        assert!(!board.can_move(start, CardinalDirection::East));
    }

    #[test]
    fn every_legal_move_stays_on_the_board() {
        let board = Board::new(TileCoord::at(2, 2));
        for tile in TileCoord::all() {
            for &direction in &DIRECTIONS {
                if board.can_move(tile, direction) {
                    let dest = tile.coord() + direction.coord();
                    assert!(TileCoord::try_new(dest).is_ok(), "{:?} {:?}", tile, direction);
                }
            }
        }
    }

    #[test]
    fn step_applies_unit_offsets() {
        let board = Board::new(TileCoord::at(2, 2));
        let tile = TileCoord::at(2, 2);
        assert_eq!(board.step(tile, CardinalDirection::West), TileCoord::at(1, 2));
        assert_eq!(board.step(tile, CardinalDirection::East), TileCoord::at(3, 2));
        assert_eq!(board.step(tile, CardinalDirection::North), TileCoord::at(2, 1));
        assert_eq!(board.step(tile, CardinalDirection::South), TileCoord::at(2, 3));
    }

    #[test]
    fn only_start_is_discovered_initially() {
        let board = Board::new(TileCoord::at(2, 2));
        assert_eq!(board.discovered_count(), 1);
        assert!(board.is_discovered(TileCoord::at(2, 2)));
        assert_eq!(board.undiscovered().count(), 29);
        assert_eq!(board.undiscovered_count(), 29);
        assert!(board.undiscovered().all(|tile| tile != TileCoord::at(2, 2)));
    }

    #[test]
    fn mark_discovered_is_idempotent() {
        let mut board = Board::new(TileCoord::at(2, 2));
        board.mark_discovered(TileCoord::at(0, 0));
        board.mark_discovered(TileCoord::at(0, 0));
        assert!(board.is_discovered(TileCoord::at(0, 0)));
        assert_eq!(board.discovered_count(), 2);
        assert_eq!(board.undiscovered_count(), board.undiscovered().count());
    }
}
