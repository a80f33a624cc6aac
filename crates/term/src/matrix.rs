//! Display matrix: the board as a host draws it.
//!
//! The matrix has `VISIBLE_ROWS` rows: one buffer row above the board, then
//! the 20 board rows. Display row `r` shows board row `r - BUFFER_ROWS`, so the
//! buffer row only ever shows parts of the active piece (or its ghost).
//!
//! Cell precedence: active piece, then ghost (only over empty cells), then
//! whatever is locked on the board.

use crate::core::{Board, RandomSource, Tetromino};
use crate::engine::GameSession;
use crate::types::{PieceKind, Point, BOARD_WIDTH, BUFFER_ROWS, VISIBLE_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderCell {
    pub value: Option<PieceKind>,
    pub is_active: bool,
    pub is_ghost: bool,
}

pub type VisibleMatrix = [[RenderCell; BOARD_WIDTH as usize]; VISIBLE_ROWS as usize];

/// Build the matrix from its parts.
pub fn build_matrix(board: &Board, active: Option<&Tetromino>, ghost: &[Point]) -> VisibleMatrix {
    let mut rows = [[RenderCell::default(); BOARD_WIDTH as usize]; VISIBLE_ROWS as usize];
    let active_blocks = active.map(|p| p.blocks());
    let active_kind = active.map(|p| p.kind);

    for (display_row, row) in rows.iter_mut().enumerate() {
        let board_row = display_row as i8 - BUFFER_ROWS as i8;
        for (column, cell) in row.iter_mut().enumerate() {
            let pos = (column as i8, board_row);

            if active_blocks.is_some_and(|blocks| blocks.contains(&pos)) {
                *cell = RenderCell {
                    value: active_kind,
                    is_active: true,
                    is_ghost: false,
                };
                continue;
            }

            let locked = board.get(pos.0, pos.1).flatten();
            if locked.is_none() && ghost.contains(&pos) {
                *cell = RenderCell {
                    value: active_kind,
                    is_active: false,
                    is_ghost: true,
                };
                continue;
            }

            cell.value = locked;
        }
    }

    rows
}

/// Matrix for a session, honouring the ghost setting
pub fn visible_matrix<R: RandomSource>(session: &GameSession<R>) -> VisibleMatrix {
    let state = session.state();
    let active = state.active();
    build_matrix(state.board(), active.as_ref(), &session.ghost_blocks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedRng;
    use crate::engine::Settings;
    use crate::types::Rotation;

    #[test]
    fn buffer_row_offsets_board() {
        let mut board = Board::new();
        board.set(0, 0, Some(PieceKind::Z));
        board.set(9, 19, Some(PieceKind::L));

        let m = build_matrix(&board, None, &[]);
        assert_eq!(m.len(), 21);
        assert_eq!(m[0][0].value, None);
        assert_eq!(m[1][0].value, Some(PieceKind::Z));
        assert_eq!(m[20][9].value, Some(PieceKind::L));
    }

    #[test]
    fn active_piece_shows_in_buffer_row() {
        let board = Board::new();
        // I at rotation 0 sits on its anchor row + 1 = row -1
        let piece = Tetromino {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 3,
            y: -2,
        };
        let m = build_matrix(&board, Some(&piece), &[]);
        for x in 3..7 {
            assert!(m[0][x].is_active);
            assert_eq!(m[0][x].value, Some(PieceKind::I));
        }
        assert!(!m[0][2].is_active);
    }

    #[test]
    fn active_beats_ghost_and_ghost_skips_filled() {
        let board = Board::new();
        // Blocks at (0, 5) (1, 5) (2, 5) (1, 6)
        let piece = Tetromino {
            kind: PieceKind::T,
            rotation: Rotation::North,
            x: 0,
            y: 4,
        };
        let ghost = [(1, 5), (2, 6)];
        let m = build_matrix(&board, Some(&piece), &ghost);

        let active_cell = m[(5 + BUFFER_ROWS) as usize][1];
        assert!(active_cell.is_active);
        assert!(!active_cell.is_ghost);

        let ghost_cell = m[(6 + BUFFER_ROWS) as usize][2];
        assert!(ghost_cell.is_ghost);
        assert_eq!(ghost_cell.value, Some(PieceKind::T));
    }

    #[test]
    fn ghost_never_covers_locked_cells() {
        let mut board = Board::new();
        board.set(4, 10, Some(PieceKind::S));
        let m = build_matrix(&board, None, &[(4, 10)]);
        let cell = m[11][4];
        assert!(!cell.is_ghost);
        assert_eq!(cell.value, Some(PieceKind::S));
    }

    #[test]
    fn session_matrix_follows_ghost_setting() {
        let mut session = GameSession::with_rng(Settings::default(), 0, ScriptedRng::zeros());
        let ghosts = |m: &VisibleMatrix| m.iter().flatten().filter(|c| c.is_ghost).count();

        assert_eq!(ghosts(&visible_matrix(&session)), 4);
        session.settings_mut().toggle_ghost_piece();
        assert_eq!(ghosts(&visible_matrix(&session)), 0);
    }
}
