//! Human-readable move notation for history display.
//!
//! Format: piece letter, origin square, `x` if a capture else `-`,
//! destination square. Examples: `Pe2-e4`, `Nb1xc3`.

use super::types::Move;
use super::Board;

impl Move {
    /// Render this move against the board it is about to be applied to.
    ///
    /// Must be called before `apply`; afterwards the origin square is empty
    /// and the capture can no longer be observed.
    #[must_use]
    pub fn notation(&self, board: &Board) -> String {
        let letter = board
            .piece_at(self.from())
            .map_or('?', |piece| piece.kind().letter());
        let separator = if self.is_capture(board) { 'x' } else { '-' };
        format!("{}{}{}{}", letter, self.from(), separator, self.to())
    }
}
