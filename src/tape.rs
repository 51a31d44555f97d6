//! The memory tape shared by both execution backends.
//!
//! A fixed-capacity array of unsigned 8-bit cells plus a head index. The tape
//! is circular: moving left from cell 0 lands on the last cell and moving
//! right from the last cell lands on cell 0, so the head is always a valid
//! index between instructions. Cell arithmetic wraps modulo 256. Neither
//! movement nor arithmetic can fail.

/// Default number of cells on a freshly created tape.
pub const DEFAULT_TAPE_CAPACITY: usize = 30_000;

/// A circular byte tape with a single read/write head.
///
/// Each run of a backend owns exactly one `Tape`, created zeroed with the
/// head at cell 0. Nothing persists across runs.
#[derive(Debug)]
pub struct Tape {
    cells: Vec<u8>,
    head: usize,
}

impl Tape {
    /// Create a zeroed tape with [`DEFAULT_TAPE_CAPACITY`] cells.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_TAPE_CAPACITY)
    }

    /// Create a zeroed tape with a custom number of cells (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: vec![0; capacity.max(1)],
            head: 0,
        }
    }

    /// Number of cells on the tape.
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    /// Current head position, always in `[0, capacity)`.
    pub fn head(&self) -> usize {
        self.head
    }

    /// The byte under the head.
    pub fn read(&self) -> u8 {
        self.cells[self.head]
    }

    /// Overwrite the byte under the head.
    pub fn write(&mut self, byte: u8) {
        self.cells[self.head] = byte;
    }

    /// Increment the cell under the head, wrapping 255 -> 0.
    pub fn increment(&mut self) {
        self.cells[self.head] = self.cells[self.head].wrapping_add(1);
    }

    /// Decrement the cell under the head, wrapping 0 -> 255.
    pub fn decrement(&mut self) {
        self.cells[self.head] = self.cells[self.head].wrapping_sub(1);
    }

    /// Move the head one cell left, wrapping from 0 to the last cell.
    pub fn move_left(&mut self) {
        self.head = if self.head == 0 {
            self.cells.len() - 1
        } else {
            self.head - 1
        };
    }

    /// Move the head one cell right, wrapping from the last cell to 0.
    pub fn move_right(&mut self) {
        self.head = if self.head == self.cells.len() - 1 {
            0
        } else {
            self.head + 1
        };
    }
}

impl Default for Tape {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_tape_is_zeroed_with_head_at_origin() {
        let tape = Tape::with_capacity(16);
        assert_eq!(tape.head(), 0);
        assert_eq!(tape.read(), 0);
        assert_eq!(tape.capacity(), 16);
    }

    #[test]
    fn moving_left_from_origin_wraps_to_last_cell() {
        let mut tape = Tape::with_capacity(10);
        tape.move_left();
        assert_eq!(tape.head(), 9);
    }

    #[test]
    fn moving_right_from_last_cell_wraps_to_origin() {
        let mut tape = Tape::with_capacity(10);
        for _ in 0..9 {
            tape.move_right();
        }
        assert_eq!(tape.head(), 9);
        tape.move_right();
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn capacity_consecutive_moves_return_to_start() {
        // Wraparound is a bijection on [0, capacity): a full lap in either
        // direction is the identity.
        let mut tape = Tape::with_capacity(7);
        for _ in 0..7 {
            tape.move_left();
        }
        assert_eq!(tape.head(), 0);
        for _ in 0..7 {
            tape.move_right();
        }
        assert_eq!(tape.head(), 0);
    }

    #[test]
    fn head_stays_in_range_through_mixed_moves() {
        let mut tape = Tape::with_capacity(3);
        for step in 0..100 {
            if step % 2 == 0 {
                tape.move_left();
            } else {
                tape.move_right();
            }
            assert!(tape.head() < tape.capacity());
        }
    }

    #[test]
    fn increment_wraps_modulo_256() {
        let mut tape = Tape::with_capacity(1);
        tape.write(255);
        tape.increment();
        assert_eq!(tape.read(), 0);
    }

    #[test]
    fn decrement_wraps_modulo_256() {
        let mut tape = Tape::with_capacity(1);
        tape.decrement();
        assert_eq!(tape.read(), 255);
    }

    #[test]
    fn write_then_read_round_trips() {
        let mut tape = Tape::with_capacity(4);
        tape.move_right();
        tape.write(42);
        assert_eq!(tape.read(), 42);
        tape.move_left();
        assert_eq!(tape.read(), 0);
    }
}
