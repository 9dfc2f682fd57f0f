//! Piece queue - lookahead buffer of upcoming piece kinds
//!
//! Holds exactly [`QUEUE_LEN`] kinds, each an independent uniform draw over the
//! seven kinds. Consuming the front shifts the rest forward and appends a fresh
//! draw, so the length never changes.
//!
//! Draws come from a seeded ChaCha RNG so that a game can be replayed from its seed.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::{PieceKind, PIECE_KIND_COUNT, QUEUE_LEN};

/// Draw one piece kind uniformly from `[0, 7)`
pub fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.gen_range(0..PIECE_KIND_COUNT)]
}

/// Fixed-length queue of upcoming pieces
#[derive(Debug, Clone)]
pub struct PieceQueue {
    kinds: [PieceKind; QUEUE_LEN],
    rng: ChaCha8Rng,
}

impl PieceQueue {
    /// Create a queue whose draws are determined by `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a queue drawing from an existing RNG
    pub fn with_rng(mut rng: ChaCha8Rng) -> Self {
        let kinds = [(); QUEUE_LEN].map(|_| random_kind(&mut rng));
        Self { kinds, rng }
    }

    /// Upcoming kinds, front first
    pub fn peek(&self) -> &[PieceKind; QUEUE_LEN] {
        &self.kinds
    }

    /// Kind that the next `dequeue_and_refill` returns
    pub fn front(&self) -> PieceKind {
        self.kinds[0]
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Remove and return the front kind, appending a fresh draw at the back
    pub fn dequeue_and_refill(&mut self) -> PieceKind {
        let front = self.kinds[0];
        self.kinds.rotate_left(1);
        self.kinds[QUEUE_LEN - 1] = random_kind(&mut self.rng);
        front
    }

    /// Replace every entry with a fresh draw (new session)
    pub fn refill(&mut self) {
        for slot in self.kinds.iter_mut() {
            *slot = random_kind(&mut self.rng);
        }
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_deterministic() {
        let mut a = PieceQueue::new(12345);
        let mut b = PieceQueue::new(12345);
        assert_eq!(a.peek(), b.peek());
        for _ in 0..50 {
            assert_eq!(a.dequeue_and_refill(), b.dequeue_and_refill());
        }
    }

    #[test]
    fn test_dequeue_shifts_left() {
        let mut queue = PieceQueue::new(7);
        let before = *queue.peek();

        let front = queue.dequeue_and_refill();

        assert_eq!(front, before[0]);
        assert_eq!(queue.peek()[0], before[1]);
        assert_eq!(queue.peek()[1], before[2]);
        assert_eq!(queue.len(), QUEUE_LEN);
    }

    #[test]
    fn test_draws_cover_all_kinds() {
        let mut queue = PieceQueue::new(99);
        let mut seen = [false; PIECE_KIND_COUNT];
        for _ in 0..500 {
            seen[queue.dequeue_and_refill().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "missing kinds: {:?}", seen);
    }

    #[test]
    fn test_refill_keeps_length() {
        let mut queue = PieceQueue::new(3);
        queue.refill();
        assert_eq!(queue.len(), QUEUE_LEN);
        assert_eq!(queue.peek().len(), QUEUE_LEN);
    }
}
