use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// The source of every random decision the engine makes.
///
/// Production games use a seeded [ChaCha8Rng]; tests substitute a scripted source
/// so that rolls, tie-breaks and die losses can be dictated exactly.
pub trait DiceSource {
    /// Rolls one die with `sides` faces, returning a value in `1..=sides`.
    fn roll(&mut self, sides: u32) -> u32;

    /// Picks an index uniformly from `0..len`, where `len` is at least 2.
    fn pick(&mut self, len: usize) -> usize;
}

impl DiceSource for ChaCha8Rng {
    fn roll(&mut self, sides: u32) -> u32 {
        self.gen_range(1..=sides)
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Picks an index from `0..len`, only consulting the source when there is a real choice.
pub fn pick_index(dice: &mut impl DiceSource, len: usize) -> usize {
    debug_assert!(len > 0);
    if len == 1 {
        0
    } else {
        dice.pick(len)
    }
}
