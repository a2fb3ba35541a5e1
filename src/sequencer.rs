use rand::Rng;

/// Uniformly random permutation of `0..n` (Fisher-Yates).
///
/// Used for the letter order, the category order and each round's turn
/// order. `n == 0` yields an empty sequence.
pub fn permute<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut seq: Vec<usize> = (0..n).collect();
    for i in 0..n.saturating_sub(1) {
        let r = rng.gen_range(i..n);
        seq.swap(i, r);
    }
    seq
}
