use itertools::Itertools;

/// Score every answer of a round.
///
/// Each answer earns its length divided by the number of players who gave
/// the same answer (case-insensitive), rounded half up. Empty answers score
/// zero.
pub fn score_round<S: AsRef<str>>(answers: &[S]) -> Vec<u32> {
    let keys: Vec<String> = answers.iter().map(|a| a.as_ref().to_lowercase()).collect();
    let counts = keys.iter().counts();

    answers
        .iter()
        .zip(&keys)
        .map(|(answer, key)| {
            let len = answer.as_ref().chars().count();
            let dupes = counts.get(key).copied().unwrap_or(1);
            round_half_up(len, dupes)
        })
        .collect()
}

/// `num / den` rounded half up, in integers.
fn round_half_up(num: usize, den: usize) -> u32 {
    if den == 0 {
        return 0;
    }
    let q = (2 * num + den) / (2 * den);
    u32::try_from(q).unwrap_or(u32::MAX)
}
