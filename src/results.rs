use std::cmp::Ordering;
use std::time::Duration;

/// A player as seen by the game: name plus per-round scores and the total
/// time spent answering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// One entry per completed round, in round order.
    pub scores: Vec<u32>,
    pub elapsed: Duration,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: Vec::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn total_score(&self) -> u32 {
        self.scores.iter().sum()
    }
}

/// True if `a` ranks strictly ahead of `b`: higher total, then less time.
fn beats(a: &Player, b: &Player) -> bool {
    match a.total_score().cmp(&b.total_score()) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => a.elapsed < b.elapsed,
    }
}

/// Index of the winner. A full tie on score and time goes to whoever comes
/// first in `players`.
pub fn winner(players: &[Player]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, p) in players.iter().enumerate() {
        match best {
            Some(b) if !beats(p, &players[b]) => {}
            _ => best = Some(i),
        }
    }
    best
}

/// Players ordered best first, using the same ranking as [`winner`].
pub fn standings(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<&Player> = players.iter().collect();
    // stable sort keeps iteration order for exact ties
    ranked.sort_by(|a, b| {
        b.total_score()
            .cmp(&a.total_score())
            .then(a.elapsed.cmp(&b.elapsed))
    });
    ranked
}
