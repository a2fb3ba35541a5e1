use std::time::Duration;

use crate::error::GameError;

/// Settings fixed for the whole session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub name_size: usize,
    pub alphabet: Vec<char>,
    pub rounds: usize,
    pub categories: Vec<String>,
    /// Category whose answers keep only their first word (people's names).
    pub first_token_category: Option<usize>,
    pub base_time: Duration,
    pub time_decrement: Duration,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let fail = |msg: String| Err(GameError::Config(msg));

        if self.name_size == 0 {
            return fail("name size must be at least 1".into());
        }
        if self.alphabet.is_empty() {
            return fail("alphabet is empty".into());
        }
        let mut letters = self.alphabet.clone();
        letters.sort_unstable();
        letters.dedup();
        if letters.len() != self.alphabet.len() {
            return fail("alphabet repeats a letter".into());
        }
        if self.categories.is_empty() {
            return fail("no categories".into());
        }
        if self.rounds == 0 {
            return fail("at least one round is required".into());
        }
        if self.rounds > self.alphabet.len() {
            return fail(format!(
                "{} rounds but only {} letters",
                self.rounds,
                self.alphabet.len()
            ));
        }
        if self.rounds > self.categories.len() {
            return fail(format!(
                "{} rounds but only {} categories",
                self.rounds,
                self.categories.len()
            ));
        }
        if let Some(idx) = self.first_token_category {
            if idx >= self.categories.len() {
                return fail(format!("first-token category {idx} out of range"));
            }
        }
        if self.base_time.is_zero() {
            return fail("base time must be positive".into());
        }
        Ok(())
    }

    /// Time allowed at turn `position` of a round with `players` players.
    /// Earlier positions get `time_decrement` more per player still to come.
    pub fn turn_budget(&self, players: usize, position: usize) -> Duration {
        self.checked_turn_budget(players, position)
            .unwrap_or(Duration::MAX)
    }

    /// Like [`turn_budget`](Self::turn_budget), but `None` when the budget
    /// does not fit in a `Duration`.
    pub fn checked_turn_budget(&self, players: usize, position: usize) -> Option<Duration> {
        let later = players.saturating_sub(1).saturating_sub(position);
        let extra = self
            .time_decrement
            .checked_mul(u32::try_from(later).ok()?)?;
        self.base_time.checked_add(extra)
    }

    /// Reject settings whose longest turn (first position with `players`
    /// players) overflows.
    pub fn validate_budget(&self, players: usize) -> Result<(), GameError> {
        match self.checked_turn_budget(players, 0) {
            Some(_) => Ok(()),
            None => Err(GameError::Config(format!(
                "turn time for {players} players is too large"
            ))),
        }
    }
}

/// Configuration plus progress through the session.
#[derive(Debug, Clone)]
pub struct Session {
    pub config: SessionConfig,
    pub round: usize,
    pub turn: usize,
    pub letter_order: Vec<usize>,
    pub category_order: Vec<usize>,
    pub turn_order: Vec<usize>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            config,
            round: 0,
            turn: 0,
            letter_order: Vec::new(),
            category_order: Vec::new(),
            turn_order: Vec::new(),
        })
    }

    pub fn letter_for(&self, round: usize) -> Option<char> {
        self.letter_order
            .get(round)
            .map(|&i| self.config.alphabet[i])
    }

    pub fn category_index_for(&self, round: usize) -> Option<usize> {
        self.category_order.get(round).copied()
    }

    pub fn category_for(&self, round: usize) -> Option<&str> {
        self.category_index_for(round)
            .map(|i| self.config.categories[i].as_str())
    }

    pub fn current_letter(&self) -> Option<char> {
        self.letter_for(self.round)
    }

    pub fn current_category(&self) -> Option<&str> {
        self.category_for(self.round)
    }

    pub fn is_first_token_round(&self) -> bool {
        self.config.first_token_category.is_some()
            && self.category_index_for(self.round) == self.config.first_token_category
    }
}
