use rand::Rng;
use tracing::{debug, info, warn};

use crate::deadline::Deadline;
use crate::display::{GameDisplay, RoundLine};
use crate::error::GameError;
use crate::results::{self, Player};
use crate::runtime::{await_and_read, LineSource, ReadOutcome};
use crate::scoring::score_round;
use crate::sequencer::permute;
use crate::session::{Session, SessionConfig};
use crate::validator::AnswerValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Setup,
    RoundStart,
    TurnActive,
    RoundScoring,
    SessionComplete,
}

/// How a single turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnResult {
    Answered(String),
    TimedOut,
}

/// A full game: session progress, the players, and the input and output
/// it talks to.
pub struct Game<S: LineSource, D: GameDisplay, R: Rng> {
    session: Session,
    players: Vec<Player>,
    validator: AnswerValidator,
    deadline: Deadline,
    /// Answers of the round in progress, indexed like `players`.
    answers: Vec<String>,
    phase: Phase,
    source: S,
    display: D,
    rng: R,
}

impl<S: LineSource, D: GameDisplay, R: Rng> Game<S, D, R> {
    pub fn new(
        config: SessionConfig,
        names: Vec<String>,
        source: S,
        display: D,
        rng: R,
    ) -> Result<Self, GameError> {
        if names.is_empty() {
            return Err(GameError::Players("no players".into()));
        }
        if let Some(bad) = names
            .iter()
            .find(|n| n.is_empty() || n.chars().count() > config.name_size)
        {
            return Err(GameError::Players(format!(
                "name {bad:?} must be 1 to {} characters",
                config.name_size
            )));
        }
        config.validate_budget(names.len())?;
        let validator = AnswerValidator::new(&config.alphabet);
        let session = Session::new(config)?;
        let players = names.into_iter().map(Player::new).collect();

        Ok(Self {
            session,
            players,
            validator,
            deadline: Deadline::default(),
            answers: Vec::new(),
            phase: Phase::Setup,
            source,
            display,
            rng,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Score per category for one player, in round order.
    pub fn category_totals(&self, player: usize) -> Vec<(&str, u32)> {
        self.players[player]
            .scores
            .iter()
            .enumerate()
            .filter_map(|(round, &score)| Some((self.session.category_for(round)?, score)))
            .collect()
    }

    /// Play the whole session and return the winner's index.
    pub fn run(&mut self) -> Result<Option<usize>, GameError> {
        while self.phase != Phase::SessionComplete {
            self.step()?;
        }
        Ok(results::winner(&self.players))
    }

    /// Advance by one transition.
    pub fn step(&mut self) -> Result<Phase, GameError> {
        self.phase = match self.phase {
            Phase::Setup => self.setup(),
            Phase::RoundStart => self.start_round(),
            Phase::TurnActive => self.play_turn()?,
            Phase::RoundScoring => self.score(),
            Phase::SessionComplete => Phase::SessionComplete,
        };
        debug!(phase = %self.phase, round = self.session.round, "step");
        Ok(self.phase)
    }

    fn setup(&mut self) -> Phase {
        let cfg = &self.session.config;
        let (letters, categories) = (cfg.alphabet.len(), cfg.categories.len());
        self.session.letter_order = permute(letters, &mut self.rng);
        self.session.category_order = permute(categories, &mut self.rng);
        self.session.round = 0;
        info!(players = self.players.len(), rounds = cfg.rounds, "session started");
        Phase::RoundStart
    }

    fn start_round(&mut self) -> Phase {
        self.session.turn_order = permute(self.players.len(), &mut self.rng);
        self.session.turn = 0;
        self.answers = vec![String::new(); self.players.len()];

        // orders are filled in setup and rounds never outnumber letters or categories
        let letter = self.session.current_letter().unwrap_or('?');
        let category = self.session.current_category().unwrap_or_default();
        info!(round = self.session.round, %letter, category, "round started");
        self.display.round_started(self.session.round, letter, category);
        Phase::TurnActive
    }

    fn play_turn(&mut self) -> Result<Phase, GameError> {
        let position = self.session.turn;
        let player = self.session.turn_order[position];
        let budget = self.session.config.turn_budget(self.players.len(), position);
        self.deadline.reset(budget);

        let result = self.collect_answer(player)?;

        let spent = budget.saturating_sub(self.deadline.remaining());
        self.players[player].elapsed += spent;
        debug!(player = %self.players[player].name, ?result, ?spent, "turn finished");

        self.answers[player] = match result {
            TurnResult::Answered(answer) if self.session.is_first_token_round() => {
                first_token(&answer).to_string()
            }
            TurnResult::Answered(answer) => answer,
            TurnResult::TimedOut => String::new(),
        };

        self.session.turn += 1;
        if self.session.turn == self.players.len() {
            Ok(Phase::RoundScoring)
        } else {
            Ok(Phase::TurnActive)
        }
    }

    /// Prompt until a valid answer arrives or the clock runs out. Rejected
    /// answers do not stop the clock.
    fn collect_answer(&mut self, player: usize) -> Result<TurnResult, GameError> {
        let letter = self.session.current_letter().unwrap_or('?');
        let category = self.session.current_category().unwrap_or_default();
        let name = self.players[player].name.as_str();

        loop {
            if self.deadline.is_expired() {
                self.display.turn_expired(name);
                return Ok(TurnResult::TimedOut);
            }
            self.display
                .prompt(name, category, letter, self.deadline.remaining());

            match await_and_read(&mut self.source, &mut self.deadline) {
                ReadOutcome::Expired => {
                    self.display.turn_expired(name);
                    return Ok(TurnResult::TimedOut);
                }
                ReadOutcome::Line(line) => {
                    let answer = line.trim();
                    if self.validator.starts_with(answer, letter) {
                        return Ok(TurnResult::Answered(answer.to_string()));
                    }
                    debug!(player = name, answer, %letter, "answer rejected");
                    self.display.answer_rejected(name, answer, letter);
                }
                ReadOutcome::Error(e) => {
                    warn!(player = name, error = %e, "input failed mid-turn");
                    return Err(e.into());
                }
            }
        }
    }

    fn score(&mut self) -> Phase {
        let scores = score_round(&self.answers);
        for (player, score) in self.players.iter_mut().zip(&scores) {
            player.scores.push(*score);
        }

        let round = self.session.round;
        let lines: Vec<RoundLine<'_>> = self
            .players
            .iter()
            .zip(&self.answers)
            .zip(&scores)
            .map(|((p, answer), &score)| RoundLine {
                player: &p.name,
                answer,
                score,
            })
            .collect();
        info!(round, ?scores, "round scored");
        self.display.round_results(round, &lines);
        self.answers.clear();

        self.session.round += 1;
        if self.session.round < self.session.config.rounds {
            return Phase::RoundStart;
        }

        let ranked = results::standings(&self.players);
        let standings: Vec<(&str, u32)> = ranked
            .iter()
            .map(|p| (p.name.as_str(), p.total_score()))
            .collect();
        let winner = results::winner(&self.players).map(|i| self.players[i].name.as_str());
        info!(winner, "session complete");
        self.display.final_scores(&standings, winner);
        Phase::SessionComplete
    }
}

/// First whitespace-separated word of `answer`.
pub fn first_token(answer: &str) -> &str {
    answer.split_whitespace().next().unwrap_or_default()
}
