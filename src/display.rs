use std::io::{self, Write};
use std::time::Duration;

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

/// One player's line in the end-of-round table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundLine<'a> {
    pub player: &'a str,
    pub answer: &'a str,
    pub score: u32,
}

/// Output side of the game. Every call is fire-and-forget; the engine never
/// looks at what the display did.
pub trait GameDisplay {
    /// Free-form text, used for setup prompts.
    fn message(&mut self, _text: &str) {}

    fn round_started(&mut self, _round: usize, _letter: char, _category: &str) {}

    /// Ask `player` for an answer with `remaining` time on the clock.
    fn prompt(&mut self, _player: &str, _category: &str, _letter: char, _remaining: Duration) {}

    fn answer_rejected(&mut self, _player: &str, _answer: &str, _letter: char) {}

    fn turn_expired(&mut self, _player: &str) {}

    fn round_results(&mut self, _round: usize, _lines: &[RoundLine<'_>]) {}

    /// Final standings, best first.
    fn final_scores(&mut self, _standings: &[(&str, u32)], _winner: Option<&str>) {}
}

/// Pad `s` with spaces to `width` terminal columns.
fn pad(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    format!("{s}{}", " ".repeat(width.saturating_sub(w)))
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(UnicodeWidthStr::width)
        .chain(std::iter::once(UnicodeWidthStr::width(header)))
        .max()
        .unwrap_or(0)
}

/// Plain line-oriented terminal output on stdout.
#[derive(Debug, Default)]
pub struct TerminalDisplay;

impl TerminalDisplay {
    pub fn new() -> Self {
        Self
    }

    fn write(&self, text: &str) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }
}

impl GameDisplay for TerminalDisplay {
    fn message(&mut self, text: &str) {
        self.write(text);
    }

    fn round_started(&mut self, round: usize, letter: char, category: &str) {
        self.write(&format!(
            "\n{} letter {} | category {}\n",
            format!("Round {}:", round + 1).bold(),
            letter.to_string().yellow().bold(),
            category.cyan().bold()
        ));
    }

    fn prompt(&mut self, player: &str, category: &str, letter: char, remaining: Duration) {
        let secs = remaining.as_secs_f64().ceil() as u64;
        self.write(&format!(
            "{} [{category} with {letter}, {}s left]: ",
            player.bold(),
            secs.to_string().red()
        ));
    }

    fn answer_rejected(&mut self, _player: &str, answer: &str, letter: char) {
        self.write(&format!(
            "{} \"{answer}\" does not start with {letter}.\n",
            "Invalid!".red().bold()
        ));
    }

    fn turn_expired(&mut self, player: &str) {
        self.write(&format!("\n{} {player} ran out of time.\n", "Time!".red().bold()));
    }

    fn round_results(&mut self, round: usize, lines: &[RoundLine<'_>]) {
        let pw = column_width("Player", lines.iter().map(|l| l.player));
        let aw = column_width("Answer", lines.iter().map(|l| l.answer));

        let mut table = format!(
            "\n{}\n{} | {} | Points\n",
            format!("Round {} results", round + 1).bold(),
            pad("Player", pw),
            pad("Answer", aw)
        );
        table.push_str(&format!("{}\n", "-".repeat(pw + aw + 12)));
        for line in lines {
            let answer = if line.answer.is_empty() { "-" } else { line.answer };
            table.push_str(&format!(
                "{} | {} | {}\n",
                pad(line.player, pw),
                pad(answer, aw),
                line.score
            ));
        }
        self.write(&table);
    }

    fn final_scores(&mut self, standings: &[(&str, u32)], winner: Option<&str>) {
        let pw = column_width("Player", standings.iter().map(|(p, _)| *p));
        let mut table = format!("\n{}\n", "Final scores".bold());
        for (player, total) in standings {
            table.push_str(&format!("{} | {total}\n", pad(player, pw)));
        }
        if let Some(w) = winner {
            table.push_str(&format!("\n{} {}\n", "Winner:".green().bold(), w.bold()));
        }
        self.write(&table);
    }
}
