//! Screen flow around a run: menu, character select, playing, game over
//!
//! The session is the only thing a host talks to. It forwards frames to the
//! simulation while playing and records finished runs in the leaderboard.

use serde::{Deserialize, Serialize};

use crate::highscores::HighScores;
use crate::sim::{RunEvent, RunState, TickInput, tick};
use crate::tuning::RunTuning;

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Menu,
    CharacterSelect,
    Playing,
    GameOver,
}

/// Cosmetic runner choice (all share one hitbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Character {
    #[default]
    Human,
    Pig,
    Cow,
    Alien,
}

impl Character {
    pub const ALL: [Character; 4] = [
        Character::Human,
        Character::Pig,
        Character::Cow,
        Character::Alien,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Character::Human => "Human",
            Character::Pig => "Pig",
            Character::Cow => "Cow",
            Character::Alien => "Alien",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

/// Background palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    #[default]
    Day,
    Night,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Day => Theme::Night,
            Theme::Night => Theme::Day,
        }
    }
}

/// One player's session across many runs
#[derive(Debug, Clone)]
pub struct Session {
    pub phase: SessionPhase,
    pub character: Character,
    pub theme: Theme,
    pub run: RunState,
    pub high_scores: HighScores,
    /// Rank of the last finished run, if it made the board
    pub last_rank: Option<usize>,
}

impl Session {
    pub fn new(tuning: RunTuning, seed: u64) -> Self {
        Self {
            phase: SessionPhase::Menu,
            character: Character::default(),
            theme: Theme::default(),
            run: RunState::new(tuning, seed),
            high_scores: HighScores::new(),
            last_rank: None,
        }
    }

    /// Flip day/night; only offered on the menu
    pub fn toggle_theme(&mut self) -> bool {
        if self.phase != SessionPhase::Menu {
            return false;
        }
        self.theme = self.theme.toggled();
        true
    }

    pub fn open_character_select(&mut self) -> bool {
        self.transition(SessionPhase::Menu, SessionPhase::CharacterSelect)
    }

    /// Pick a runner and start a fresh run
    pub fn select_character(&mut self, character: Character) -> bool {
        if !self.transition(SessionPhase::CharacterSelect, SessionPhase::Playing) {
            return false;
        }
        self.character = character;
        self.last_rank = None;
        self.run.reset();
        log::info!("Playing as {}", character.as_str());
        true
    }

    pub fn play_again(&mut self) -> bool {
        self.transition(SessionPhase::GameOver, SessionPhase::CharacterSelect)
    }

    pub fn main_menu(&mut self) -> bool {
        self.transition(SessionPhase::GameOver, SessionPhase::Menu)
    }

    /// Advance one simulation step. Does nothing outside of Playing.
    pub fn frame(&mut self, input: &TickInput, dt: f32) -> Vec<RunEvent> {
        if self.phase != SessionPhase::Playing {
            return Vec::new();
        }

        let events = tick(&mut self.run, input, dt);
        if self.run.is_ended() {
            self.last_rank =
                self.high_scores
                    .add_score(self.run.score, self.run.time_ticks, self.character);
            self.phase = SessionPhase::GameOver;
            log::info!(
                "Game over: score {} after {:.1}s",
                self.run.score,
                self.run.elapsed_secs()
            );
        }
        events
    }

    fn transition(&mut self, from: SessionPhase, to: SessionPhase) -> bool {
        if self.phase != from {
            log::debug!("Ignoring {:?} -> {:?} while in {:?}", from, to, self.phase);
            return false;
        }
        self.phase = to;
        true
    }
}
