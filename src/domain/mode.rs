use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three timer modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeId {
    Focus,
    ShortBreak,
    LongBreak,
}

impl ModeId {
    /// Stable token for this mode (used on the command line and in logs)
    pub fn token(&self) -> &'static str {
        match self {
            ModeId::Focus => "foco",
            ModeId::ShortBreak => "descanso-curto",
            ModeId::LongBreak => "descanso-longo",
        }
    }

    /// Get all modes in display order
    pub fn all() -> &'static [ModeId] {
        &[ModeId::Focus, ModeId::ShortBreak, ModeId::LongBreak]
    }
}

impl fmt::Display for ModeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ModeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModeId::all()
            .iter()
            .copied()
            .find(|mode| mode.token() == s)
            .ok_or_else(|| CoreError::InvalidMode(s.to_string()))
    }
}

/// Mode durations in seconds, as read from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Durations {
    pub focus_secs: u32,
    pub short_break_secs: u32,
    pub long_break_secs: u32,
}

impl Default for Durations {
    fn default() -> Self {
        Self {
            focus_secs: 1500,
            short_break_secs: 300,
            long_break_secs: 900,
        }
    }
}

impl Durations {
    pub fn for_mode(&self, mode: ModeId) -> u32 {
        match mode {
            ModeId::Focus => self.focus_secs,
            ModeId::ShortBreak => self.short_break_secs,
            ModeId::LongBreak => self.long_break_secs,
        }
    }

    /// Name of the first zero duration, if any
    pub fn first_invalid(&self) -> Option<ModeId> {
        ModeId::all()
            .iter()
            .copied()
            .find(|mode| self.for_mode(*mode) == 0)
    }
}

/// Immutable description of a timer mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mode {
    pub id: ModeId,
    pub duration_secs: u32,
    pub label: &'static str,
    pub headline: &'static str,
}

/// Static table of the modes available for this session
#[derive(Debug, Clone)]
pub struct ModeRegistry {
    modes: [Mode; 3],
}

impl ModeRegistry {
    /// Build the registry. Zero durations are raised to one second so the
    /// countdown always has something to count.
    pub fn new(durations: &Durations) -> Self {
        let mode = |id: ModeId, label: &'static str, headline: &'static str| Mode {
            id,
            duration_secs: durations.for_mode(id).max(1),
            label,
            headline,
        };

        Self {
            modes: [
                mode(
                    ModeId::Focus,
                    "Focus",
                    "Optimize your productivity, dive into what matters.",
                ),
                mode(
                    ModeId::ShortBreak,
                    "Short break",
                    "How about a breather? Take a short break!",
                ),
                mode(
                    ModeId::LongBreak,
                    "Long break",
                    "Time to come up for air. Take a long break.",
                ),
            ],
        }
    }

    pub fn get(&self, id: ModeId) -> &Mode {
        match id {
            ModeId::Focus => &self.modes[0],
            ModeId::ShortBreak => &self.modes[1],
            ModeId::LongBreak => &self.modes[2],
        }
    }

    pub fn duration(&self, id: ModeId) -> u32 {
        self.get(id).duration_secs
    }

    /// Resolve a mode token, rejecting anything outside the fixed set
    pub fn resolve(&self, token: &str) -> Result<ModeId, CoreError> {
        token.trim().parse()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Mode> {
        self.modes.iter()
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new(&Durations::default())
    }
}
