use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{HuntError, HuntResult};
use crate::target::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Completed,
}

/// How the minutes part of a finished time is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinutesRule {
    /// `total / 60`, consistent with `total % 60` for the seconds.
    #[default]
    Floor,
    /// `round(total / 60)`, shown only above 60s. Gives "02:30" for 90s.
    Rounded,
}

/// A finished run, decomposed for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElapsedTime {
    pub total_seconds: u64,
    pub minutes_part: String,
    pub seconds_part: String,
}

impl ElapsedTime {
    pub fn from_seconds(total_seconds: u64, rule: MinutesRule) -> Self {
        let minutes = match rule {
            MinutesRule::Floor => total_seconds / 60,
            MinutesRule::Rounded if total_seconds > 60 => {
                (total_seconds as f64 / 60.0).round() as u64
            }
            MinutesRule::Rounded => 0,
        };

        Self {
            total_seconds,
            minutes_part: two_digits(minutes),
            seconds_part: two_digits(total_seconds % 60),
        }
    }

    /// Whole seconds between the two instants, rounded down.
    pub fn between(started_at: SystemTime, completed_at: SystemTime, rule: MinutesRule) -> Self {
        let ms = completed_at
            .duration_since(started_at)
            .unwrap_or_default()
            .as_millis() as u64;
        Self::from_seconds(ms / 1000, rule)
    }

    pub fn display(&self) -> String {
        format!("{} : {}", self.minutes_part, self.seconds_part)
    }
}

/// Zero-pad to at least two digits.
pub fn two_digits(n: u64) -> String {
    format!("{:02}", n)
}

/// What a guess did to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    Miss,
    Found(Target),
    Completed(ElapsedTime),
    /// The session is already over.
    Ignored,
}

/// One play-through, from the first render until every target is found.
#[derive(Debug, Clone)]
pub struct GameSession {
    remaining: Vec<Target>,
    active: Option<Target>,
    started_at: Option<SystemTime>,
    completed_at: Option<SystemTime>,
    elapsed: Option<ElapsedTime>,
    minutes_rule: MinutesRule,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new(MinutesRule::default())
    }
}

impl GameSession {
    pub fn new(minutes_rule: MinutesRule) -> Self {
        Self {
            remaining: Target::ALL.to_vec(),
            active: Target::ALL.first().copied(),
            started_at: None,
            completed_at: None,
            elapsed: None,
            minutes_rule,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.remaining.is_empty() {
            Phase::Completed
        } else {
            Phase::Playing
        }
    }

    pub fn remaining(&self) -> &[Target] {
        &self.remaining
    }

    pub fn is_found(&self, target: Target) -> bool {
        !self.remaining.contains(&target)
    }

    pub fn active(&self) -> Option<Target> {
        self.active
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn completed_at(&self) -> Option<SystemTime> {
        self.completed_at
    }

    /// Set once, at the Playing → Completed edge.
    pub fn elapsed(&self) -> Option<&ElapsedTime> {
        self.elapsed.as_ref()
    }

    /// Start the clock the first time the full target set is present and no
    /// timer is running. Returns whether it armed.
    pub fn on_timer_arm(&mut self, now: SystemTime) -> bool {
        if self.started_at.is_none() && self.remaining.len() == Target::ALL.len() {
            self.started_at = Some(now);
            debug!("session timer armed");
            true
        } else {
            false
        }
    }

    pub fn on_guess(&mut self, hit: bool, now: SystemTime) -> GuessOutcome {
        let Some(active) = self.active else {
            return GuessOutcome::Ignored;
        };
        if !hit {
            return GuessOutcome::Miss;
        }

        self.remaining.retain(|t| *t != active);
        info!(target_found = %active, remaining = self.remaining.len(), "target found");

        if let Some(next) = self.remaining.first() {
            self.active = Some(*next);
            return GuessOutcome::Found(active);
        }

        self.active = None;
        self.completed_at = Some(now);
        let started_at = self.started_at.unwrap_or_else(|| {
            warn!("session completed without an armed timer");
            now
        });
        let elapsed = ElapsedTime::between(started_at, now, self.minutes_rule);
        info!(total_seconds = elapsed.total_seconds, "all targets found");
        self.elapsed = Some(elapsed.clone());
        GuessOutcome::Completed(elapsed)
    }

    /// Make `target` the one the next guess is checked against.
    pub fn select_target(&mut self, target: Target) -> HuntResult<()> {
        if self.phase() == Phase::Completed {
            return Ok(());
        }
        if !self.remaining.contains(&target) {
            return Err(HuntError::AlreadyFound(target));
        }
        self.active = Some(target);
        Ok(())
    }

    /// Next remaining target after the active one, wrapping around.
    pub fn next_remaining(&self) -> Option<Target> {
        let active = self.active?;
        let pos = self.remaining.iter().position(|t| *t == active)?;
        self.remaining
            .get((pos + 1) % self.remaining.len())
            .copied()
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.minutes_rule);
        info!("session reset");
    }
}
