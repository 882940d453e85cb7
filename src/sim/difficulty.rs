//! Score-driven difficulty tiers
//!
//! Difficulty only ever depends on the score (whole seconds survived). Going up
//! a tier speeds up the ground and new obstacles, shortens the spawn interval,
//! and pauses spawning for the tick the change happens on.

use serde::{Deserialize, Serialize};

use crate::Settings;

/// Difficulty level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum Tier {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Tier {
    /// Index into the per-tier factor tables
    pub fn index(self) -> usize {
        match self {
            Tier::Easy => 0,
            Tier::Medium => 1,
            Tier::Hard => 2,
        }
    }

    /// Text flashed when this tier begins
    pub fn announcement(self) -> &'static str {
        match self {
            Tier::Easy => "",
            Tier::Medium => "Faster!!!",
            Tier::Hard => "Even Faster!!!!!!",
        }
    }
}

/// What changed during an evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Moved up to the given tier
    TierUp(Tier),
    /// Score fell back into the easy range (after a restart)
    Reset,
}

/// Tier plus the spawn gate it controls
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difficulty {
    pub tier: Tier,
    pub spawn_enabled: bool,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            tier: Tier::Easy,
            spawn_enabled: true,
        }
    }
}

impl Difficulty {
    /// Score at which `tier` begins (Easy begins at 0)
    fn entry_score(tier: Tier, settings: &Settings) -> u32 {
        match tier {
            Tier::Easy => 0,
            Tier::Medium => settings.tier_thresholds[0],
            Tier::Hard => settings.tier_thresholds[1],
        }
    }

    /// Re-evaluate against the current score.
    ///
    /// Tier-ups only happen while the session is active. Thresholds compare with
    /// `>=` against the current tier, so a frame that skips the exact threshold
    /// second still moves up.
    pub fn evaluate(&mut self, score: u32, active: bool, settings: &Settings) -> Option<Transition> {
        if score <= settings.easy_ceiling {
            self.spawn_enabled = true;
            if self.tier != Tier::Easy {
                self.tier = Tier::Easy;
                return Some(Transition::Reset);
            }
            return None;
        }

        if active {
            for next in [Tier::Medium, Tier::Hard] {
                if self.tier < next && score >= Self::entry_score(next, settings) {
                    self.tier = next;
                    self.spawn_enabled = false;
                    return Some(Transition::TierUp(next));
                }
            }
        }

        // Spawning resumes once the score has moved past the transition second
        if score > Self::entry_score(self.tier, settings) {
            self.spawn_enabled = true;
        }
        None
    }

    /// Obstacle/ground speed multiplier for the current tier
    pub fn speed_factor(&self, settings: &Settings) -> f32 {
        settings.speed_factor(self.tier.index())
    }

    /// Spawn interval (seconds) for the current tier
    pub fn spawn_period(&self, settings: &Settings) -> f32 {
        settings.obstacle_interval_secs() / settings.timer_factor(self.tier.index())
    }
}
