//! Fixed-step skirmish loop

use crate::arena::{Arena, ArenaConfig, VolleySpec};
use crate::error::SimError;
use ballistics_core::prelude::*;
use glam::Vec2;
use rand::Rng;
use tracing::{debug, info};

/// Result of a skirmish run
pub struct SkirmishReport {
    pub events: Vec<BallisticsEvent>,
    pub ticks: u32,
    pub shots_fired: u32,
    pub survivors: Vec<(EntityId, String)>,
}

impl SkirmishReport {
    pub fn hits(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BallisticsEvent::Hit(_)))
            .count()
    }

    pub fn ricochets(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BallisticsEvent::Ricochet(_)))
            .count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} ticks, {} shots, {} hits, {} ricochets, {} survivors",
            self.ticks,
            self.shots_fired,
            self.hits(),
            self.ricochets(),
            self.survivors.len()
        )
    }
}

pub struct Skirmish {
    pub arena: Arena,
    pub system: ProjectileSystem,
    volleys: Vec<VolleySpec>,
    spread_degrees: f32,
}

impl Skirmish {
    pub fn new(config: &ArenaConfig) -> Self {
        let mut volleys = config.volleys.clone();
        volleys.sort_by(|a, b| a.at.total_cmp(&b.at));

        Skirmish {
            arena: Arena::build(config),
            system: ProjectileSystem::new(config.constants.clone()),
            volleys,
            spread_degrees: config.spread_degrees,
        }
    }

    /// Run for `duration` seconds at `tick_rate` Hz
    ///
    /// Stops early once every volley is fired and no shell is left in flight.
    pub fn run(
        mut self,
        shells: &ShellRegistry,
        tick_rate: u32,
        duration: f32,
        rng: &mut impl Rng,
    ) -> Result<SkirmishReport, SimError> {
        if tick_rate == 0 {
            return Err(SimError::ZeroTickRate);
        }
        let dt = 1.0 / tick_rate as f32;
        let max_ticks = (duration * tick_rate as f32).ceil() as u32;

        let mut report = SkirmishReport {
            events: Vec::new(),
            ticks: 0,
            shots_fired: 0,
            survivors: Vec::new(),
        };
        let mut next_volley = 0;

        while report.ticks < max_ticks {
            let now = self.system.clock() as f32;

            while next_volley < self.volleys.len() && self.volleys[next_volley].at <= now {
                let volley = &self.volleys[next_volley];
                next_volley += 1;

                let shell = shells.require(&volley.shell)?;
                let (shooter, muzzle, aim) = self.arena.aim(volley)?;
                let direction = self.deviate(aim, rng);
                let handle = self.system.fire_shell(shell, muzzle, direction, shooter)?;
                report.shots_fired += 1;
                debug!(%handle, %shooter, shell = %shell.id, "fired");
            }

            let contacts = self.arena.contacts(&self.system, dt);
            let events = self.system.tick(dt, &contacts, &mut self.arena.roster);
            report.events.extend(events);
            report.ticks += 1;

            if next_volley >= self.volleys.len() && self.system.is_empty() {
                break;
            }
        }

        report.survivors = self
            .arena
            .roster
            .survivors()
            .into_iter()
            .map(|id| (id, self.arena.name(id).to_string()))
            .collect();
        info!(summary = %report.summary(), "skirmish finished");
        Ok(report)
    }

    fn deviate(&self, aim: Vec2, rng: &mut impl Rng) -> Vec2 {
        if self.spread_degrees <= 0.0 {
            return aim;
        }
        let offset = rng.gen_range(-self.spread_degrees..=self.spread_degrees);
        Vec2::from_angle(offset.to_radians()).rotate(aim)
    }
}
