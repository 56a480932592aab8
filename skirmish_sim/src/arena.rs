//! Arena - Tanks, walls and a scripted volley list
//!
//! Stands in for the physics layer: it owns the geometry, predicts where
//! each shell will be after the next step and reports overlaps as contacts.

use crate::error::SimError;
use ballistics_core::config::{load_toml, parse_toml};
use ballistics_core::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TankSpec {
    pub id: u64,
    pub name: String,
    pub position: Vec2,
    pub facing: Vec2,
    #[serde(default = "default_radius")]
    pub radius: f32,
    #[serde(default = "default_health")]
    pub health: f32,
    /// Omitted for soft targets such as supply trucks
    #[serde(default)]
    pub armor: Option<ArmorProfile>,
}

fn default_radius() -> f32 {
    1.0
}

fn default_health() -> f32 {
    100.0
}

/// Axis-aligned wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallSpec {
    pub id: u64,
    pub min: Vec2,
    pub max: Vec2,
}

impl WallSpec {
    fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Outward normal of the face nearest to `p`, and the point on that face
    fn nearest_face(&self, p: Vec2) -> (Vec2, Vec2) {
        let faces = [
            (p.x - self.min.x, -Vec2::X, Vec2::new(self.min.x, p.y)),
            (self.max.x - p.x, Vec2::X, Vec2::new(self.max.x, p.y)),
            (p.y - self.min.y, -Vec2::Y, Vec2::new(p.x, self.min.y)),
            (self.max.y - p.y, Vec2::Y, Vec2::new(p.x, self.max.y)),
        ];
        let mut best = faces[0];
        for face in &faces[1..] {
            if face.0 < best.0 {
                best = *face;
            }
        }
        (best.1, best.2)
    }
}

/// A scheduled shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VolleySpec {
    /// Seconds into the match
    pub at: f32,
    pub shooter: u64,
    pub shell: String,
    /// Aim at another tank's current position
    #[serde(default)]
    pub aim_at: Option<u64>,
    /// Fixed firing direction, used when `aim_at` is absent
    #[serde(default)]
    pub direction: Option<Vec2>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaConfig {
    #[serde(default)]
    pub constants: BallisticsConstants,
    /// Random muzzle deviation, +/- degrees
    #[serde(default)]
    pub spread_degrees: f32,
    pub tanks: Vec<TankSpec>,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub volleys: Vec<VolleySpec>,
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self, SimError> {
        let config: ArenaConfig = load_toml(path)?;
        config.constants.validate()?;
        Ok(config)
    }

    /// Two tanks trading fire across a wall, plus a soft supply truck
    pub fn duel() -> Result<Self, SimError> {
        let config: ArenaConfig = parse_toml(include_str!("../arenas/duel.toml"))?;
        config.constants.validate()?;
        Ok(config)
    }
}

struct TankBody {
    id: EntityId,
    position: Vec2,
    radius: f32,
}

pub struct Arena {
    pub roster: Roster,
    bodies: Vec<TankBody>,
    walls: Vec<WallSpec>,
    names: Vec<(EntityId, String)>,
}

impl Arena {
    pub fn build(config: &ArenaConfig) -> Self {
        let mut roster = Roster::new();
        let mut bodies = Vec::new();
        let mut names = Vec::new();

        for tank in &config.tanks {
            let id = EntityId(tank.id);
            let mut hull = Hull::new(id, tank.health, tank.facing);
            if let Some(armor) = tank.armor {
                hull = hull.with_armor(armor);
            }
            roster.add_hull(hull);
            bodies.push(TankBody {
                id,
                position: tank.position,
                radius: tank.radius,
            });
            names.push((id, tank.name.clone()));
        }

        for wall in &config.walls {
            roster.add_obstacle(EntityId(wall.id));
        }

        Arena {
            roster,
            bodies,
            walls: config.walls.clone(),
            names,
        }
    }

    pub fn name(&self, id: EntityId) -> &str {
        self.names
            .iter()
            .find(|(other, _)| *other == id)
            .map(|(_, name)| name.as_str())
            .unwrap_or("?")
    }

    fn body(&self, id: EntityId) -> Option<&TankBody> {
        self.bodies.iter().find(|b| b.id == id)
    }

    /// Muzzle position and aim direction for a volley
    pub fn aim(&self, volley: &VolleySpec) -> Result<(EntityId, Vec2, Vec2), SimError> {
        let shooter = EntityId(volley.shooter);
        let body = self.body(shooter).ok_or(SimError::UnknownTank {
            at: volley.at,
            id: volley.shooter,
        })?;

        let direction = match (volley.aim_at, volley.direction) {
            (Some(target), _) => {
                let target_body = self.body(EntityId(target)).ok_or(SimError::UnknownTank {
                    at: volley.at,
                    id: target,
                })?;
                target_body.position - body.position
            }
            (None, Some(direction)) => direction,
            (None, None) => return Err(SimError::NoAim { at: volley.at }),
        };

        let muzzle = body.position + direction.normalize_or_zero() * (body.radius + 0.1);
        Ok((shooter, muzzle, direction))
    }

    /// Contacts for where each live shell will be after `dt`
    pub fn contacts(&self, system: &ProjectileSystem, dt: f32) -> Vec<Contact> {
        let mut contacts = Vec::new();

        for projectile in system.live() {
            let next = projectile.predicted_position(dt);

            for body in &self.bodies {
                let offset = next - body.position;
                if offset.length() <= body.radius {
                    let normal = offset.normalize_or_zero();
                    let normal = if normal == Vec2::ZERO { -projectile.direction } else { normal };
                    let point = body.position + normal * body.radius;
                    contacts.push(Contact::new(projectile.handle, body.id, point, normal));
                }
            }

            for wall in &self.walls {
                if wall.contains(next) {
                    let (normal, point) = wall.nearest_face(next);
                    contacts.push(Contact::new(projectile.handle, EntityId(wall.id), point, normal));
                }
            }
        }

        contacts
    }
}
