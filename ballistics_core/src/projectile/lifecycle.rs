//! ProjectileSystem - Spawns, advances and retires projectiles
//!
//! The owning game loop calls [`ProjectileSystem::tick`] once per step with
//! the contacts its physics layer found. Each live projectile:
//! 1. Leaves `Spawned` for `InFlight` on its first tick
//! 2. Advances by `direction * speed * dt`
//! 3. Expires if its age has reached its lifetime
//! 4. Resolves at most one authoritative contact (owner and unknown
//!    entities are skipped, not counted)
//!
//! Terminal projectiles are removed before `tick` returns.

use super::{FireParams, Projectile, ProjectileState, ShellConfig};
use crate::armor::angle_between;
use crate::config::BallisticsConstants;
use crate::error::BallisticsError;
use crate::events::{BallisticsEvent, ExpiredEvent, ExpiryReason, HitEvent, RicochetEvent, Surface};
use crate::penetration::{PenetrationOutcome, PenetrationResolver};
use crate::ricochet::{orient_normal, RicochetOutcome, RicochetSimulator};
use crate::target::{Collider, EntityResolver};
use crate::types::{Contact, EntityId, ProjectileHandle};
use glam::Vec2;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

/// The resolvers and thresholds used while colliding
#[derive(Debug, Clone, Copy)]
struct CollisionRules {
    penetration: PenetrationResolver,
    ricochet: RicochetSimulator,
    wall_ricochet_threshold: f32,
}

/// Result of looking at one contact
enum ContactStep {
    /// Not authoritative; try the next contact
    Skipped,
    Resolved(BallisticsEvent),
}

/// Owns every live projectile
#[derive(Debug, Clone)]
pub struct ProjectileSystem {
    constants: BallisticsConstants,
    rules: CollisionRules,
    /// Live set, in fire order
    projectiles: Vec<Projectile>,
    next_handle: u64,
    /// Simulation clock in seconds
    clock: f64,
}

impl Default for ProjectileSystem {
    fn default() -> Self {
        Self::new(BallisticsConstants::default())
    }
}

impl ProjectileSystem {
    pub fn new(constants: BallisticsConstants) -> Self {
        let rules = CollisionRules {
            penetration: PenetrationResolver::from_constants(&constants),
            ricochet: RicochetSimulator::from_constants(&constants),
            wall_ricochet_threshold: constants.ricochet.wall_ricochet_threshold,
        };
        ProjectileSystem {
            constants,
            rules,
            projectiles: Vec::new(),
            next_handle: 1,
            clock: 0.0,
        }
    }

    pub fn constants(&self) -> &BallisticsConstants {
        &self.constants
    }

    /// Seconds simulated so far
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    pub fn contains(&self, handle: ProjectileHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ProjectileHandle) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.handle == handle)
    }

    /// Live projectiles in fire order
    pub fn live(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// Spawn a projectile at `origin`
    ///
    /// Invalid parameters are rejected here; nothing invalid ever reaches `tick`.
    pub fn fire(&mut self, origin: Vec2, params: FireParams) -> Result<ProjectileHandle, BallisticsError> {
        let handle = ProjectileHandle(self.next_handle);
        let projectile = Projectile::spawn(handle, origin, &params, self.clock)?;
        self.next_handle += 1;

        debug!(
            projectile = %handle,
            owner = %params.owner,
            speed = params.speed,
            penetration = params.penetration_power,
            "projectile fired"
        );
        self.projectiles.push(projectile);
        Ok(handle)
    }

    /// Spawn a projectile using a shell preset
    pub fn fire_shell(
        &mut self,
        shell: &ShellConfig,
        origin: Vec2,
        direction: Vec2,
        owner: EntityId,
    ) -> Result<ProjectileHandle, BallisticsError> {
        self.fire(origin, shell.fire_params(direction, owner))
    }

    /// Advance the simulation by `dt` seconds
    ///
    /// `contacts` may reference any projectile; contacts for handles that are
    /// not live are ignored. Returns the events produced this step, in
    /// projectile fire order.
    pub fn tick(
        &mut self,
        dt: f32,
        contacts: &[Contact],
        world: &mut impl EntityResolver,
    ) -> Vec<BallisticsEvent> {
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            warn!(dt, "invalid tick delta, treating as zero");
            0.0
        };

        self.clock += f64::from(dt);
        let now = self.clock;
        let tolerance = self.constants.timing.lifetime_tolerance;

        let mut by_projectile: HashMap<ProjectileHandle, Vec<&Contact>> = HashMap::new();
        for contact in contacts {
            by_projectile.entry(contact.projectile).or_default().push(contact);
        }

        let rules = self.rules;
        let mut events = Vec::new();

        for projectile in self.projectiles.iter_mut() {
            if projectile.state == ProjectileState::Spawned {
                projectile.state = ProjectileState::InFlight;
            }

            projectile.position += projectile.velocity() * dt;
            trace!(projectile = %projectile.handle, position = ?projectile.position, "advanced");

            let candidates = by_projectile.remove(&projectile.handle).unwrap_or_default();

            if projectile.age(now) + tolerance >= f64::from(projectile.lifetime) {
                events.push(expire(projectile, ExpiryReason::Lifetime, now));
                continue;
            }

            for contact in candidates {
                match collide(&rules, projectile, contact, world, now) {
                    ContactStep::Skipped => {}
                    ContactStep::Resolved(event) => {
                        events.push(event);
                        break;
                    }
                }
            }
        }

        for handle in by_projectile.keys() {
            debug!(projectile = %handle, "contact for projectile that is not live, ignoring");
        }

        self.projectiles.retain(|p| {
            if p.is_live() {
                true
            } else {
                debug!(projectile = %p.handle, state = ?p.state, "projectile retired");
                false
            }
        });

        events
    }
}

/// Colliding: resolve one contact for a live projectile
fn collide(
    rules: &CollisionRules,
    projectile: &mut Projectile,
    contact: &Contact,
    world: &mut impl EntityResolver,
    now: f64,
) -> ContactStep {
    if contact.other == projectile.owner {
        trace!(projectile = %projectile.handle, "ignoring contact with owner");
        return ContactStep::Skipped;
    }

    let Some(collider) = world.resolve(contact.other) else {
        warn!(
            projectile = %projectile.handle,
            entity = %contact.other,
            "contact references unknown entity, ignoring"
        );
        return ContactStep::Skipped;
    };

    projectile.state = ProjectileState::Colliding;
    let normal = orient_normal(projectile.direction, contact.normal);

    let event = match collider {
        Collider::Obstacle => {
            hit_obstacle(rules, projectile, contact, normal, Surface::Obstacle(contact.other), now)
        }
        Collider::Target(target) if target.is_dead() => {
            // Wrecks stop shells like any other obstacle and take no damage
            debug!(projectile = %projectile.handle, target = %contact.other, "struck a wreck");
            hit_obstacle(rules, projectile, contact, normal, Surface::Target(contact.other), now)
        }
        Collider::Target(target) => {
            let outcome = rules
                .penetration
                .resolve(projectile, target, normal, &rules.ricochet);
            match outcome {
                PenetrationOutcome::Penetrated(report) => {
                    projectile.state = ProjectileState::Penetrated;
                    debug!(
                        projectile = %projectile.handle,
                        target = %contact.other,
                        damage = report.damage,
                        killing_blow = report.is_killing_blow,
                        "penetrated"
                    );
                    BallisticsEvent::Hit(HitEvent {
                        projectile: projectile.handle,
                        owner: projectile.owner,
                        target: contact.other,
                        point: contact.point,
                        zone: report.zone,
                        impact_angle: report.impact_angle,
                        effective_armor: report.effective_armor,
                        penetration_power: report.penetration_power,
                        damage: report.damage,
                        damage_dealt: report.damage_dealt(),
                        is_killing_blow: report.is_killing_blow,
                        time: now,
                    })
                }
                PenetrationOutcome::Deflected { ricochet, .. } => settle_ricochet(
                    projectile,
                    ricochet,
                    contact,
                    normal,
                    Surface::Target(contact.other),
                    now,
                ),
            }
        }
    };

    ContactStep::Resolved(event)
}

/// Wall rule: bounce when the shell meets the surface squarely enough, else embed
fn hit_obstacle(
    rules: &CollisionRules,
    projectile: &mut Projectile,
    contact: &Contact,
    normal: Vec2,
    surface: Surface,
    now: f64,
) -> BallisticsEvent {
    // 0° is head-on, 90° grazing
    let impact_angle = angle_between(-projectile.direction, normal);

    if impact_angle >= rules.wall_ricochet_threshold {
        debug!(projectile = %projectile.handle, impact_angle, "embedded in obstacle");
        return expire(projectile, ExpiryReason::Embedded, now);
    }

    let outcome = rules.ricochet.simulate(projectile, normal);
    settle_ricochet(projectile, outcome, contact, normal, surface, now)
}

fn settle_ricochet(
    projectile: &mut Projectile,
    outcome: RicochetOutcome,
    contact: &Contact,
    normal: Vec2,
    surface: Surface,
    now: f64,
) -> BallisticsEvent {
    match outcome {
        RicochetOutcome::Continue(direction) => {
            projectile.state = ProjectileState::InFlight;
            debug!(
                projectile = %projectile.handle,
                bounce = projectile.bounce_count,
                penetration = projectile.penetration_power,
                "ricochet"
            );
            BallisticsEvent::Ricochet(RicochetEvent {
                projectile: projectile.handle,
                owner: projectile.owner,
                surface,
                point: contact.point,
                normal,
                direction,
                bounce_count: projectile.bounce_count,
                penetration_power: projectile.penetration_power,
                damage: projectile.damage,
                time: now,
            })
        }
        RicochetOutcome::Expired(reason) => expire(projectile, reason, now),
    }
}

fn expire(projectile: &mut Projectile, reason: ExpiryReason, now: f64) -> BallisticsEvent {
    projectile.state = ProjectileState::Expired(reason);
    debug!(projectile = %projectile.handle, reason = reason.describe(), "projectile expired");
    BallisticsEvent::Expired(ExpiredEvent {
        projectile: projectile.handle,
        owner: projectile.owner,
        position: projectile.position,
        reason,
        bounce_count: projectile.bounce_count,
        time: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::armor::ArmorProfile;
    use crate::target::{Hull, Roster, Target};

    const WALL: EntityId = EntityId(100);
    const SHOOTER: EntityId = EntityId(1);
    const TANK: EntityId = EntityId(2);

    fn params(direction: Vec2) -> FireParams {
        FireParams {
            direction,
            speed: 10.0,
            damage: 40.0,
            penetration_power: 60.0,
            owner: SHOOTER,
            max_bounces: 2,
            lifetime: 5.0,
        }
    }

    fn roster() -> Roster {
        let mut roster = Roster::new();
        let armor = ArmorProfile::new(50.0, 30.0, 20.0, 45.0, 135.0).unwrap();
        roster.add_hull(Hull::new(SHOOTER, 100.0, Vec2::X).with_armor(armor));
        roster.add_hull(Hull::new(TANK, 100.0, -Vec2::X).with_armor(armor));
        roster.add_obstacle(WALL);
        roster
    }

    #[test]
    fn test_spawned_becomes_in_flight_and_moves() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        assert_eq!(system.get(handle).unwrap().state, ProjectileState::Spawned);

        let events = system.tick(0.5, &[], &mut world);

        assert!(events.is_empty());
        let p = system.get(handle).unwrap();
        assert_eq!(p.state, ProjectileState::InFlight);
        assert!((p.position - Vec2::new(5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_handles_are_unique() {
        let mut system = ProjectileSystem::default();
        let a = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        let b = system.fire(Vec2::ZERO, params(Vec2::Y)).unwrap();
        assert_ne!(a, b);
        assert_eq!(system.len(), 2);
    }

    #[test]
    fn test_invalid_fire_spawns_nothing() {
        let mut system = ProjectileSystem::default();
        let mut bad = params(Vec2::X);
        bad.speed = -1.0;
        assert!(system.fire(Vec2::ZERO, bad).is_err());
        assert!(system.is_empty());
    }

    #[test]
    fn test_penetration_retires_projectile() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        // TANK faces -X; a shell travelling +X hits its front plate
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        let contact = Contact::new(handle, TANK, Vec2::new(1.0, 0.0), -Vec2::X);

        let events = system.tick(0.1, &[contact], &mut world);

        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], BallisticsEvent::Hit(hit) if hit.target == TANK));
        assert!(!system.contains(handle));
        assert!((world.hull(TANK).unwrap().current_health() - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_owner_contact_ignored() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        let contact = Contact::new(handle, SHOOTER, Vec2::ZERO, -Vec2::X);

        let events = system.tick(0.1, &[contact], &mut world);

        assert!(events.is_empty());
        assert_eq!(system.get(handle).unwrap().state, ProjectileState::InFlight);
        assert!((world.hull(SHOOTER).unwrap().current_health() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_owner_contact_does_not_shadow_next_contact() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        let contacts = [
            Contact::new(handle, SHOOTER, Vec2::ZERO, -Vec2::X),
            Contact::new(handle, TANK, Vec2::new(1.0, 0.0), -Vec2::X),
        ];

        let events = system.tick(0.1, &contacts, &mut world);

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], BallisticsEvent::Hit(_)));
    }

    #[test]
    fn test_one_collision_per_tick() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(Vec2::new(1.0, -1.0))).unwrap();
        let contacts = [
            Contact::new(handle, WALL, Vec2::ZERO, Vec2::Y),
            Contact::new(handle, WALL, Vec2::ZERO, -Vec2::X),
        ];

        let events = system.tick(0.1, &contacts, &mut world);

        assert_eq!(events.len(), 1);
        assert_eq!(system.get(handle).unwrap().bounce_count, 1);
    }

    #[test]
    fn test_unknown_entity_skipped() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        let contact = Contact::new(handle, EntityId(404), Vec2::ZERO, -Vec2::X);

        let events = system.tick(0.1, &[contact], &mut world);

        assert!(events.is_empty());
        assert_eq!(system.get(handle).unwrap().state, ProjectileState::InFlight);
    }

    #[test]
    fn test_wall_ricochet_then_embed() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();

        // 45° onto the floor: bounces
        let bouncer = system.fire(Vec2::ZERO, params(Vec2::new(1.0, -1.0))).unwrap();
        // Nearly parallel to the floor: embeds
        let grazer = system.fire(Vec2::ZERO, params(Vec2::new(1.0, -0.05))).unwrap();
        let contacts = [
            Contact::new(bouncer, WALL, Vec2::ZERO, Vec2::Y),
            Contact::new(grazer, WALL, Vec2::ZERO, Vec2::Y),
        ];

        let events = system.tick(0.1, &contacts, &mut world);

        assert_eq!(events.len(), 2);
        match &events[0] {
            BallisticsEvent::Ricochet(r) => {
                assert_eq!(r.surface, Surface::Obstacle(WALL));
                assert!(r.direction.y > 0.0);
                assert_eq!(r.bounce_count, 1);
            }
            other => panic!("expected ricochet, got {other:?}"),
        }
        assert!(matches!(
            &events[1],
            BallisticsEvent::Expired(e) if e.reason == ExpiryReason::Embedded
        ));
        assert!(system.contains(bouncer));
        assert!(!system.contains(grazer));
    }

    #[test]
    fn test_inward_normal_is_flipped() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(-Vec2::Y)).unwrap();
        // Normal reported pointing into the floor
        let contact = Contact::new(handle, WALL, Vec2::ZERO, -Vec2::Y);

        let events = system.tick(0.1, &[contact], &mut world);

        assert!(matches!(&events[0], BallisticsEvent::Ricochet(r) if r.normal == Vec2::Y));
        let p = system.get(handle).unwrap();
        assert!((p.direction - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn test_dead_target_is_not_damaged() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        world.hull_mut(TANK).unwrap().set_health(0.0);
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();
        let contact = Contact::new(handle, TANK, Vec2::new(1.0, 0.0), -Vec2::X);

        let events = system.tick(0.1, &[contact], &mut world);

        assert!(!events.iter().any(|e| matches!(e, BallisticsEvent::Hit(_))));
        assert_eq!(world.hull(TANK).unwrap().current_health(), 0.0);
        assert!(matches!(
            &events[0],
            BallisticsEvent::Ricochet(r) if r.surface == Surface::Target(TANK)
        ));
    }

    #[test]
    fn test_stale_contact_ignored() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let contact = Contact::new(ProjectileHandle(77), TANK, Vec2::ZERO, Vec2::X);

        let events = system.tick(0.1, &[contact], &mut world);

        assert!(events.is_empty());
        assert!((world.hull(TANK).unwrap().current_health() - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_invalid_dt_treated_as_zero() {
        let mut system = ProjectileSystem::default();
        let mut world = roster();
        let handle = system.fire(Vec2::ZERO, params(Vec2::X)).unwrap();

        system.tick(f32::NAN, &[], &mut world);
        system.tick(-1.0, &[], &mut world);

        assert_eq!(system.clock(), 0.0);
        assert_eq!(system.get(handle).unwrap().position, Vec2::ZERO);
    }

    #[test]
    fn test_fire_shell_uses_preset() {
        let mut system = ProjectileSystem::default();
        let shells = crate::projectile::ShellRegistry::with_defaults();
        let he = shells.get("he").unwrap();
        let handle = system.fire_shell(he, Vec2::ZERO, Vec2::Y, SHOOTER).unwrap();
        let p = system.get(handle).unwrap();
        assert_eq!(p.max_bounces, 0);
        assert!((p.damage - 70.0).abs() < f32::EPSILON);
    }
}
