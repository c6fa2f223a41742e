use super::{ControlContext, ControllerOutput};
use crate::entity::{AttackIntent, Attacker, Damageable, Entity, Movable, PlayerInput};

/// Applies external input to the hero.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PlayerController {
    input: PlayerInput,
}

impl PlayerController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next update. Replaces the previous frame's input.
    pub fn set_input(&mut self, input: PlayerInput) {
        self.input = input;
    }

    pub fn input(&self) -> &PlayerInput {
        &self.input
    }

    pub fn update(&mut self, entity: &mut Entity, ctx: &ControlContext<'_>) -> ControllerOutput {
        entity.tick_timers(ctx.dt, ctx.config);
        if !entity.is_alive() {
            return ControllerOutput::default();
        }

        let mut out = ControllerOutput::default();
        let direction = self.input.move_vector.clamp_length(1.0);
        if !direction.is_zero() {
            let delta = direction * (entity.move_speed() * ctx.dt);
            out.blocked_by = entity.move_by(&ctx.geometry, delta, ctx.doors).blocked_by;
        }
        if !self.input.aim.is_zero() {
            entity.facing = self.input.aim.normalized();
        }

        if entity.can_act() {
            out.attack = self.select_attack(entity);
        }
        out
    }

    fn select_attack(&self, entity: &Entity) -> Option<AttackIntent> {
        let input = &self.input;
        let ability = if input.ultimate {
            entity.hero.as_ref().and_then(|h| h.ultimate_ability)
        } else if let Some(slot) = input.ability_slot {
            entity.ability_slots().get(slot as usize).copied()
        } else if input.attack {
            entity.ability_slots().first().copied()
        } else {
            None
        }?;

        Some(AttackIntent {
            caster: entity.id,
            ability,
            target: None,
            aim: entity.facing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::HeroDefinition;
    use crate::env::Catalog;
    use crate::geometry::{Rect, RoomGeometry, Vec2};
    use crate::ids::{AbilityId, HeroId};
    use crate::stats::{StatusKind, StatusSpec};

    fn hero() -> Entity {
        let def = HeroDefinition {
            id: HeroId(1),
            name: "knight".into(),
            max_health: 100,
            max_energy: 10,
            attack: 0,
            defense: 0,
            speed: 4.0,
            radius: 0.5,
            abilities: vec![AbilityId(1), AbilityId(2)],
            ultimate: Some(AbilityId(3)),
        };
        let mut entity = Entity::player(&def, &GameConfig::default());
        entity.position = Vec2::new(5.0, 5.0);
        entity
    }

    fn context<'a>(catalog: &'a Catalog, config: &'a GameConfig) -> ControlContext<'a> {
        ControlContext {
            geometry: RoomGeometry {
                bounds: Rect::new(0.0, 0.0, 20.0, 10.0),
                walls: &[],
            },
            doors: &[],
            content: catalog,
            config,
            player: None,
            frame: 0,
            dt: 0.5,
        }
    }

    #[test]
    fn moves_by_speed_and_picks_slot() {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let ctx = context(&catalog, &config);
        let mut entity = hero();
        let mut controller = PlayerController::new();

        controller.set_input(PlayerInput {
            move_vector: Vec2::new(2.0, 0.0),
            ability_slot: Some(1),
            ..PlayerInput::default()
        });
        let out = controller.update(&mut entity, &ctx);

        assert_eq!(entity.position, Vec2::new(7.0, 5.0));
        assert_eq!(out.attack.map(|a| a.ability), Some(AbilityId(2)));
    }

    #[test]
    fn ultimate_overrides_basic_attack() {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let ctx = context(&catalog, &config);
        let mut entity = hero();
        let mut controller = PlayerController::new();

        controller.set_input(PlayerInput {
            attack: true,
            ultimate: true,
            ..PlayerInput::default()
        });
        let out = controller.update(&mut entity, &ctx);
        assert_eq!(out.attack.map(|a| a.ability), Some(AbilityId(3)));
    }

    #[test]
    fn stunned_hero_stays_put_and_cannot_attack() {
        let catalog = Catalog::new();
        let config = GameConfig::default();
        let ctx = context(&catalog, &config);
        let mut entity = hero();
        entity.apply_status(StatusSpec::new(StatusKind::Stunned, 0, 2.0));
        let mut controller = PlayerController::new();

        controller.set_input(PlayerInput::moving(Vec2::RIGHT).attacking());
        let out = controller.update(&mut entity, &ctx);

        assert_eq!(entity.position, Vec2::new(5.0, 5.0));
        assert_eq!(out.attack, None);
    }
}
