//! Skill effect implementations.
//!
//! Skill damage is true damage: it subtracts HP directly and ignores defense
//! and evasion. Casts never remove enemies themselves; the engine sweeps the
//! fallen afterwards so kill rewards flow through one pipeline.

use tracing::debug;

use crate::rng::DiceRoller;
use crate::skill::{SkillId, SkillOutcome, SkillTarget};
use crate::state::{
    ActiveEffect, EffectKind, Enemy, EventLog, GroundEffect, GroundEffectKind, LogKind, Player,
    Position, TileGrid,
};

/// The slice of world a cast may touch.
pub struct SkillContext<'a> {
    pub enemies: &'a mut Vec<Enemy>,
    pub grid: &'a TileGrid,
    pub log: &'a mut EventLog,
    pub ground_effects: &'a mut Vec<GroundEffect>,
    pub dice: &'a mut dyn DiceRoller,
}

const SHIELD_BASH_STUN: i32 = 30;
const FREEZE_STUN: i32 = 80;

/// Resolve a cast. MP accounting stays with the caller: a `Fizzled` outcome
/// means the cast must cost nothing.
pub fn cast_skill(
    id: SkillId,
    player: &mut Player,
    target: SkillTarget,
    ctx: &mut SkillContext<'_>,
) -> SkillOutcome {
    debug!(skill = %id, "casting");
    match id {
        SkillId::Fireball => area_blast(player, target, ctx, 10 + player.level * 2, 2, 5, None),
        SkillId::Heal => {
            let amount = player.max_hp * 30 / 100;
            let actual = amount.min(player.max_hp - player.hp);
            player.heal(amount);
            ctx.log.push(
                LogKind::Skill,
                format!("Holy light mends you for {actual} HP."),
            );
            SkillOutcome::Cast
        }
        SkillId::Whirlwind => {
            let damage = 8 + player.level;
            let hit: Vec<usize> = enemies_within(ctx.enemies, player.pos, 1);
            if hit.is_empty() {
                return fizzle(ctx.log, "There is nothing within reach of the whirlwind.");
            }
            ctx.log.push(LogKind::Skill, "You whirl your weapon in a circle!");
            for idx in hit {
                ctx.enemies[idx].hp -= damage;
                let name = ctx.enemies[idx].name.clone();
                ctx.log.push(
                    LogKind::Player,
                    format!("The whirlwind hits {name} for {damage} damage!"),
                );
            }
            SkillOutcome::Cast
        }
        SkillId::ShieldBash => {
            let Some(idx) = single_target(player.pos, ctx.enemies, target, 1.5, Some(1)) else {
                return fizzle(ctx.log, "No one is close enough to bash.");
            };
            let damage = 5 + player.level;
            ctx.enemies[idx].hp -= damage;
            let name = ctx.enemies[idx].name.clone();
            ctx.log.push(
                LogKind::Player,
                format!("Your shield slams {name} for {damage} damage!"),
            );
            if ctx.dice.chance_percent(70) {
                ctx.enemies[idx].stunned = SHIELD_BASH_STUN;
                ctx.log.push(LogKind::Skill, format!("{name} is stunned!"));
            }
            SkillOutcome::Cast
        }
        SkillId::BattleShout => {
            let _ = player.effects.try_push(ActiveEffect {
                kind: EffectKind::BattleShout,
                duration: 5,
                attack: 5,
                defense: 3,
                move_speed: 0,
                attack_speed: 0,
            });
            ctx.log.push(
                LogKind::Skill,
                "You roar a battle cry; attack and defense rise!",
            );
            SkillOutcome::Cast
        }
        SkillId::Dash => {
            ctx.log.push(LogKind::System, "Choose a direction to dash.");
            SkillOutcome::AwaitDirection
        }
        SkillId::Radiance => {
            let amount = player.max_torch * 50 / 100;
            let actual = amount.min(player.max_torch - player.torch);
            player.restore_torch(amount);
            ctx.log.push(
                LogKind::Skill,
                format!("A burst of light restores {actual} torch."),
            );
            SkillOutcome::Cast
        }
        SkillId::ToxicMist => area_blast(
            player,
            target,
            ctx,
            5 + player.level,
            3,
            5,
            Some((GroundEffectKind::ToxicMist, 5, 3)),
        ),
        SkillId::Freeze => {
            let Some(idx) = single_target(player.pos, ctx.enemies, target, 5.0, Some(5)) else {
                return fizzle(ctx.log, "Nothing in range to freeze.");
            };
            ctx.enemies[idx].stunned = FREEZE_STUN;
            let name = ctx.enemies[idx].name.clone();
            ctx.log.push(LogKind::Skill, format!("{name} is encased in ice!"));
            SkillOutcome::Cast
        }
        SkillId::Entangle => {
            let Some(idx) = single_target(player.pos, ctx.enemies, target, 5.0, Some(5)) else {
                return fizzle(ctx.log, "Nothing in range to entangle.");
            };
            let enemy = &mut ctx.enemies[idx];
            let reduction = enemy.move_speed / 2;
            let _ = enemy.effects.try_push(ActiveEffect {
                kind: EffectKind::Entangled,
                duration: 10,
                attack: 0,
                defense: 0,
                move_speed: -reduction,
                attack_speed: 0,
            });
            let name = enemy.name.clone();
            ctx.log.push(
                LogKind::Skill,
                format!("Vines burst from the ground and snare {name}!"),
            );
            SkillOutcome::Cast
        }
        SkillId::Lightning => {
            let Some(idx) = single_target(player.pos, ctx.enemies, target, 7.0, Some(7)) else {
                return fizzle(ctx.log, "Nothing in range for the lightning.");
            };
            let damage = 20 + player.level * 3;
            ctx.enemies[idx].hp -= damage;
            let name = ctx.enemies[idx].name.clone();
            ctx.log.push(
                LogKind::Skill,
                format!("Lightning strikes {name} for {damage} true damage!"),
            );
            SkillOutcome::Cast
        }
        SkillId::MagicMissile => {
            let Some(idx) = single_target(player.pos, ctx.enemies, target, 6.0, None) else {
                return fizzle(ctx.log, "The missile finds no target.");
            };
            let damage = 5 + player.level;
            ctx.enemies[idx].hp -= damage;
            let name = ctx.enemies[idx].name.clone();
            ctx.log.push(
                LogKind::Player,
                format!("The magic missile hits {name} for {damage} damage!"),
            );
            SkillOutcome::Cast
        }
        SkillId::FlameZone => area_blast(
            player,
            target,
            ctx,
            12 + player.level * 2,
            2,
            5,
            Some((GroundEffectKind::FlameZone, 3, 5)),
        ),
    }
}

fn fizzle(log: &mut EventLog, reason: &str) -> SkillOutcome {
    log.push(LogKind::System, reason);
    SkillOutcome::Fizzled {
        reason: reason.to_owned(),
    }
}

/// Indices of enemies within a chebyshev radius of `center`.
fn enemies_within(enemies: &[Enemy], center: Position, radius: i32) -> Vec<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.pos.chebyshev(center) <= radius)
        .map(|(i, _)| i)
        .collect()
}

/// Closest enemy by euclidean distance, within `max_range`.
fn nearest_enemy(pos: Position, enemies: &[Enemy], max_range: f64) -> Option<usize> {
    enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| pos.euclidean(e.pos) <= max_range)
        .min_by(|(_, a), (_, b)| {
            pos.euclidean(a.pos)
                .partial_cmp(&pos.euclidean(b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
}

/// Resolve a single-target aim: an explicit tile must hold an enemy, auto aim
/// takes the nearest. `reach` re-checks the final chebyshev distance.
fn single_target(
    caster: Position,
    enemies: &[Enemy],
    target: SkillTarget,
    auto_range: f64,
    reach: Option<i32>,
) -> Option<usize> {
    let idx = match target {
        SkillTarget::At(pos) => enemies.iter().position(|e| e.pos == pos)?,
        SkillTarget::Auto => nearest_enemy(caster, enemies, auto_range)?,
    };
    if let Some(limit) = reach {
        if caster.chebyshev(enemies[idx].pos) > limit {
            return None;
        }
    }
    Some(idx)
}

/// Shared body for fireball, toxic mist, and flame zone: an instant burst
/// around a center tile, optionally leaving a lingering ground effect.
fn area_blast(
    player: &Player,
    target: SkillTarget,
    ctx: &mut SkillContext<'_>,
    damage: i32,
    radius: i32,
    auto_range: i32,
    lingering: Option<(GroundEffectKind, i32, i32)>,
) -> SkillOutcome {
    let center = match target {
        SkillTarget::At(pos) => pos,
        SkillTarget::Auto => {
            let Some(idx) = nearest_enemy(player.pos, ctx.enemies, auto_range as f64) else {
                return fizzle(ctx.log, "No valid target area.");
            };
            ctx.enemies[idx].pos
        }
    };

    let hit = enemies_within(ctx.enemies, center, radius);
    if lingering.is_none() && hit.is_empty() {
        return fizzle(ctx.log, "The blast hits nothing.");
    }

    ctx.log.push(
        LogKind::Skill,
        format!("The blast erupts at ({}, {})!", center.x, center.y),
    );
    for idx in hit {
        ctx.enemies[idx].hp -= damage;
        let name = ctx.enemies[idx].name.clone();
        ctx.log.push(
            LogKind::Skill,
            format!("{name} is caught in the blast for {damage} damage!"),
        );
    }

    if let Some((kind, duration, tick_damage)) = lingering {
        let mut tiles = Vec::new();
        for x in center.x - radius..=center.x + radius {
            for y in center.y - radius..=center.y + radius {
                let pos = Position::new(x, y);
                if ctx.grid.is_walkable(pos) && center.chebyshev(pos) <= radius {
                    tiles.push(pos);
                }
            }
        }
        ctx.ground_effects.push(GroundEffect {
            kind,
            tiles,
            duration,
            tick_damage,
        });
    }
    SkillOutcome::Cast
}
