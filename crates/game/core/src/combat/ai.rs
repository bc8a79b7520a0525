//! Enemy turn AI.
//!
//! Decisions are computed from a shared borrow of the world and executed by
//! the scheduler, so one enemy's move never aliases another's.

use crate::rng::DiceRoller;
use crate::state::{Enemy, Player, Position, SpecialBehavior, TileGrid};

/// What an enemy chose to do with its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyTurnOutcome {
    /// Out of range of the player, or boxed in.
    Idle,
    Attack,
    /// Heal the ally at this index for this amount.
    Heal { ally: usize, amount: i32 },
    Move(Position),
}

const HEAL_SEEK_RANGE: f64 = 5.0;
const HEAL_CAST_RANGE: f64 = 4.0;
const HEAL_AMOUNT: i32 = 10;

/// Decide the turn for `enemies[idx]`.
///
/// Enemies only act while the player is within `awareness` tiles. Healers
/// prefer topping up a wounded ally; everyone else attacks in reach or closes
/// in, stepping around obstacles axis by axis.
pub fn decide_enemy_turn(
    idx: usize,
    enemies: &[Enemy],
    player: &Player,
    grid: &TileGrid,
    awareness: i32,
    dice: &mut dyn DiceRoller,
) -> EnemyTurnOutcome {
    let enemy = &enemies[idx];
    if !enemy.is_alive() {
        return EnemyTurnOutcome::Idle;
    }

    let dx = player.pos.x - enemy.pos.x;
    let dy = player.pos.y - enemy.pos.y;
    let distance = enemy.pos.euclidean(player.pos);
    if distance >= awareness as f64 {
        return EnemyTurnOutcome::Idle;
    }

    if enemy.special == SpecialBehavior::Heal && distance < HEAL_SEEK_RANGE {
        let wounded = enemies.iter().enumerate().find(|(i, ally)| {
            *i != idx
                && ally.is_alive()
                && ally.hp < ally.max_hp
                && ally.pos.euclidean(enemy.pos) < HEAL_CAST_RANGE
        });
        if let Some((ally, _)) = wounded {
            return EnemyTurnOutcome::Heal {
                ally,
                amount: HEAL_AMOUNT,
            };
        }
    }

    let in_reach = match enemy.special {
        SpecialBehavior::Ranged | SpecialBehavior::RangedAoe => {
            distance <= enemy.attack_range as f64
        }
        _ => distance < 2.0,
    };
    if in_reach {
        return EnemyTurnOutcome::Attack;
    }

    let mut step_x = dx.signum();
    let mut step_y = dy.signum();
    if enemy.special == SpecialBehavior::Erratic && dice.chance_percent(50) {
        step_x = dice.range_i32(3) - 1;
        step_y = dice.range_i32(3) - 1;
    }

    let open = |pos: Position| {
        grid.is_walkable(pos)
            && pos != player.pos
            && !enemies.iter().any(|other| other.pos == pos)
    };

    let diagonal = enemy.pos.offset(step_x, step_y);
    if open(diagonal) && diagonal != enemy.pos {
        return EnemyTurnOutcome::Move(diagonal);
    }
    if step_x != 0 {
        let along_x = enemy.pos.offset(step_x, 0);
        if open(along_x) {
            return EnemyTurnOutcome::Move(along_x);
        }
    }
    if step_y != 0 {
        let along_y = enemy.pos.offset(0, step_y);
        if open(along_y) {
            return EnemyTurnOutcome::Move(along_y);
        }
    }
    EnemyTurnOutcome::Idle
}
