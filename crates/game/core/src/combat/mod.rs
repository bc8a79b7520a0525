//! Combat resolution.
//!
//! A single attack pipeline serves both sides. Player-only mechanics (crits,
//! lifesteal, thorns) hang off the [`Combatant`] wrapper rather than separate
//! code paths.

mod ai;

pub use ai::{decide_enemy_turn, EnemyTurnOutcome};

use crate::rng::DiceRoller;
use crate::state::{Enemy, Player};

/// Either side of an exchange, borrowed mutably for the duration of one
/// attack resolution.
pub enum Combatant<'a> {
    Player(&'a mut Player),
    Enemy(&'a mut Enemy),
}

impl Combatant<'_> {
    fn effective_attack(&self) -> i32 {
        match self {
            Self::Player(p) => p.effective_attack().max(0),
            Self::Enemy(e) => e.effective_attack().max(0),
        }
    }

    fn effective_defense(&self) -> i32 {
        match self {
            Self::Player(p) => p.effective_defense().max(0),
            Self::Enemy(e) => e.effective_defense().max(0),
        }
    }

    fn evasion(&self) -> i32 {
        match self {
            Self::Player(p) => p.evasion,
            Self::Enemy(e) => e.evasion,
        }
    }

    fn hp(&self) -> i32 {
        match self {
            Self::Player(p) => p.hp,
            Self::Enemy(e) => e.hp,
        }
    }

    fn take_damage(&mut self, amount: i32) {
        match self {
            Self::Player(p) => p.hp -= amount,
            Self::Enemy(e) => e.hp -= amount,
        }
    }
}

/// Everything one attack did, for logging and relic hooks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CombatResult {
    pub hit: bool,
    pub damage: i32,
    pub is_crit: bool,
    pub evaded: bool,
    pub lifesteal_healed: i32,
    pub thorns_damage: i32,
    pub attacker_died: bool,
    pub defender_died: bool,
}

/// Resolve one attack. Damage is `max(0, attack - defense)`; the defender may
/// evade first. Crits and lifesteal apply only when the player attacks,
/// thorns only when the player defends. Death flags are independent: thorns
/// can kill the attacker in the same exchange that kills the defender.
pub fn perform_attack(
    mut attacker: Combatant<'_>,
    mut defender: Combatant<'_>,
    dice: &mut dyn DiceRoller,
) -> CombatResult {
    let mut result = CombatResult {
        hit: true,
        ..CombatResult::default()
    };

    if defender.evasion() > 0 && dice.chance_percent(defender.evasion()) {
        result.hit = false;
        result.evaded = true;
        return result;
    }

    let mut damage = (attacker.effective_attack() - defender.effective_defense()).max(0);

    if let Combatant::Player(player) = &attacker {
        if player.crit_chance > 0 && dice.chance_percent(player.crit_chance) {
            damage = damage * player.crit_damage / 100;
            result.is_crit = true;
        }
    }

    result.damage = damage;
    defender.take_damage(damage);

    if let Combatant::Player(player) = &mut attacker {
        if player.lifesteal > 0 {
            let heal = (damage * player.lifesteal + 49) / 50;
            let actual = heal.min(player.max_hp - player.hp);
            player.heal(heal);
            result.lifesteal_healed = actual;
        }
    }

    if let Combatant::Player(player) = &defender {
        if player.thorns > 0 {
            result.thorns_damage = player.thorns;
            attacker.take_damage(player.thorns);
            if attacker.hp() <= 0 {
                result.attacker_died = true;
            }
        }
    }

    if defender.hp() <= 0 {
        result.defender_died = true;
    }

    result
}

/// Tick down timed effects, dropping the expired ones. Returns the names of
/// effects that just wore off.
pub fn update_effects(effects: &mut crate::state::EffectList) -> Vec<String> {
    let mut expired = Vec::new();
    effects.retain(|effect| {
        effect.duration -= 1;
        if effect.duration <= 0 {
            expired.push(effect.kind.to_string());
            false
        } else {
            true
        }
    });
    expired
}

/// Consume one stun charge. True means the actor loses this turn.
pub fn consume_stun(stunned: &mut i32) -> bool {
    if *stunned > 0 {
        *stunned -= 1;
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::entity::new_player;
    use crate::rng::SequenceDice;
    use crate::state::{ActiveEffect, EffectKind, Position, SpecialBehavior};
    use crate::tables::{DifficultyMultipliers, MonsterDefinition, PlayerBaseStats};

    fn test_player() -> Player {
        let stats = PlayerBaseStats {
            max_hp: 200,
            max_mp: 30,
            max_torch: 500,
            attack: 20,
            defense: 0,
            speed: 10,
            crit_chance: 5,
            crit_damage: 200,
            evasion: 5,
            luck: 10,
            hp_regen: 0,
            mp_regen: 0,
            lifesteal: 0,
            thorns: 0,
            skill_slots: 2,
            arrows: 5,
            max_arrows: 20,
        };
        new_player(&stats, &[], &GameConfig::new())
    }

    fn test_enemy(hp: i32, attack: i32, defense: i32, evasion: i32) -> Enemy {
        MonsterDefinition {
            id: "dummy".into(),
            name: "Dummy".into(),
            glyph: 'd',
            min_floor: 1,
            max_floor: 99,
            hp: [hp, 0],
            attack: [attack, 0],
            defense: [defense, 0],
            exp: [5, 0],
            evasion,
            speed: 10,
            special: SpecialBehavior::None,
            attack_range: 1,
        }
        .spawn(Position::new(2, 2), 0, &DifficultyMultipliers::default())
    }

    #[test]
    fn damage_is_attack_minus_defense() {
        let mut player = test_player();
        let mut enemy = test_enemy(10, 3, 5, 0);

        // No evasion roll (evasion 0); crit roll misses (99 >= 5).
        let mut dice = SequenceDice::new([99]);
        let result = perform_attack(
            Combatant::Player(&mut player),
            Combatant::Enemy(&mut enemy),
            &mut dice,
        );
        assert!(result.hit);
        assert_eq!(result.damage, 15);
        assert!(result.defender_died);
        assert_eq!(enemy.hp, -5);
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut player = test_player();
        player.attack = 2;
        let mut enemy = test_enemy(10, 3, 5, 0);
        let mut dice = SequenceDice::new([99]);
        let result = perform_attack(
            Combatant::Player(&mut player),
            Combatant::Enemy(&mut enemy),
            &mut dice,
        );
        assert_eq!(result.damage, 0);
        assert_eq!(enemy.hp, 10);
        assert!(!result.defender_died);
    }

    #[test]
    fn evasion_roll_blocks_everything() {
        let mut player = test_player();
        let mut enemy = test_enemy(10, 3, 0, 30);
        let mut dice = SequenceDice::new([0]); // 0 < 30 evades
        let result = perform_attack(
            Combatant::Player(&mut player),
            Combatant::Enemy(&mut enemy),
            &mut dice,
        );
        assert!(!result.hit);
        assert!(result.evaded);
        assert_eq!(result.damage, 0);
        assert_eq!(enemy.hp, 10);
    }

    #[test]
    fn player_crit_scales_by_crit_damage() {
        let mut player = test_player();
        player.crit_damage = 200;
        let mut enemy = test_enemy(100, 3, 0, 0);
        let mut dice = SequenceDice::new([0]); // crit roll passes
        let result = perform_attack(
            Combatant::Player(&mut player),
            Combatant::Enemy(&mut enemy),
            &mut dice,
        );
        assert!(result.is_crit);
        assert_eq!(result.damage, 40);
    }

    #[test]
    fn enemies_never_crit() {
        let mut player = test_player();
        player.evasion = 0;
        let mut enemy = test_enemy(10, 30, 0, 0);
        let mut dice = SequenceDice::new([0, 0, 0]);
        let result = perform_attack(
            Combatant::Enemy(&mut enemy),
            Combatant::Player(&mut player),
            &mut dice,
        );
        assert!(!result.is_crit);
        assert_eq!(result.damage, 30);
    }

    #[test]
    fn lifesteal_heals_on_hit() {
        let mut player = test_player();
        player.lifesteal = 10;
        player.hp = 100;
        let mut enemy = test_enemy(100, 3, 0, 0);
        let mut dice = SequenceDice::new([99]);
        let result = perform_attack(
            Combatant::Player(&mut player),
            Combatant::Enemy(&mut enemy),
            &mut dice,
        );
        // ceil(20 * 10 / 50) = 4
        assert_eq!(result.lifesteal_healed, 4);
        assert_eq!(player.hp, 104);
    }

    #[test]
    fn thorns_can_kill_the_attacker_while_player_dies() {
        let mut player = test_player();
        player.thorns = 5;
        player.evasion = 0;
        player.hp = 10;
        let mut enemy = test_enemy(4, 30, 0, 0);
        let mut dice = SequenceDice::new([]);
        let result = perform_attack(
            Combatant::Enemy(&mut enemy),
            Combatant::Player(&mut player),
            &mut dice,
        );
        assert!(result.defender_died, "player fell to the blow");
        assert!(result.attacker_died, "thorns finished the attacker");
        assert_eq!(result.thorns_damage, 5);
        assert_eq!(enemy.hp, -1);
    }

    #[test]
    fn battle_shout_raises_effective_attack() {
        let mut player = test_player();
        player.effects.push(ActiveEffect {
            kind: EffectKind::BattleShout,
            duration: 5,
            attack: 5,
            defense: 3,
            move_speed: 0,
            attack_speed: 0,
        });
        assert_eq!(player.effective_attack(), 25);
        assert_eq!(player.effective_defense(), 3);
    }

    #[test]
    fn effects_expire_after_duration() {
        let mut effects: crate::state::EffectList = Default::default();
        effects.push(ActiveEffect {
            kind: EffectKind::Entangled,
            duration: 2,
            attack: 0,
            defense: 0,
            move_speed: -50,
            attack_speed: 0,
        });
        assert!(update_effects(&mut effects).is_empty());
        let expired = update_effects(&mut effects);
        assert_eq!(expired, vec!["Entangled".to_owned()]);
        assert!(effects.is_empty());
    }

    #[test]
    fn stun_consumes_one_charge_per_turn() {
        let mut stunned = 2;
        assert!(consume_stun(&mut stunned));
        assert!(consume_stun(&mut stunned));
        assert!(!consume_stun(&mut stunned));
    }
}
