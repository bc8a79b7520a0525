//! Relic trigger dispatchers.
//!
//! Each dispatcher walks the owned relics in acquisition order, applies the
//! ones bound to its trigger, and stack-scales flat bonuses (damage, gold,
//! heal). Multipliers and probabilities do not scale with stacks.

use crate::relic::{OwnedRelic, RelicId, RelicTrigger};
use crate::rng::DiceRoller;
use crate::state::{Enemy, Player};

fn owned_with_trigger(
    relics: &[OwnedRelic],
    trigger: RelicTrigger,
) -> impl Iterator<Item = &OwnedRelic> {
    relics
        .iter()
        .filter(move |r| r.id.spec().trigger == trigger)
}

/// Flat attack bonus from passive relics (wealth scaling).
pub fn passive_attack_bonus(player: &Player) -> i32 {
    owned_with_trigger(&player.relics, RelicTrigger::Passive)
        .map(|r| match r.id {
            RelicId::WealthIsPower => (player.gold / 100) * 5 * r.stacks,
            _ => 0,
        })
        .sum()
}

pub struct AttackRelicOutcome {
    pub final_damage: i32,
    pub messages: Vec<String>,
}

/// Rework an outgoing hit: flat bonuses and passives add, multipliers stack
/// multiplicatively, vampiric healing lands immediately, and chain lightning
/// may splash every other enemy.
pub fn process_attack_relics(
    player: &mut Player,
    relics: &[OwnedRelic],
    enemies: &mut [Enemy],
    target_idx: usize,
    base_damage: i32,
    dice: &mut dyn DiceRoller,
) -> AttackRelicOutcome {
    let mut messages = Vec::new();
    let mut multiplier = 1.0_f64;
    let mut bonus = 0;
    let mut heal = 0;

    for relic in owned_with_trigger(relics, RelicTrigger::OnAttack) {
        match relic.id {
            RelicId::BerserkerHeart => {
                if player.hp < player.max_hp * 30 / 100 {
                    multiplier *= 2.0;
                    messages.push("The Berserker Heart blazes; damage doubled!".to_owned());
                }
            }
            RelicId::VampiricBlade => {
                heal += (base_damage / 10) * relic.stacks;
            }
            RelicId::ExecutionerAxe => {
                let target = &enemies[target_idx];
                if target.hp < target.max_hp * 20 / 100 {
                    multiplier *= 2.0;
                    messages.push("The Executioner's Axe falls!".to_owned());
                }
            }
            RelicId::GlassCannon => {
                multiplier *= 1.5;
            }
            RelicId::ChainLightning => {
                if dice.chance_percent(20) {
                    for (i, enemy) in enemies.iter_mut().enumerate() {
                        if i != target_idx {
                            enemy.hp -= 5;
                        }
                    }
                    messages.push("Chain lightning arcs between your foes!".to_owned());
                }
            }
            _ => {}
        }
    }

    bonus += passive_attack_bonus(player);

    if heal > 0 {
        player.heal(heal);
        messages.push("The Vampiric Blade drinks deep.".to_owned());
    }

    AttackRelicOutcome {
        final_damage: (((base_damage + bonus) as f64) * multiplier) as i32,
        messages,
    }
}

/// Kill rewards: bonus gold and healing. Soul Collector mutates max HP
/// directly. Returned gold has NOT been added to the player yet so the caller
/// can route it through the gold-gain trigger.
pub fn process_kill_relics(player: &mut Player, relics: &[OwnedRelic]) -> (i32, Vec<String>) {
    let mut messages = Vec::new();
    let mut gold = 0;
    let mut heal = 0;

    for relic in owned_with_trigger(relics, RelicTrigger::OnKill) {
        match relic.id {
            RelicId::BloodStone => {
                heal += 5 * relic.stacks;
                messages.push("The Blood Stone glows, restoring your life.".to_owned());
            }
            RelicId::MidasTouch => {
                gold += player.luck * relic.stacks;
                messages.push(format!(
                    "The Midas Touch gleams: +{} gold!",
                    player.luck * relic.stacks
                ));
            }
            RelicId::SoulCollector => {
                player.max_hp += 1;
                messages.push("The Soul Collector claims a soul. Max HP +1.".to_owned());
            }
            _ => {}
        }
    }

    if heal > 0 {
        player.heal(heal);
    }
    (gold, messages)
}

pub struct DamageTakenOutcome {
    /// Damage after relic adjustment.
    pub final_damage: i32,
    /// Phoenix Feather fired and the hit was negated.
    pub revived: bool,
    pub messages: Vec<String>,
}

/// Rework an incoming hit that has already been applied to `player.hp`. The
/// caller refunds `incoming - final_damage` unless the phoenix fired, in
/// which case HP has been reset outright.
pub fn process_damage_taken(
    player: &mut Player,
    relics: &[OwnedRelic],
    incoming: i32,
) -> DamageTakenOutcome {
    let mut messages = Vec::new();
    let mut multiplier = 1.0_f64;
    let mut reduction = 0;
    let mut revived = false;

    for relic in owned_with_trigger(relics, RelicTrigger::OnDamageTaken) {
        match relic.id {
            RelicId::IronSkin => reduction += 2 * relic.stacks,
            RelicId::GlassCannonDefense => multiplier *= 1.5,
            RelicId::PhoenixFeather => {
                if player.hp <= 0 && !revived {
                    player.hp = player.max_hp / 2;
                    revived = true;
                    messages.push(
                        "The Phoenix Feather ignites; you rise from the ashes!".to_owned(),
                    );
                }
            }
            _ => {}
        }
    }

    let final_damage = if revived {
        0
    } else {
        ((((incoming - reduction) as f64) * multiplier) as i32).max(0)
    };
    DamageTakenOutcome {
        final_damage,
        revived,
        messages,
    }
}

/// Gold-gain bonuses. Returns the total to credit plus trigger messages.
pub fn process_gold_gain(relics: &[OwnedRelic], base_gold: i32) -> (i32, Vec<String>) {
    let mut messages = Vec::new();
    let mut bonus = 0;

    for relic in owned_with_trigger(relics, RelicTrigger::OnGoldGain) {
        match relic.id {
            RelicId::GoldMagnet => {
                bonus += (base_gold / 5) * relic.stacks;
                messages.push("The Gold Magnet pulls in extra coins.".to_owned());
            }
            RelicId::GreedIncarnate => {
                bonus += base_gold * relic.stacks;
                messages.push("Greed Incarnate devours more gold!".to_owned());
            }
            _ => {}
        }
    }
    (base_gold + bonus, messages)
}

/// Skill-use trigger: true when the cast should cost no mana.
pub fn process_skill_use(
    relics: &[OwnedRelic],
    dice: &mut dyn DiceRoller,
) -> (bool, Vec<String>) {
    let mut free_cast = false;
    let mut messages = Vec::new();
    for relic in owned_with_trigger(relics, RelicTrigger::OnSkillUse) {
        if relic.id == RelicId::TimeLoop && dice.chance_percent(30) {
            free_cast = true;
            messages.push("Time loops back; the mana is never spent!".to_owned());
        }
    }
    (free_cast, messages)
}

/// Level-up trigger: returns the multiplier applied to the chosen bonus.
pub fn process_level_up_relics(relics: &[OwnedRelic]) -> (i32, Vec<String>) {
    let mut factor = 1;
    let mut messages = Vec::new();
    for relic in owned_with_trigger(relics, RelicTrigger::OnLevelUp) {
        if relic.id == RelicId::InfinityGauntlet {
            factor *= 2;
            messages.push("The Infinity Gauntlet awakens!".to_owned());
        }
    }
    (factor, messages)
}
