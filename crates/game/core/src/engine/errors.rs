use thiserror::Error;

/// Rejected player actions. The state is untouched when one of these comes
/// back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the game is over")]
    GameOver,
    #[error("waiting for a level-up choice")]
    LevelUpPending,
    #[error("no level-up choice is pending")]
    NoLevelUpPending,
    #[error("invalid level-up option index {0}")]
    InvalidLevelUpOption(usize),
    #[error("that way is blocked")]
    Blocked,
    #[error("skill slot {0} is empty")]
    EmptySkillSlot(usize),
    #[error("not enough mana: need {required}, have {available}")]
    InsufficientMana { required: i32, available: i32 },
    #[error("no dash is pending")]
    NotDashing,
    #[error("a dash direction must be a unit step")]
    BadDirection,
    #[error("out of arrows")]
    OutOfArrows,
    #[error("no target there")]
    NoTarget,
    #[error("target out of range")]
    OutOfRange,
    #[error("target not visible")]
    NotVisible,
    #[error("there is no shop on this floor")]
    NoShopHere,
    #[error("unknown shop item {0:?}")]
    UnknownShopItem(String),
    #[error("cannot afford that")]
    CannotAfford,
    #[error("that purchase would do nothing")]
    UnavailableItem,
    #[error("no free skill slot")]
    NoFreeSkillSlot,
    #[error("skill already known")]
    AlreadyKnown,
}
