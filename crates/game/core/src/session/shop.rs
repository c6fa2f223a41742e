use crate::entity::SkillEffect;
use crate::error::{ErrorSeverity, GameError};
use crate::ids::ShopItemId;

/// Something the hero can buy between levels.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShopItem {
    pub id: ShopItemId,
    pub name: String,
    pub price: u32,
    pub effect: SkillEffect,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ShopError {
    #[error("the shop is closed")]
    NotInShop,

    #[error("unknown {0}")]
    UnknownItem(ShopItemId),

    #[error("not enough gold: price {price}, have {gold}")]
    NotEnoughGold { price: u32, gold: u32 },
}

impl GameError for ShopError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            ShopError::NotInShop => "SHOP_CLOSED",
            ShopError::UnknownItem(_) => "SHOP_UNKNOWN_ITEM",
            ShopError::NotEnoughGold { .. } => "SHOP_NOT_ENOUGH_GOLD",
        }
    }
}
