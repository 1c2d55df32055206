use crate::models::{AreaId, ItemId};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The search ran out of states before reaching the goal
    #[error("no route satisfies the shopping list")]
    NoRoute,

    #[error("areas {from} and {to} are not connected in the travel network")]
    Disconnected { from: AreaId, to: AreaId },

    #[error("item {0} is listed more than once in the requirement")]
    DuplicateItem(ItemId),

    #[error("total quantity of item {0} does not fit in a quantity")]
    QuantityOverflow(ItemId),

    #[error("line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid location `{0}`, expected `<area>:<node>`")]
    InvalidLocation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
