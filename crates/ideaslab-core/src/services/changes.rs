use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Channel carrying [`IdeaChange`] messages.
pub const IDEA_CHANGES_CHANNEL: &str = "ideas";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    Claimed,
}

/// "Something changed" notice. Subscribers re-list rather than merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaChange {
    pub kind: ChangeKind,
    pub idea_id: Uuid,
    pub owner: Uuid,
}
