//! Application services built on the ports.

mod access;
mod backfill;
mod changes;

pub use access::IdeaAccess;
pub use backfill::{BackfillPolicy, BackfillRun, OwnershipBackfill};
pub use changes::{ChangeKind, IDEA_CHANGES_CHANNEL, IdeaChange};
