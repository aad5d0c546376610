//! Purpose: Define the stable public Rust API boundary for Chatwire.
//! Exports: Protocol types and codec entry points needed by the CLI and embedders.
//! Role: Public, additive-only surface; hides internal codec modules.
//! Invariants: This module is the only public path to codec primitives.
//! Invariants: Internal helpers remain private and are not directly exposed.

mod activity;
mod codec;
mod identifier;

pub use crate::core::error::{Error, ErrorKind};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::intern::{Internable, Interned, Interner};
pub use crate::core::project::{
    FieldMap, Projected, ProjectedRows, ProjectionWriter, RowsWriter, Single, SkipPolicy, Slot,
};
pub use activity::{
    Activity, ChannelData, Envelope, InstallationUpdate, Message, OnBehalfOf, TEAMS_CHANNEL,
    TeamInfo, TenantInfo,
};
pub use codec::WireCodec;
pub use identifier::{Identifier, IdentifierSeed};
