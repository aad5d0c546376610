//! Purpose: Define public activity types mirroring the chat protocol wire contract.
//! Exports: `Activity`, `Envelope`, `Message`, `InstallationUpdate`, channel metadata records.
//! Role: Stable protocol object model shared by the codec, CLI, and tests.
//! Invariants: Discriminator tags are properties of each variant, never stored data.
//! Invariants: Re-encoding a decoded activity reproduces the tags that selected it.
use std::sync::Arc;

use time::OffsetDateTime;
use url::Url;

use super::identifier::Identifier;

/// The only channel this codec recognizes; anything else is filtered out.
pub const TEAMS_CHANNEL: &str = "msteams";

pub(crate) const TYPE_MESSAGE: &str = "message";
pub(crate) const TYPE_INSTALLATION_UPDATE: &str = "installationUpdate";
pub(crate) const ACTION_ADD: &str = "add";
pub(crate) const ACTION_REMOVE: &str = "remove";

/// A recognized inbound or outbound protocol activity.
///
/// The variant set is closed; unknown wire combinations never construct an
/// `Activity` (they decode to no value instead).
#[derive(Clone, Debug, PartialEq)]
pub enum Activity {
    InstallationAdded(InstallationUpdate),
    InstallationRemoved(InstallationUpdate),
    Message(Message),
}

impl Activity {
    /// The wire `type` tag this variant encodes with.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Activity::InstallationAdded(_) | Activity::InstallationRemoved(_) => {
                TYPE_INSTALLATION_UPDATE
            }
            Activity::Message(_) => TYPE_MESSAGE,
        }
    }

    /// The wire `action` tag, for variants that carry one.
    pub fn action(&self) -> Option<&'static str> {
        match self {
            Activity::InstallationAdded(_) => Some(ACTION_ADD),
            Activity::InstallationRemoved(_) => Some(ACTION_REMOVE),
            Activity::Message(_) => None,
        }
    }

    pub fn channel_id(&self) -> &'static str {
        TEAMS_CHANNEL
    }

    pub fn envelope(&self) -> &Envelope {
        match self {
            Activity::InstallationAdded(update) | Activity::InstallationRemoved(update) => {
                &update.envelope
            }
            Activity::Message(message) => &message.envelope,
        }
    }
}

/// Fields shared by every activity variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Envelope {
    pub id: Option<String>,
    /// Service endpoint for replies; interned so repeated decodes share one
    /// canonical instance.
    pub service_url: Option<Identifier<Arc<Url>>>,
    pub timestamp: Option<OffsetDateTime>,
    pub from: Option<Identifier<String>>,
    pub recipient: Option<Identifier<String>>,
    pub conversation: Option<Identifier<String>>,
    pub channel_data: Option<ChannelData>,
}

/// A user-visible chat message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Message {
    pub envelope: Envelope,
    pub text: String,
    pub text_format: Option<String>,
    pub importance: Option<String>,
    pub locale: Option<String>,
}

/// App installed into or removed from a conversation; the direction lives in
/// the enclosing `Activity` variant.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InstallationUpdate {
    pub envelope: Envelope,
}

/// Channel-specific metadata block.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChannelData {
    pub tenant: Option<TenantInfo>,
    pub team: Option<TeamInfo>,
    pub event_type: Option<String>,
    pub on_behalf_of: Vec<OnBehalfOf>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TenantInfo {
    pub id: String,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct TeamInfo {
    pub id: Option<String>,
    pub name: Option<String>,
}

pub(crate) type TeamRow = (Option<String>, Option<String>);

impl TeamInfo {
    pub(crate) fn from_row((id, name): TeamRow) -> Self {
        Self { id, name }
    }

    pub(crate) fn to_row(&self) -> TeamRow {
        (self.id.clone(), self.name.clone())
    }
}

/// One delegated sender in a notification sent on behalf of a user.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OnBehalfOf {
    pub item_id: u64,
    pub mention_type: String,
    pub mri: String,
    pub display_name: String,
}

pub(crate) type OnBehalfOfRow = (u64, String, String, String);

impl OnBehalfOf {
    pub(crate) fn from_row((item_id, mention_type, mri, display_name): OnBehalfOfRow) -> Self {
        Self {
            item_id,
            mention_type,
            mri,
            display_name,
        }
    }

    pub(crate) fn to_row(&self) -> OnBehalfOfRow {
        (
            self.item_id,
            self.mention_type.clone(),
            self.mri.clone(),
            self.display_name.clone(),
        )
    }
}
