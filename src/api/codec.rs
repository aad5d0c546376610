//! Purpose: Decode and encode activity payloads with multi-field discrimination.
//! Exports: `WireCodec`.
//! Role: Entry point tying the cursor, identifier, projection, and interning codecs together.
//! Invariants: Discrimination buffers the payload once; every other path is single-pass.
//! Invariants: Foreign channels and unknown variants decode to no value, never an error.
//! Invariants: Encoded output always carries the variant's fixed type/action tags.
#![allow(clippy::result_large_err)]

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, Visitor};
use serde::ser::{self, Serialize, SerializeMap, Serializer};
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;
use url::Url;

use crate::core::cursor::{self, OptionalSeed, PropertyName, ShapeTrace};
use crate::core::error::{Error, ErrorKind};
use crate::core::intern::{Interned, Interner};
use crate::core::project::{FieldMap, ProjectedRows, Single, SkipPolicy};
use crate::json::parse;

use super::activity::{
    ACTION_ADD, ACTION_REMOVE, Activity, ChannelData, Envelope, InstallationUpdate, Message,
    OnBehalfOf, OnBehalfOfRow, TEAMS_CHANNEL, TYPE_INSTALLATION_UPDATE, TYPE_MESSAGE, TeamInfo,
    TeamRow, TenantInfo,
};
use super::identifier::TracedIdentifier;

const PROP_CHANNEL_ID: &str = "channelId";
const PROP_TYPE: &str = "type";
const PROP_ACTION: &str = "action";
const PROP_ID: &str = "id";
const PROP_SERVICE_URL: &str = "serviceUrl";
const PROP_TIMESTAMP: &str = "timestamp";
const PROP_FROM: &str = "from";
const PROP_RECIPIENT: &str = "recipient";
const PROP_CONVERSATION: &str = "conversation";
const PROP_CHANNEL_DATA: &str = "channelData";
const PROP_TEXT: &str = "text";
const PROP_TEXT_FORMAT: &str = "textFormat";
const PROP_IMPORTANCE: &str = "importance";
const PROP_LOCALE: &str = "locale";
const PROP_TENANT: &str = "tenant";
const PROP_TEAM: &str = "team";
const PROP_EVENT_TYPE: &str = "eventType";
const PROP_ON_BEHALF_OF: &str = "onBehalfOf";

/// Wire codec for the activity union.
///
/// Owns the projection bindings and the service-URL interner; construct one
/// per process (or per test) and share it across request handlers.
pub struct WireCodec {
    urls: Interner<Url>,
    tenant: FieldMap<Single<String>>,
    team: FieldMap<TeamRow>,
    on_behalf_of: FieldMap<OnBehalfOfRow>,
}

impl WireCodec {
    /// Builds the codec, binding every projection eagerly so configuration
    /// mistakes surface here and never during decode.
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            urls: Interner::new(),
            tenant: FieldMap::bind([PROP_ID])?,
            team: FieldMap::bind([PROP_ID, "name"])?,
            on_behalf_of: FieldMap::bind(["itemid", "mentionType", "mri", "displayName"])?,
        })
    }

    /// Selects the encode suppression policy for all projected metadata.
    pub fn with_policy(mut self, policy: SkipPolicy) -> Self {
        self.tenant = self.tenant.with_policy(policy);
        self.team = self.team.with_policy(policy);
        self.on_behalf_of = self.on_behalf_of.with_policy(policy);
        self
    }

    /// The interner backing service-URL identity; exposed so callers can
    /// observe or pre-seed the cache.
    pub fn urls(&self) -> &Interner<Url> {
        &self.urls
    }

    /// Decodes one payload. `Ok(None)` means the payload was recognized JSON
    /// but addressed to another channel or an unknown variant.
    pub fn decode(&self, input: &str) -> Result<Option<Activity>, Error> {
        let buffered = parse::buffer(input).map_err(|err| {
            let hint = parse::hint_for_error(&err, "activity payload");
            Error::new(ErrorKind::Parse)
                .with_message("malformed activity payload")
                .with_hint(hint)
                .with_source(err)
        })?;
        self.decode_value(&buffered)
    }

    /// Decodes an already-buffered payload.
    ///
    /// Discrimination needs lookahead across arbitrary property order, so the
    /// payload is probed as a document here and then re-driven through the
    /// ordinary field-by-field decoders of the selected variant.
    pub fn decode_value(&self, buffered: &Value) -> Result<Option<Activity>, Error> {
        let Some(object) = buffered.as_object() else {
            return Err(Error::new(ErrorKind::CursorPosition).with_message(format!(
                "activity payload must be an object, found {}",
                cursor::value_kind(buffered)
            )));
        };

        let channel = object.get(PROP_CHANNEL_ID).and_then(Value::as_str);
        if channel != Some(TEAMS_CHANNEL) {
            debug!(
                channel = channel.unwrap_or("<absent>"),
                "ignoring activity from unrecognized channel"
            );
            return Ok(None);
        }

        let type_tag = object.get(PROP_TYPE).and_then(Value::as_str);
        match type_tag {
            Some(TYPE_INSTALLATION_UPDATE) => {
                let action = object.get(PROP_ACTION).and_then(Value::as_str);
                match action {
                    Some(ACTION_ADD) => self
                        .decode_installation(buffered)
                        .map(|update| Some(Activity::InstallationAdded(update))),
                    Some(ACTION_REMOVE) => self
                        .decode_installation(buffered)
                        .map(|update| Some(Activity::InstallationRemoved(update))),
                    _ => {
                        debug!(
                            action = action.unwrap_or("<absent>"),
                            "ignoring installation update with unrecognized action"
                        );
                        Ok(None)
                    }
                }
            }
            Some(TYPE_MESSAGE) => self
                .decode_message(buffered)
                .map(|message| Some(Activity::Message(message))),
            _ => {
                debug!(
                    activity_type = type_tag.unwrap_or("<absent>"),
                    "ignoring activity with unrecognized type"
                );
                Ok(None)
            }
        }
    }

    /// Encodes an activity to its canonical wire text.
    pub fn encode(&self, activity: &Activity) -> Result<String, Error> {
        serde_json::to_string(&ActivityWire {
            codec: self,
            activity,
        })
        .map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to encode activity")
                .with_source(err)
        })
    }

    /// Encodes an activity to a buffered document.
    pub fn encode_value(&self, activity: &Activity) -> Result<Value, Error> {
        serde_json::to_value(ActivityWire {
            codec: self,
            activity,
        })
        .map_err(|err| {
            Error::new(ErrorKind::Internal)
                .with_message("failed to encode activity")
                .with_source(err)
        })
    }

    fn decode_message(&self, buffered: &Value) -> Result<Message, Error> {
        let trace = ShapeTrace::default();
        MessageSeed {
            codec: self,
            trace: &trace,
        }
        .deserialize(buffered)
        .map_err(|err| cursor::decode_error("message activity", err, Some(&trace)))
    }

    fn decode_installation(&self, buffered: &Value) -> Result<InstallationUpdate, Error> {
        let trace = ShapeTrace::default();
        InstallationSeed {
            codec: self,
            trace: &trace,
        }
        .deserialize(buffered)
        .map_err(|err| cursor::decode_error("installationUpdate activity", err, Some(&trace)))
    }
}

impl fmt::Debug for WireCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireCodec")
            .field("urls", &self.urls)
            .finish_non_exhaustive()
    }
}

/// Reads one envelope property if `name` is one; returns whether it was.
fn read_envelope_property<'de, A>(
    codec: &WireCodec,
    trace: &ShapeTrace,
    envelope: &mut Envelope,
    name: &str,
    map: &mut A,
) -> Result<bool, A::Error>
where
    A: MapAccess<'de>,
{
    match name {
        PROP_ID => envelope.id = map.next_value()?,
        PROP_SERVICE_URL => {
            envelope.service_url = map.next_value_seed(OptionalSeed(TracedIdentifier {
                seed: Interned(&codec.urls),
                trace,
            }))?;
        }
        PROP_TIMESTAMP => {
            envelope.timestamp = match map.next_value::<Option<String>>()? {
                Some(text) => {
                    Some(OffsetDateTime::parse(&text, &Rfc3339).map_err(de::Error::custom)?)
                }
                None => None,
            };
        }
        PROP_FROM => {
            envelope.from = map.next_value_seed(OptionalSeed(TracedIdentifier {
                seed: PhantomData::<String>,
                trace,
            }))?;
        }
        PROP_RECIPIENT => {
            envelope.recipient = map.next_value_seed(OptionalSeed(TracedIdentifier {
                seed: PhantomData::<String>,
                trace,
            }))?;
        }
        PROP_CONVERSATION => {
            envelope.conversation = map.next_value_seed(OptionalSeed(TracedIdentifier {
                seed: PhantomData::<String>,
                trace,
            }))?;
        }
        PROP_CHANNEL_DATA => {
            envelope.channel_data = map.next_value_seed(OptionalSeed(ChannelDataSeed { codec }))?;
        }
        _ => return Ok(false),
    }
    Ok(true)
}

struct MessageSeed<'c> {
    codec: &'c WireCodec,
    trace: &'c ShapeTrace,
}

impl<'de> DeserializeSeed<'de> for MessageSeed<'_> {
    type Value = Message;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for MessageSeed<'_> {
    type Value = Message;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a message activity object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut message = Message::default();
        while let Some(name) = map.next_key::<PropertyName>()? {
            if read_envelope_property(
                self.codec,
                self.trace,
                &mut message.envelope,
                name.as_str(),
                &mut map,
            )? {
                continue;
            }
            match name.as_str() {
                PROP_TEXT => {
                    message.text = map.next_value::<Option<String>>()?.unwrap_or_default();
                }
                PROP_TEXT_FORMAT => message.text_format = map.next_value()?,
                PROP_IMPORTANCE => message.importance = map.next_value()?,
                PROP_LOCALE => message.locale = map.next_value()?,
                _ => cursor::skip_value(&mut map)?,
            }
        }
        Ok(message)
    }
}

struct InstallationSeed<'c> {
    codec: &'c WireCodec,
    trace: &'c ShapeTrace,
}

impl<'de> DeserializeSeed<'de> for InstallationSeed<'_> {
    type Value = InstallationUpdate;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for InstallationSeed<'_> {
    type Value = InstallationUpdate;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an installation update activity object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut update = InstallationUpdate::default();
        while let Some(name) = map.next_key::<PropertyName>()? {
            if read_envelope_property(
                self.codec,
                self.trace,
                &mut update.envelope,
                name.as_str(),
                &mut map,
            )? {
                continue;
            }
            cursor::skip_value(&mut map)?;
        }
        Ok(update)
    }
}

struct ChannelDataSeed<'c> {
    codec: &'c WireCodec,
}

impl<'de> DeserializeSeed<'de> for ChannelDataSeed<'_> {
    type Value = ChannelData;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for ChannelDataSeed<'_> {
    type Value = ChannelData;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a channel metadata object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut data = ChannelData::default();
        while let Some(name) = map.next_key::<PropertyName>()? {
            match name.as_str() {
                PROP_TENANT => {
                    data.tenant = map
                        .next_value_seed(OptionalSeed(&self.codec.tenant))?
                        .map(|Single(id)| TenantInfo { id });
                }
                PROP_TEAM => {
                    data.team = map
                        .next_value_seed(OptionalSeed(&self.codec.team))?
                        .map(TeamInfo::from_row);
                }
                PROP_EVENT_TYPE => data.event_type = map.next_value()?,
                PROP_ON_BEHALF_OF => {
                    let rows = map
                        .next_value_seed(OptionalSeed(ProjectedRows(&self.codec.on_behalf_of)))?;
                    data.on_behalf_of = rows
                        .unwrap_or_default()
                        .into_iter()
                        .map(OnBehalfOf::from_row)
                        .collect();
                }
                _ => cursor::skip_value(&mut map)?,
            }
        }
        Ok(data)
    }
}

/// Single-pass encode of one activity; all fields are known from the variant
/// tag, so no buffering happens on this path.
struct ActivityWire<'a> {
    codec: &'a WireCodec,
    activity: &'a Activity,
}

impl Serialize for ActivityWire<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry(PROP_TYPE, self.activity.type_tag())?;
        if let Some(action) = self.activity.action() {
            map.serialize_entry(PROP_ACTION, action)?;
        }
        map.serialize_entry(PROP_CHANNEL_ID, self.activity.channel_id())?;
        write_envelope(self.codec, self.activity.envelope(), &mut map)?;
        if let Activity::Message(message) = self.activity {
            map.serialize_entry(PROP_TEXT, &message.text)?;
            if let Some(text_format) = &message.text_format {
                map.serialize_entry(PROP_TEXT_FORMAT, text_format)?;
            }
            if let Some(importance) = &message.importance {
                map.serialize_entry(PROP_IMPORTANCE, importance)?;
            }
            if let Some(locale) = &message.locale {
                map.serialize_entry(PROP_LOCALE, locale)?;
            }
        }
        map.end()
    }
}

fn write_envelope<M>(codec: &WireCodec, envelope: &Envelope, map: &mut M) -> Result<(), M::Error>
where
    M: SerializeMap,
{
    if let Some(id) = &envelope.id {
        map.serialize_entry(PROP_ID, id)?;
    }
    if let Some(service_url) = &envelope.service_url {
        map.serialize_entry(PROP_SERVICE_URL, service_url)?;
    }
    if let Some(timestamp) = &envelope.timestamp {
        let text = timestamp.format(&Rfc3339).map_err(ser::Error::custom)?;
        map.serialize_entry(PROP_TIMESTAMP, &text)?;
    }
    if let Some(from) = &envelope.from {
        map.serialize_entry(PROP_FROM, from)?;
    }
    if let Some(recipient) = &envelope.recipient {
        map.serialize_entry(PROP_RECIPIENT, recipient)?;
    }
    if let Some(conversation) = &envelope.conversation {
        map.serialize_entry(PROP_CONVERSATION, conversation)?;
    }
    if let Some(data) = &envelope.channel_data {
        map.serialize_entry(PROP_CHANNEL_DATA, &ChannelDataWire { codec, data })?;
    }
    Ok(())
}

struct ChannelDataWire<'a> {
    codec: &'a WireCodec,
    data: &'a ChannelData,
}

impl Serialize for ChannelDataWire<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        if let Some(tenant) = &self.data.tenant {
            let row = Single(tenant.id.clone());
            map.serialize_entry(PROP_TENANT, &self.codec.tenant.writer(&row))?;
        }
        if let Some(team) = &self.data.team {
            let row = team.to_row();
            map.serialize_entry(PROP_TEAM, &self.codec.team.writer(&row))?;
        }
        if let Some(event_type) = &self.data.event_type {
            map.serialize_entry(PROP_EVENT_TYPE, event_type)?;
        }
        if !self.data.on_behalf_of.is_empty() {
            let rows: Vec<OnBehalfOfRow> =
                self.data.on_behalf_of.iter().map(OnBehalfOf::to_row).collect();
            map.serialize_entry(PROP_ON_BEHALF_OF, &self.codec.on_behalf_of.rows_writer(&rows))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::WireCodec;
    use crate::api::activity::{Activity, ChannelData, OnBehalfOf, TeamInfo, TenantInfo};
    use crate::core::error::ErrorKind;

    fn codec() -> WireCodec {
        WireCodec::new().expect("codec")
    }

    #[test]
    fn installation_add_decodes_with_an_interned_service_url() {
        let codec = codec();
        let decoded = codec
            .decode(r#"{"channelId":"msteams","type":"installationUpdate","action":"add","serviceUrl":"https://x/"}"#)
            .expect("decode")
            .expect("recognized");

        let Activity::InstallationAdded(update) = &decoded else {
            panic!("expected InstallationAdded, got {decoded:?}");
        };
        let service_url = update.envelope.service_url.as_ref().expect("service url");
        let canonical = codec.urls().resolve("https://x/").expect("resolve");
        assert!(Arc::ptr_eq(service_url.get(), &canonical));
    }

    #[test]
    fn installation_remove_selects_the_other_variant() {
        let decoded = codec()
            .decode(r#"{"channelId":"msteams","action":"remove","type":"installationUpdate"}"#)
            .expect("decode")
            .expect("recognized");
        assert!(matches!(decoded, Activity::InstallationRemoved(_)));
        assert_eq!(decoded.action(), Some("remove"));
    }

    #[test]
    fn message_decodes_with_defaults_for_absent_fields() {
        let decoded = codec()
            .decode(r#"{"channelId":"msteams","type":"message","text":"hi"}"#)
            .expect("decode")
            .expect("recognized");
        let Activity::Message(message) = decoded else {
            panic!("expected Message");
        };
        assert_eq!(message.text, "hi");
        assert_eq!(message.text_format, None);
        assert_eq!(message.importance, None);
        assert_eq!(message.envelope.timestamp, None);
    }

    #[test]
    fn discrimination_is_independent_of_property_order() {
        let decoded = codec()
            .decode(r#"{"text":"hi","type":"message","channelId":"msteams"}"#)
            .expect("decode")
            .expect("recognized");
        assert!(matches!(decoded, Activity::Message(_)));
    }

    #[test]
    fn foreign_channels_are_silently_filtered() {
        let codec = codec();
        for payload in [
            r#"{"channelId":"slack","type":"message","text":"hi"}"#,
            r#"{"type":"message","text":"hi"}"#,
            r#"{"channelId":7,"type":"message"}"#,
        ] {
            assert_eq!(codec.decode(payload).expect("decode"), None, "{payload}");
        }
    }

    #[test]
    fn unknown_types_and_actions_are_silently_filtered() {
        let codec = codec();
        for payload in [
            r#"{"channelId":"msteams","type":"bogus"}"#,
            r#"{"channelId":"msteams","type":7}"#,
            r#"{"channelId":"msteams"}"#,
            r#"{"channelId":"msteams","type":"installationUpdate","action":"upgrade"}"#,
            r#"{"channelId":"msteams","type":"installationUpdate"}"#,
        ] {
            assert_eq!(codec.decode(payload).expect("decode"), None, "{payload}");
        }
    }

    #[test]
    fn non_object_payloads_report_the_cursor_position() {
        let err = codec().decode("[1, 2]").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CursorPosition);
    }

    #[test]
    fn malformed_payloads_report_parse_failures_with_hints() {
        let err = codec().decode(r#"{"channelId":"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
        assert!(err.hint().is_some());
    }

    #[test]
    fn malformed_service_url_is_a_shape_error() {
        let err = codec()
            .decode(r#"{"channelId":"msteams","type":"message","serviceUrl":[1]}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedShape);
    }

    #[test]
    fn enveloped_identifier_without_id_is_a_missing_identifier_error() {
        let err = codec()
            .decode(r#"{"channelId":"msteams","type":"message","from":{"name":"x"}}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingIdentifier);
    }

    #[test]
    fn identifiers_decode_from_both_wire_shapes() {
        let codec = codec();
        let bare = codec
            .decode(r#"{"channelId":"msteams","type":"message","from":"user-1"}"#)
            .expect("decode")
            .expect("recognized");
        let enveloped = codec
            .decode(r#"{"channelId":"msteams","type":"message","from":{"id":"user-1","name":"U"}}"#)
            .expect("decode")
            .expect("recognized");
        assert_eq!(bare.envelope().from, enveloped.envelope().from);
    }

    #[test]
    fn channel_data_round_trips_through_projections() {
        let codec = codec();
        let payload = json!({
            "channelId": "msteams",
            "type": "message",
            "text": "hello team",
            "timestamp": "2026-01-02T03:04:05Z",
            "channelData": {
                "tenant": {"id": "tenant-1"},
                "team": {"name": "General", "id": "team-9"},
                "eventType": "teamMemberAdded",
                "onBehalfOf": [
                    {"itemid": 0, "mentionType": "person", "mri": "user-a", "displayName": "Ada"}
                ]
            }
        });
        let decoded = codec
            .decode_value(&payload)
            .expect("decode")
            .expect("recognized");

        let data = decoded
            .envelope()
            .channel_data
            .as_ref()
            .expect("channel data");
        assert_eq!(
            data.tenant,
            Some(TenantInfo {
                id: "tenant-1".to_string()
            })
        );
        assert_eq!(
            data.team,
            Some(TeamInfo {
                id: Some("team-9".to_string()),
                name: Some("General".to_string())
            })
        );
        assert_eq!(
            data.on_behalf_of,
            vec![OnBehalfOf {
                item_id: 0,
                mention_type: "person".to_string(),
                mri: "user-a".to_string(),
                display_name: "Ada".to_string()
            }]
        );

        let reencoded = codec.encode_value(&decoded).expect("encode");
        let again = codec
            .decode_value(&reencoded)
            .expect("decode")
            .expect("recognized");
        assert_eq!(decoded, again);
    }

    #[test]
    fn encode_reproduces_the_selecting_tags() {
        let codec = codec();
        let decoded = codec
            .decode(r#"{"channelId":"msteams","type":"installationUpdate","action":"add"}"#)
            .expect("decode")
            .expect("recognized");
        let wire = codec.encode_value(&decoded).expect("encode");
        assert_eq!(wire["type"], "installationUpdate");
        assert_eq!(wire["action"], "add");
        assert_eq!(wire["channelId"], "msteams");
    }

    #[test]
    fn encode_normalizes_identifier_envelopes_to_bare_values() {
        let codec = codec();
        let decoded = codec
            .decode(
                r#"{"channelId":"msteams","type":"message","from":{"id":"user-1","aadObjectId":"x"},"text":"hi"}"#,
            )
            .expect("decode")
            .expect("recognized");
        let wire = codec.encode_value(&decoded).expect("encode");
        assert_eq!(wire["from"], "user-1");
    }

    #[test]
    fn null_channel_data_decodes_as_absent() {
        let decoded = codec()
            .decode(r#"{"channelId":"msteams","type":"message","channelData":null,"text":"hi"}"#)
            .expect("decode")
            .expect("recognized");
        assert_eq!(decoded.envelope().channel_data, None);
    }

    #[test]
    fn null_on_behalf_of_decodes_as_empty() {
        let decoded = codec()
            .decode(
                r#"{"channelId":"msteams","type":"message","channelData":{"onBehalfOf":null},"text":"hi"}"#,
            )
            .expect("decode")
            .expect("recognized");
        let data = decoded
            .envelope()
            .channel_data
            .clone()
            .expect("channel data");
        assert_eq!(data, ChannelData::default());
    }

    #[test]
    fn bad_timestamp_is_a_shape_error() {
        let err = codec()
            .decode(r#"{"channelId":"msteams","type":"message","timestamp":"yesterday"}"#)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnsupportedShape);
    }
}
