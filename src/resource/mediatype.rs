//! Media types
//!
//! The API has a single media type object with a `type` discriminator. Each
//! transport is its own declarative kind with only the fields it uses.

use super::{ObjectMapping, Write};
use crate::codec::{self, mediatype};
use crate::enums::{MEDIA_TYPE_KIND, UnknownTokenPolicy};
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use zabbix_api::ObjectKind;
use zabbix_api::objects::mediatype::MediaType;

const EMAIL: &str = "email";
const SCRIPT: &str = "script";
const WEBHOOK: &str = "webhook";

/// Fields every transport shares
fn common_from(reader: &mut AttributeReader<'_>, write: Write<'_>, transport: &str) -> MediaType {
    MediaType {
        id: write.id(),
        name: reader.string("name"),
        kind: MEDIA_TYPE_KIND.encode(transport).unwrap_or_default(),
        status: codec::flag(!reader.bool_or("enabled", true)),
        description: reader.string_or("description", ""),
        ..MediaType::default()
    }
}

fn common_to(media: &MediaType, transport: &str, state: &mut StateWriter) {
    state.set("name", media.name.as_str());
    state.set("enabled", media.status == 0);
    state.set("description", media.description.as_str());

    match MEDIA_TYPE_KIND.decode(media.kind) {
        Ok(actual) if actual == transport => {}
        Ok(actual) => state
            .diagnostics_mut()
            .error(format!("media type {} is {actual}, expected {transport}", media.id)),
        Err(e) => state.diagnostics_mut().error(e.to_string()),
    }
}

pub struct EmailMapping;

impl ObjectMapping for EmailMapping {
    type Object = MediaType;

    const NAME: &'static str = "mediatype_email";
    const KIND: ObjectKind = ObjectKind::MediaType;
    const SENSITIVE: &'static [&'static str] = &["smtp_auth_password"];

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> MediaType {
        let username = reader.opt_string("smtp_auth_user");
        MediaType {
            smtp_server: reader.opt_string("smtp_server"),
            smtp_helo: reader.opt_string("smtp_helo"),
            smtp_email: Some(reader.string("smtp_from_email")),
            smtp_port: reader.opt_int("smtp_port"),
            smtp_authentication: Some(codec::flag(username.is_some())),
            username,
            passwd: reader.opt_string("smtp_auth_password"),
            ..common_from(reader, write, EMAIL)
        }
    }

    fn to_declarative(_session: &Session<'_>, media: &MediaType, state: &mut StateWriter) {
        common_to(media, EMAIL, state);
        state.set("smtp_server", media.smtp_server.as_deref());
        state.set("smtp_helo", media.smtp_helo.as_deref());
        state.set("smtp_from_email", media.smtp_email.as_deref());
        state.set("smtp_port", media.smtp_port);
        state.set("smtp_auth_user", media.username.as_deref().filter(|u| !u.is_empty()));
    }
}

pub struct ScriptMapping;

impl ObjectMapping for ScriptMapping {
    type Object = MediaType;

    const NAME: &'static str = "mediatype_script";
    const KIND: ObjectKind = ObjectKind::MediaType;

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> MediaType {
        MediaType {
            exec_path: Some(reader.string("exec_path")),
            exec_params: Some(mediatype::script_params_from(reader, "exec_parameters")),
            ..common_from(reader, write, SCRIPT)
        }
    }

    fn to_declarative(_session: &Session<'_>, media: &MediaType, state: &mut StateWriter) {
        common_to(media, SCRIPT, state);
        state.set("exec_path", media.exec_path.as_deref());
        state.set(
            "exec_parameters",
            mediatype::script_params_to(media.exec_params.as_deref().unwrap_or_default()),
        );
    }
}

pub struct WebhookMapping;

impl ObjectMapping for WebhookMapping {
    type Object = MediaType;

    const NAME: &'static str = "mediatype_webhook";
    const KIND: ObjectKind = ObjectKind::MediaType;

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> MediaType {
        MediaType {
            script: Some(reader.string("script")),
            timeout: reader.opt_string("timeout"),
            parameters: Some(mediatype::webhook_params_from(reader, "parameter")),
            ..common_from(reader, write, WEBHOOK)
        }
    }

    fn to_declarative(_session: &Session<'_>, media: &MediaType, state: &mut StateWriter) {
        common_to(media, WEBHOOK, state);
        state.set("script", media.script.as_deref());
        state.set("timeout", media.timeout.as_deref());
        state.set(
            "parameter",
            mediatype::webhook_params_to(media.parameters.as_deref().unwrap_or_default()),
        );
    }
}
