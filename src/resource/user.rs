//! Users, user groups and roles

use super::{ObjectMapping, Write};
use crate::codec::{self, read_required_token, user};
use crate::enums::{ROLE_TYPE, UnknownTokenPolicy};
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::user::{Role, User, UserGroup};

/// Frontend preferences sent only when declared
const PREFERENCES: [&str; 6] = ["lang", "theme", "autologout", "refresh", "timezone", "rows_per_page"];

pub struct UserMapping;

impl ObjectMapping for UserMapping {
    type Object = User;

    const NAME: &'static str = "user";
    const KIND: ObjectKind = ObjectKind::User;
    const SENSITIVE: &'static [&'static str] = &["password"];

    fn select() -> Value {
        json!({
            "selectUsrgrps": ["usrgrpid"],
            "selectMedias": "extend",
        })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> User {
        let [lang, theme, autologout, refresh, timezone, rows_per_page] =
            PREFERENCES.map(|name| reader.opt_string(name));
        User {
            id: write.id(),
            username: reader.string("username"),
            name: reader.string_or("name", ""),
            surname: reader.string_or("surname", ""),
            password: reader.string_or("password", ""),
            role_id: reader.string("role_id"),
            groups: user::groups_from(reader, "groups"),
            medias: user::medias_from(reader, "medias"),
            lang,
            theme,
            autologout,
            refresh,
            timezone,
            rows_per_page,
        }
    }

    fn to_declarative(_session: &Session<'_>, user: &User, state: &mut StateWriter) {
        state.set("username", user.username.as_str());
        state.set("name", user.name.as_str());
        state.set("surname", user.surname.as_str());
        state.set("role_id", user.role_id.as_str());
        state.set("groups", user::groups_to(&user.groups));
        state.set("medias", user::medias_to(&user.medias));

        let preferences = [
            &user.lang,
            &user.theme,
            &user.autologout,
            &user.refresh,
            &user.timezone,
            &user.rows_per_page,
        ];
        for (name, value) in PREFERENCES.iter().zip(preferences) {
            if let Some(value) = value {
                state.set(name, value.as_str());
            }
        }
    }
}

pub struct UserGroupMapping;

impl ObjectMapping for UserGroupMapping {
    type Object = UserGroup;

    const NAME: &'static str = "user_group";
    const KIND: ObjectKind = ObjectKind::UserGroup;

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> UserGroup {
        UserGroup {
            id: write.id(),
            name: reader.string("name"),
            gui_access: reader.int_or("gui_access", 0),
            debug_mode: reader.int_or("debug_mode", 0),
        }
    }

    fn to_declarative(_session: &Session<'_>, group: &UserGroup, state: &mut StateWriter) {
        state.set("name", group.name.as_str());
        state.set("gui_access", group.gui_access);
        state.set("debug_mode", group.debug_mode);
    }
}

pub struct RoleMapping;

impl ObjectMapping for RoleMapping {
    type Object = Role;

    const NAME: &'static str = "role";
    const KIND: ObjectKind = ObjectKind::Role;

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> Role {
        Role {
            id: write.id(),
            name: reader.string("name"),
            kind: read_required_token(reader, "type", &ROLE_TYPE, policy),
            readonly: 0,
        }
    }

    fn to_declarative(_session: &Session<'_>, role: &Role, state: &mut StateWriter) {
        state.set("name", role.name.as_str());
        state.try_set("type", ROLE_TYPE.decode(role.kind));
        state.set("read_only", codec::is_set(role.readonly));
    }
}
