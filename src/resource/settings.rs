//! Settings singletons
//!
//! Authentication and housekeeping settings always exist and have no id.
//! Creating one adopts the existing object and applies the declared fields;
//! deleting one only forgets it. Fields are flat and described by tables, so
//! only declared fields are ever sent.

use crate::engine::orchestrator;
use crate::error::{Error, Result};
use crate::session::{Provider, Session};
use declarative::{Applied, AttributeReader, AttributeSet, BoxedResource, Diagnostics, OperationContext, Resource};
use serde_json::{Map, Value};
use zabbix_api::ObjectKind;

pub const AUTHENTICATION: &str = "authentication_settings";
pub const HOUSEKEEPING: &str = "housekeeping_settings";

/// Whether deleting `kind` only forgets the local instance
pub fn is_singleton(kind: &str) -> bool {
    kind == AUTHENTICATION || kind == HOUSEKEEPING
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldType {
    Int,
    Str,
}

/// One settings field: declarative name, API name and value type
#[derive(Debug)]
struct Field {
    attr: &'static str,
    api: &'static str,
    kind: FieldType,
}

const fn int(attr: &'static str, api: &'static str) -> Field {
    Field {
        attr,
        api,
        kind: FieldType::Int,
    }
}

const fn text(attr: &'static str, api: &'static str) -> Field {
    Field {
        attr,
        api,
        kind: FieldType::Str,
    }
}

/// Table describing one settings singleton
#[derive(Debug)]
pub struct SettingsTable {
    name: &'static str,
    kind: ObjectKind,
    writable: &'static [Field],
    computed: &'static [Field],
}

static HOUSEKEEPING_TABLE: SettingsTable = SettingsTable {
    name: HOUSEKEEPING,
    kind: ObjectKind::HousekeepingSettings,
    writable: &[
        int("events_mode", "hk_events_mode"),
        text("events_trigger", "hk_events_trigger"),
        text("events_internal", "hk_events_internal"),
        text("events_discovery", "hk_events_discovery"),
        text("events_autoreg", "hk_events_autoreg"),
        int("services_mode", "hk_services_mode"),
        text("services", "hk_services"),
        int("audit_mode", "hk_audit_mode"),
        text("audit", "hk_audit"),
        int("sessions_mode", "hk_sessions_mode"),
        text("sessions", "hk_sessions"),
        int("history_mode", "hk_history_mode"),
        int("history_global", "hk_history_global"),
        text("history", "hk_history"),
        int("trends_mode", "hk_trends_mode"),
        int("trends_global", "hk_trends_global"),
        text("trends", "hk_trends"),
        int("compression_status", "compression_status"),
        text("compress_older", "compress_older"),
    ],
    computed: &[
        text("db_extension", "db_extension"),
        int("compression_availability", "compression_availability"),
    ],
};

static AUTHENTICATION_TABLE: SettingsTable = SettingsTable {
    name: AUTHENTICATION,
    kind: ObjectKind::AuthenticationSettings,
    writable: &[
        int("authentication_type", "authentication_type"),
        int("http_auth_enabled", "http_auth_enabled"),
        int("http_login_form", "http_login_form"),
        text("http_strip_domains", "http_strip_domains"),
        int("http_case_sensitive", "http_case_sensitive"),
        int("ldap_configured", "ldap_configured"),
        int("ldap_case_sensitive", "ldap_case_sensitive"),
        int("saml_auth_enabled", "saml_auth_enabled"),
        text("saml_idp_entityid", "saml_idp_entityid"),
        text("saml_sso_url", "saml_sso_url"),
        text("saml_slo_url", "saml_slo_url"),
        text("saml_username_attribute", "saml_username_attribute"),
        text("saml_sp_entityid", "saml_sp_entityid"),
        text("saml_nameid_format", "saml_nameid_format"),
        int("saml_sign_messages", "saml_sign_messages"),
        int("saml_sign_assertions", "saml_sign_assertions"),
        int("saml_sign_authn_requests", "saml_sign_authn_requests"),
        int("saml_sign_logout_requests", "saml_sign_logout_requests"),
        int("saml_sign_logout_responses", "saml_sign_logout_responses"),
        int("saml_encrypt_nameid", "saml_encrypt_nameid"),
        int("saml_encrypt_assertions", "saml_encrypt_assertions"),
        int("saml_case_sensitive", "saml_case_sensitive"),
        int("passwd_min_length", "passwd_min_length"),
        int("passwd_check_rules", "passwd_check_rules"),
    ],
    computed: &[],
};

impl SettingsTable {
    /// Fixed id recorded in state
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.name
    }

    /// Declared fields as an update request
    ///
    /// Integers are sent string-encoded like every other object.
    fn request(&self, desired: &AttributeSet) -> Result<Map<String, Value>> {
        let mut reader = AttributeReader::new(desired);
        let mut request = Map::new();
        for field in self.writable {
            let value = match field.kind {
                FieldType::Int => reader.opt_int(field.attr).map(|n| Value::String(n.to_string())),
                FieldType::Str => reader.opt_string(field.attr).map(Value::from),
            };
            if let Some(value) = value {
                request.insert(field.api.to_string(), value);
            }
        }
        for field in self.computed {
            if reader.has(field.attr) {
                reader.violation_at(field.attr, "read-only attribute");
            }
        }
        for name in desired.keys() {
            if !self.writable.iter().chain(self.computed).any(|f| f.attr == name.as_str()) {
                reader.violation_at(name, format!("unknown {} attribute", self.name));
            }
        }
        Ok(reader.finish(request)?)
    }

    /// Declarative state from a `<kind>.get` reply
    fn state(&self, remote: &Map<String, Value>) -> (AttributeSet, Diagnostics) {
        let mut state = AttributeSet::new();
        let mut diagnostics = Diagnostics::new();
        for field in self.writable.iter().chain(self.computed) {
            let Some(value) = remote.get(field.api) else {
                continue;
            };
            match (field.kind, value) {
                (FieldType::Str, Value::String(s)) => {
                    state.insert(field.attr, s.as_str());
                }
                (FieldType::Int, value) => {
                    if let Some(n) = diagnostics.record(field.attr, int_value(field.api, value)) {
                        state.insert(field.attr, n);
                    }
                }
                (FieldType::Str, other) => {
                    diagnostics.error(format!("{}: expected a string, got {other}", field.api));
                }
            }
        }
        (state, diagnostics)
    }
}

/// The API returns integers as strings
fn int_value(api: &str, value: &Value) -> std::result::Result<i64, String> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("{api}: expected an integer, got {value}"))
}

/// [`Resource`] over one settings singleton
pub struct SettingsResource {
    provider: Provider,
    table: &'static SettingsTable,
}

impl SettingsResource {
    fn read_once(&self, session: &Session<'_>) -> Result<Applied> {
        let remote = session.api()?.settings_get(self.table.kind)?;
        let (state, diagnostics) = self.table.state(&remote);
        log::debug!("Read {}: {} attributes", self.table.name, state.len());
        Ok(Applied {
            id: self.table.id().to_string(),
            state,
            diagnostics,
        })
    }

    fn write(&self, session: &Session<'_>, desired: &AttributeSet) -> Result<Applied> {
        let request = self.table.request(desired)?;
        let id = self.table.id();
        if request.is_empty() {
            log::debug!("No {} fields declared; nothing to send", self.table.name);
            return orchestrator::retry(session.ctx, session.retry(), || self.read_once(session));
        }
        orchestrator::update_then_read(
            session,
            id,
            || {
                session.api()?.settings_update(self.table.kind, &request)?;
                Ok(id.to_string())
            },
            |_| self.read_once(session),
        )
    }
}

impl Resource for SettingsResource {
    type Error = Error;

    fn resource_type(&self) -> &'static str {
        self.table.name
    }

    fn create(&self, ctx: &OperationContext, desired: &AttributeSet) -> Result<Applied> {
        let session = self.provider.session(ctx);
        let mut applied = self.write(&session, desired)?;
        applied.diagnostics.warning(format!(
            "{} always exist; the existing settings were adopted",
            self.table.name
        ));
        Ok(applied)
    }

    fn read(&self, ctx: &OperationContext, _id: &str, _prior: &AttributeSet) -> Result<Applied> {
        let session = self.provider.session(ctx);
        orchestrator::retry(ctx, session.retry(), || self.read_once(&session))
    }

    fn update(&self, ctx: &OperationContext, _id: &str, desired: &AttributeSet, _prior: &AttributeSet) -> Result<Applied> {
        let session = self.provider.session(ctx);
        self.write(&session, desired)
    }

    fn delete(&self, _ctx: &OperationContext, _id: &str, _prior: &AttributeSet) -> Result<Diagnostics> {
        let mut diagnostics = Diagnostics::new();
        diagnostics.warning(format!(
            "{} cannot be deleted; removed from state only",
            self.table.name
        ));
        Ok(diagnostics)
    }
}

pub fn authentication(provider: &Provider) -> BoxedResource<Error> {
    Box::new(SettingsResource {
        provider: provider.clone(),
        table: &AUTHENTICATION_TABLE,
    })
}

pub fn housekeeping(provider: &Provider) -> BoxedResource<Error> {
    Box::new(SettingsResource {
        provider: provider.clone(),
        table: &HOUSEKEEPING_TABLE,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::testing::with_resource;
    use declarative::AttributeValue;
    use serde_json::json;
    use std::sync::Arc;
    use zabbix_api::mock::ScriptedTransport;

    fn housekeeping_reply() -> Value {
        json!({
            "hk_events_mode": "1", "hk_events_trigger": "365d", "hk_history_mode": "1",
            "hk_history_global": "0", "hk_history": "90d", "compress_older": "7d",
            "db_extension": "timescaledb", "compression_availability": "1",
            "hk_unknown_future_field": "x"
        })
    }

    #[test]
    fn test_create_adopts_and_sends_declared_fields() {
        let transport = Arc::new(ScriptedTransport::with_handler(|method, _| match method {
            "housekeeping.update" => Ok(json!(["hk_history"])),
            "housekeeping.get" => Ok(housekeeping_reply()),
            other => panic!("unexpected call {other}"),
        }));
        let desired = AttributeSet::new().with("history", "90d").with("history_mode", 1);

        let applied = with_resource(HOUSEKEEPING, &transport, |r, ctx| r.create(ctx, &desired)).unwrap();

        let update = &transport.calls()[0];
        assert_eq!(update.params, json!({"hk_history": "90d", "hk_history_mode": "1"}));
        assert_eq!(applied.id, HOUSEKEEPING);
        assert_eq!(applied.state.get("history_mode"), Some(&AttributeValue::Int(1)));
        assert_eq!(applied.state.get_str("db_extension"), Some("timescaledb"));
        assert!(!applied.state.has("hk_unknown_future_field"));
        assert_eq!(applied.diagnostics.warnings().count(), 1);
    }

    #[test]
    fn test_integers_are_sent_as_strings() {
        let desired = AttributeSet::new()
            .with("passwd_min_length", 12)
            .with("saml_auth_enabled", 0)
            .with("saml_sso_url", "https://idp.example.com/sso");
        let request = AUTHENTICATION_TABLE.request(&desired).unwrap();
        assert_eq!(
            Value::Object(request),
            json!({
                "passwd_min_length": "12",
                "saml_auth_enabled": "0",
                "saml_sso_url": "https://idp.example.com/sso"
            })
        );
    }

    #[test]
    fn test_computed_fields_are_rejected() {
        let desired = AttributeSet::new().with("db_extension", "timescaledb").with("colour", "red");
        let err = HOUSEKEEPING_TABLE.request(&desired).unwrap_err();
        let Error::InvalidConfiguration(invalid) = err else {
            panic!("expected invalid configuration");
        };
        let paths: Vec<&str> = invalid.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["db_extension", "colour"]);
    }

    #[test]
    fn test_bad_integer_is_field_error() {
        let remote = json!({"passwd_min_length": "eight", "saml_sso_url": "https://idp.example.com/sso"});
        let Value::Object(remote) = remote else { unreachable!() };
        let (state, diagnostics) = AUTHENTICATION_TABLE.state(&remote);
        assert_eq!(diagnostics.error_count(), 1);
        assert!(!state.has("passwd_min_length"));
        assert_eq!(state.get_str("saml_sso_url"), Some("https://idp.example.com/sso"));
    }

    #[test]
    fn test_delete_only_warns() {
        let transport = Arc::new(ScriptedTransport::default());
        let diagnostics = with_resource(AUTHENTICATION, &transport, |r, ctx| {
            r.delete(ctx, AUTHENTICATION, &AttributeSet::new())
        })
        .unwrap();
        assert_eq!(diagnostics.warnings().count(), 1);
        assert!(transport.calls().is_empty());
    }
}
