//! Triggers
//!
//! Expressions are written in the readable `{host:key.function(param)}`
//! form and sent as-is. The API returns them with function ids, so every
//! read compiles them back through [`compile_expression`].

use super::{ObjectMapping, Write};
use crate::codec::{self, read_token};
use crate::enums::{TRIGGER_MANUAL_CLOSE, TRIGGER_RECOVERY_MODE, TRIGGER_SEVERITY, UnknownTokenPolicy};
use crate::expression::compile_expression;
use crate::session::Session;
use declarative::{AttributeReader, StateWriter, has_change};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::trigger::Trigger;

pub struct TriggerMapping;

impl ObjectMapping for TriggerMapping {
    type Object = Trigger;

    const NAME: &'static str = "trigger";
    const KIND: ObjectKind = ObjectKind::Trigger;

    fn select() -> Value {
        json!({
            "selectDependencies": ["triggerid"],
            "selectFunctions": "extend",
            "expandExpression": false,
        })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, policy: UnknownTokenPolicy) -> Trigger {
        // An update that leaves dependencies alone must not send them; the
        // API replaces the whole list otherwise.
        let dependencies = match write {
            Write::Update { prior, .. } if !has_change(prior, reader.attributes(), "dependencies") => None,
            _ => Some(codec::dependencies_from(reader, "dependencies")),
        };

        Trigger {
            id: write.id(),
            description: reader.string("description"),
            expression: reader.string("expression"),
            event_name: reader.string_or("event_name", ""),
            uuid: reader.string_or("uuid", ""),
            recovery_mode: read_token(reader, "recovery_mode", "default", &TRIGGER_RECOVERY_MODE, policy),
            recovery_expression: reader.string_or("recovery_expression", ""),
            manual_close: read_token(reader, "manual_close", "no", &TRIGGER_MANUAL_CLOSE, policy),
            comments: reader.string_or("comments", ""),
            priority: read_token(reader, "priority", "not_classified", &TRIGGER_SEVERITY, policy),
            status: reader.int_or("status", 0),
            dependencies,
            functions: Vec::new(),
            hosts: Vec::new(),
        }
    }

    fn to_declarative(session: &Session<'_>, trigger: &Trigger, state: &mut StateWriter) {
        state.set("description", trigger.description.as_str());
        state.set("event_name", trigger.event_name.as_str());
        state.set("uuid", trigger.uuid.as_str());
        state.set("comments", trigger.comments.as_str());
        state.set("status", trigger.status);
        state.set(
            "dependencies",
            codec::dependencies_to(trigger.dependencies.as_deref().unwrap_or_default()),
        );

        state.try_set(
            "expression",
            compile_expression(session, &trigger.expression, &trigger.functions),
        );
        if trigger.recovery_expression.is_empty() {
            state.set("recovery_expression", "");
        } else {
            state.try_set(
                "recovery_expression",
                compile_expression(session, &trigger.recovery_expression, &trigger.functions),
            );
        }

        state.try_set("priority", TRIGGER_SEVERITY.decode(trigger.priority));
        state.try_set("recovery_mode", TRIGGER_RECOVERY_MODE.decode(trigger.recovery_mode));
        state.try_set("manual_close", TRIGGER_MANUAL_CLOSE.decode(trigger.manual_close));
    }
}
