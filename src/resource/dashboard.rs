//! Dashboards

use super::{ObjectMapping, Write};
use crate::codec::{self, dashboard};
use crate::enums::UnknownTokenPolicy;
use crate::session::Session;
use declarative::{AttributeReader, StateWriter};
use serde_json::{Value, json};
use zabbix_api::ObjectKind;
use zabbix_api::objects::dashboard::Dashboard;

/// Seconds each page is shown in slideshow mode
const DEFAULT_DISPLAY_PERIOD: i64 = 30;

pub struct DashboardMapping;

impl ObjectMapping for DashboardMapping {
    type Object = Dashboard;

    const NAME: &'static str = "dashboard";
    const KIND: ObjectKind = ObjectKind::Dashboard;

    fn select() -> Value {
        json!({ "selectPages": "extend" })
    }

    fn to_remote(reader: &mut AttributeReader<'_>, write: Write<'_>, _policy: UnknownTokenPolicy) -> Dashboard {
        Dashboard {
            id: write.id(),
            name: reader.string("name"),
            display_period: reader.int_or("display_period", DEFAULT_DISPLAY_PERIOD),
            auto_start: codec::flag(reader.bool_or("auto_start", true)),
            private: codec::flag(reader.bool_or("private", true)),
            pages: dashboard::pages_from(reader, "widgets"),
        }
    }

    fn to_declarative(_session: &Session<'_>, dashboard: &Dashboard, state: &mut StateWriter) {
        state.set("name", dashboard.name.as_str());
        state.set("display_period", dashboard.display_period);
        state.set("auto_start", codec::is_set(dashboard.auto_start));
        state.set("private", codec::is_set(dashboard.private));
        let widgets = dashboard::widgets_to(&dashboard.pages, "widgets", state.diagnostics_mut());
        state.set("widgets", widgets);
    }
}
