//! Trigger expression compilation
//!
//! The API stores trigger expressions with opaque function references:
//! `{13457}>5`. Reading a trigger rewrites each reference into the
//! readable `{host:key.function(parameter)}` form.

use crate::error::{Error, Result};
use crate::session::Session;
use rayon::prelude::*;
use regex::Regex;
use serde::Deserialize;
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;
use zabbix_api::ObjectKind;
use zabbix_api::objects::host::HostRef;
use zabbix_api::objects::trigger::TriggerFunction;

static FUNCTION_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{(\d+)\}").expect("valid regex"));

#[derive(Debug, PartialEq, Eq)]
enum Segment<'a> {
    Literal(&'a str),
    Function(&'a str),
}

fn tokenize(expression: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in FUNCTION_REF.captures_iter(expression) {
        let (Some(whole), Some(id)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Literal(&expression[last..whole.start()]));
        }
        segments.push(Segment::Function(id.as_str()));
        last = whole.end();
    }
    if last < expression.len() {
        segments.push(Segment::Literal(&expression[last..]));
    }
    segments
}

#[derive(Deserialize)]
struct OwnedItem {
    #[serde(rename = "key_")]
    key: String,
    #[serde(default)]
    hosts: Vec<HostRef>,
}

/// Host name and key of one item
#[derive(Debug, Clone, PartialEq, Eq)]
struct ItemOwner {
    host: String,
    key: String,
}

fn lookup_item(session: &Session<'_>, item_id: &str) -> Result<ItemOwner> {
    let items: Vec<OwnedItem> = session.api()?.get(
        ObjectKind::Item,
        json!({
            "output": ["itemid", "key_"],
            "itemids": [item_id],
            "selectHosts": ["hostid", "host"],
        }),
    )?;

    let reference = format!("item {item_id}");
    let [item] = items.as_slice() else {
        return Err(Error::ReferenceNotFound {
            reference,
            reason: format!("expected one item, got {}", items.len()),
        });
    };
    let [host] = item.hosts.as_slice() else {
        return Err(Error::ReferenceNotFound {
            reference,
            reason: format!("expected one owning host, got {}", item.hosts.len()),
        });
    };

    Ok(ItemOwner {
        host: host.host.clone(),
        key: item.key.clone(),
    })
}

/// Rewrite every `{functionid}` in `expression` into readable form
///
/// Items are looked up in parallel, once per distinct item. The output is
/// assembled from the original segments, so a substituted text is never
/// scanned again. A reference with no matching function, or whose item does
/// not resolve to exactly one host, fails the whole compilation.
pub fn compile_expression(
    session: &Session<'_>,
    expression: &str,
    functions: &[TriggerFunction],
) -> Result<String> {
    let segments = tokenize(expression);
    let by_id: HashMap<&str, &TriggerFunction> = functions.iter().map(|f| (f.id.as_str(), f)).collect();

    let mut item_ids = BTreeSet::new();
    for segment in &segments {
        if let Segment::Function(id) = segment {
            let function = by_id.get(id).ok_or_else(|| Error::ReferenceNotFound {
                reference: format!("{{{id}}}"),
                reason: "no such function on this trigger".to_string(),
            })?;
            item_ids.insert(function.item_id.as_str());
        }
    }

    let ids: Vec<&str> = item_ids.into_iter().collect();
    let lookups: Vec<(&str, Result<ItemOwner>)> = ids
        .par_iter()
        .map(|id| (*id, lookup_item(session, id)))
        .collect();

    let mut owners = HashMap::with_capacity(lookups.len());
    for (id, owner) in lookups {
        owners.insert(id, owner?);
    }

    let mut out = String::with_capacity(expression.len() * 2);
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Function(id) => {
                if let Some(function) = by_id.get(id)
                    && let Some(owner) = owners.get(function.item_id.as_str())
                {
                    out.push_str(&format!(
                        "{{{}:{}.{}({})}}",
                        owner.host, owner.key, function.function, function.parameter
                    ));
                }
            }
        }
    }

    log::debug!("Compiled trigger expression {expression} -> {out}");
    Ok(out)
}
