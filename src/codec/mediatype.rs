//! Script and webhook parameters

use declarative::{AttributeReader, AttributeSet, AttributeValue};
use zabbix_api::objects::mediatype::MediaParameter;

/// Script parameters, one per line with a trailing newline
///
/// Every entry must be a non-empty single line.
pub fn script_params_from(reader: &mut AttributeReader<'_>, name: &str) -> String {
    let params = reader.strings(name);
    for (i, param) in params.iter().enumerate() {
        if param.is_empty() {
            reader.violation_at(&format!("{name}[{i}]"), "script parameter must not be empty");
        } else if param.contains('\n') {
            reader.violation_at(&format!("{name}[{i}]"), "script parameter must be a single line");
        }
    }
    let mut joined = params.join("\n");
    joined.push('\n');
    joined
}

/// Split script parameters back, dropping empty lines
pub fn script_params_to(joined: &str) -> AttributeValue {
    AttributeValue::list(joined.split('\n').filter(|p| !p.is_empty()))
}

pub fn webhook_params_from(reader: &mut AttributeReader<'_>, name: &str) -> Vec<MediaParameter> {
    reader.each(name, |r| {
        Some(MediaParameter {
            name: r.string("name"),
            value: r.string_or("value", ""),
        })
    })
}

pub fn webhook_params_to(params: &[MediaParameter]) -> AttributeValue {
    AttributeValue::list(params.iter().map(|p| {
        AttributeSet::new()
            .with("name", p.name.as_str())
            .with("value", p.value.as_str())
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_params_newline_join() {
        let attrs = AttributeSet::new().with("exec_parameters", AttributeValue::list(["{ALERT.SENDTO}", "{ALERT.SUBJECT}"]));
        let mut reader = AttributeReader::new(&attrs);
        let joined = script_params_from(&mut reader, "exec_parameters");
        assert_eq!(joined, "{ALERT.SENDTO}\n{ALERT.SUBJECT}\n");
        assert_eq!(script_params_to(&joined), *attrs.get("exec_parameters").unwrap());
    }

    #[test]
    fn test_script_params_drop_empty_lines() {
        assert_eq!(script_params_to("a\n\nb\n"), AttributeValue::list(["a", "b"]));
        assert_eq!(script_params_to(""), AttributeValue::List(Vec::new()));
    }

    #[test]
    fn test_empty_script_param_is_rejected() {
        let attrs = AttributeSet::new().with("exec_parameters", AttributeValue::list(["a", "", "b", "c\nd"]));
        let mut reader = AttributeReader::new(&attrs);
        script_params_from(&mut reader, "exec_parameters");
        let paths: Vec<&str> = reader.violations().iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["exec_parameters[1]", "exec_parameters[3]"]);
    }

    #[test]
    fn test_webhook_params_round_trip() {
        let declared = AttributeSet::new().with(
            "parameter",
            AttributeValue::list([
                AttributeSet::new().with("name", "URL").with("value", "https://hooks.example.com"),
                AttributeSet::new().with("name", "To").with("value", "{ALERT.SENDTO}"),
                AttributeSet::new().with("name", "Token").with("value", ""),
            ]),
        );
        let mut reader = AttributeReader::new(&declared);
        let params = webhook_params_from(&mut reader, "parameter");
        let params = reader.finish(params).unwrap();

        let back = AttributeSet::new().with("parameter", webhook_params_to(&params));
        assert!(back.equivalent(&declared), "{back:?}");
    }

    #[test]
    fn test_webhook_parameter_name_required() {
        let attrs = AttributeSet::new().with(
            "parameter",
            AttributeValue::list([
                AttributeSet::new().with("name", "URL").with("value", "https://hooks.example.com"),
                AttributeSet::new().with("value", "orphan"),
            ]),
        );
        let mut reader = AttributeReader::new(&attrs);
        let params = webhook_params_from(&mut reader, "parameter");
        assert_eq!(params.len(), 2);
        assert_eq!(reader.violations()[0].path, "parameter[1].name");
        assert_eq!(webhook_params_to(&params[..1]), AttributeValue::list([attrs.get("parameter").unwrap().elements().unwrap()[0].clone()]));
    }
}
