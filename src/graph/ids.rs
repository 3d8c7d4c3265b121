//! Identifier, label and coordinate helpers used by the element builder.

use serde_json::Value;

use crate::normalize::ToolShedRepository;

/// Namespace of the main Galaxy toolshed, dropped from tool ids for display.
pub const MAIN_TOOLSHED_PREFIX: &str = "toolshed.g2.bx.psu.edu/repos/";

pub const EDGE_ID_SEPARATOR: &str = "__to__";

/// Prefix of labels synthesized from a tool id.
pub const TOOL_LABEL_PREFIX: &str = "tool:";

/// True when the label is just the step's order index rendered as text.
pub fn is_order_index_label(label: &str) -> bool {
    label.parse::<i32>().is_ok()
}

pub fn strip_toolshed_prefix(tool_id: &str) -> &str {
    tool_id.strip_prefix(MAIN_TOOLSHED_PREFIX).unwrap_or(tool_id)
}

pub fn edge_id(source: &str, target: &str) -> String {
    format!("{}{}{}", source, EDGE_ID_SEPARATOR, target)
}

/// Integer value of a JSON number, flooring fractional values.
/// Returns `None` for non-numbers and values outside the `i64` range.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(i) = number.as_i64() {
        return Some(i);
    }
    let f = number.as_f64()?.floor();
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

pub fn repo_link(repo: &ToolShedRepository) -> String {
    format!(
        "https://{}/view/{}/{}/{}",
        repo.tool_shed, repo.owner, repo.name, repo.changeset_revision
    )
}

/// The declared label, unless it is missing or an order index and a tool id
/// is available, in which case `tool:<tool id without toolshed prefix>`.
pub fn display_label(label: Option<&str>, tool_id: Option<&str>) -> Option<String> {
    let meaningful = label.filter(|l| !is_order_index_label(l));
    match (meaningful, tool_id) {
        (None, Some(tool_id)) => Some(format!(
            "{}{}",
            TOOL_LABEL_PREFIX,
            strip_toolshed_prefix(tool_id)
        )),
        _ => label.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn order_index_labels() {
        assert!(is_order_index_label("3"));
        assert!(is_order_index_label("-12"));
        assert!(!is_order_index_label("step-3"));
        assert!(!is_order_index_label("3.0"));
        assert!(!is_order_index_label(""));
    }

    #[test]
    fn toolshed_prefix_stripped() {
        assert_eq!(
            strip_toolshed_prefix("toolshed.g2.bx.psu.edu/repos/owner/repo/tool"),
            "owner/repo/tool"
        );
        assert_eq!(strip_toolshed_prefix("cat1"), "cat1");
        assert_eq!(
            strip_toolshed_prefix("testtoolshed.g2.bx.psu.edu/repos/owner/repo/tool"),
            "testtoolshed.g2.bx.psu.edu/repos/owner/repo/tool"
        );
    }

    #[test]
    fn edge_ids() {
        assert_eq!(edge_id("1", "2"), "1__to__2");
        assert_eq!(edge_id("UniqueBeginKey", "0"), "UniqueBeginKey__to__0");
    }

    #[test]
    fn integer_coercion_floors() {
        assert_eq!(coerce_integer(&json!(10.7)), Some(10));
        assert_eq!(coerce_integer(&json!(-3.2)), Some(-4));
        assert_eq!(coerce_integer(&json!(42)), Some(42));
        assert_eq!(coerce_integer(&json!(-7)), Some(-7));
        assert_eq!(coerce_integer(&json!(u64::MAX)), None);
        assert_eq!(coerce_integer(&json!("10")), None);
        assert_eq!(coerce_integer(&Value::Null), None);
    }

    #[test]
    fn repo_link_format() {
        let repo = ToolShedRepository {
            tool_shed: "toolshed.example.org".into(),
            owner: "a".into(),
            name: "b".into(),
            changeset_revision: "c1".into(),
        };
        assert_eq!(repo_link(&repo), "https://toolshed.example.org/view/a/b/c1");
    }

    #[test]
    fn label_fallback() {
        let ts = Some("toolshed.g2.bx.psu.edu/repos/devteam/fastqc/fastqc/0.72");
        assert_eq!(display_label(None, ts).as_deref(), Some("tool:devteam/fastqc/fastqc/0.72"));
        assert_eq!(display_label(Some("2"), Some("cat1")).as_deref(), Some("tool:cat1"));
        assert_eq!(display_label(Some("QC"), ts).as_deref(), Some("QC"));
        assert_eq!(display_label(Some("2"), None).as_deref(), Some("2"));
        assert_eq!(display_label(None, None), None);
    }
}
