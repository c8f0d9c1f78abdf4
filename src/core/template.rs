use crate::domain::model::Substitutions;
use regex::Regex;
use std::sync::OnceLock;

pub const KEY_NAME: &str = "NAME";
pub const KEY_CARDS: &str = "CARDS";
pub const KEY_GENERATED_AT: &str = "GENERATED_AT";

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%b %d %Y, %I:%M %p";

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Replaces every `{{KEY}}` whose key is in `mapping`, scanning left to right.
/// Substituted text is never scanned again; unknown placeholders stay as-is.
pub fn fill(template: &str, mapping: &Substitutions) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        output.push_str(&rest[..start]);
        let candidate = &rest[start..];

        let value = candidate[OPEN.len()..]
            .find(CLOSE)
            .and_then(|end| {
                let key = &candidate[OPEN.len()..OPEN.len() + end];
                mapping.get(key).map(|value| (value, OPEN.len() + end + CLOSE.len()))
            });

        match value {
            Some((value, consumed)) => {
                output.push_str(value);
                rest = &candidate[consumed..];
            }
            None => {
                // 只吐出一個 '{'，讓 "{{{KEY}}" 仍能對到後面的佔位符
                output.push('{');
                rest = &candidate[1..];
            }
        }
    }

    output.push_str(rest);
    output
}

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{([A-Za-z0-9_]+)\}\}").expect("valid placeholder regex"))
}

/// Placeholder keys still present in `text`, in order of first appearance.
pub fn unresolved_placeholders(text: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for caps in placeholder_pattern().captures_iter(text) {
        let key = &caps[1];
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }
    keys
}
