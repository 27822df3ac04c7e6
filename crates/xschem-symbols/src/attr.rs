//! The attribute-string engine.
//!
//! Every instance, symbol, and geometry item carries its extra data as a
//! single flat string of whitespace-separated `key=value` tokens (e.g.
//! `name=R1 value=10k footprint=0805`), rather than a structured map. This
//! mirrors how the original tool keeps attributes: cheap to serialize
//! verbatim, trivial to diff, and tolerant of keys nobody has told the
//! engine about yet. Values containing whitespace are double-quoted.

/// Controls whether `get` returns a token's value with surrounding quotes
/// stripped (the common case) or exactly as it appears in the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GetMode {
    Unquoted,
    Raw,
}

/// Splits an attribute string into `(key, value)` token slices, honoring
/// double-quoted values that may themselves contain whitespace.
fn tokenize(attr: &str) -> Vec<(&str, &str)> {
    let mut tokens = Vec::new();
    let bytes = attr.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }
        let start = i;
        while i < bytes.len() && bytes[i] != b'=' && !bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let key = &attr[start..i];
        if i >= bytes.len() || bytes[i] != b'=' {
            // Bare token with no '=': skip it, it carries no key/value pair.
            continue;
        }
        i += 1; // consume '='
        let value_start = i;
        if i < bytes.len() && bytes[i] == b'"' {
            i += 1;
            while i < bytes.len() && bytes[i] != b'"' {
                i += 1;
            }
            let value_end = (i + 1).min(bytes.len());
            if i < bytes.len() {
                i += 1; // consume closing quote
            }
            tokens.push((key, &attr[value_start..value_end]));
        } else {
            let raw_start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() {
                i += 1;
            }
            tokens.push((key, &attr[raw_start..i]));
        }
        let _ = start;
    }
    tokens
}

fn unquote(raw: &str) -> &str {
    if raw.len() >= 2 && raw.starts_with('"') && raw.ends_with('"') {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}

fn needs_quoting(value: &str) -> bool {
    value.is_empty() || value.chars().any(|c| c.is_whitespace() || c == '=')
}

fn quote_if_needed(value: &str) -> String {
    if needs_quoting(value) {
        format!("\"{value}\"")
    } else {
        value.to_string()
    }
}

/// Looks up `key` in `attr`, returning its value under `mode`.
pub fn get<'a>(attr: &'a str, key: &str, mode: GetMode) -> Option<&'a str> {
    tokenize(attr).into_iter().find(|(k, _)| *k == key).map(|(_, v)| match mode {
        GetMode::Unquoted => unquote(v),
        GetMode::Raw => v,
    })
}

/// Updates `key` in place if present, otherwise appends a new `key=value`
/// token. Returns the rewritten string.
pub fn set(attr: &str, key: &str, value: &str) -> String {
    let tokens = tokenize(attr);
    let quoted = quote_if_needed(value);
    if tokens.iter().any(|(k, _)| *k == key) {
        let mut out = String::new();
        for (k, v) in tokens {
            if !out.is_empty() {
                out.push(' ');
            }
            if k == key {
                out.push_str(key);
                out.push('=');
                out.push_str(&quoted);
            } else {
                out.push_str(k);
                out.push('=');
                out.push_str(v);
            }
        }
        out
    } else {
        let mut out = attr.trim_end().to_string();
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(key);
        out.push('=');
        out.push_str(&quoted);
        out
    }
}

/// Update-or-append, same rule as [`set`]. Kept as a distinct name because
/// callers substituting a computed value (as opposed to setting one the
/// user typed) read more clearly this way.
pub fn subst(attr: &str, key: &str, value: &str) -> String {
    set(attr, key, value)
}

/// Replaces every literal occurrence of `needle` in `haystack` with
/// `replacement`. When `escape` is set and `replacement` contains
/// whitespace or `=`, it is wrapped in quotes first so a substitution
/// performed inside a token's value does not split it into two tokens.
/// Used for template placeholders such as `@symname` inside a symbol's
/// `template` attribute.
pub fn str_replace(haystack: &str, needle: &str, replacement: &str, escape: bool) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let replacement = if escape && needs_quoting(replacement) {
        quote_if_needed(replacement)
    } else {
        replacement.to_string()
    };
    haystack.replace(needle, &replacement)
}

/// Rect flag bits, derived from the attribute string by scanning for a
/// handful of recognized substrings, most specific first: `"unscaled"`
/// implies an embedded, unscaled image; otherwise `"image"` alone implies
/// a scaled embedded image; otherwise `"unlocked"` marks an unlocked
/// graph rect; otherwise `"graph"` marks an ordinary graph rect.
pub fn derive_rect_flags(attr: &str) -> u16 {
    use xschem_geom::item::rect_flags::*;
    if attr.contains("unscaled") {
        EMBEDDED_IMAGE | IMAGE_UNSCALED
    } else if attr.contains("image") {
        EMBEDDED_IMAGE
    } else if attr.contains("unlocked") {
        GRAPH | UNLOCKED_GRAPH
    } else if attr.contains("graph") {
        GRAPH
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_unquoted_value() {
        let attr = r#"name=R1 value="10 k""#;
        assert_eq!(get(attr, "name", GetMode::Unquoted), Some("R1"));
        assert_eq!(get(attr, "value", GetMode::Unquoted), Some("10 k"));
    }

    #[test]
    fn get_raw_preserves_quotes() {
        let attr = r#"value="10 k""#;
        assert_eq!(get(attr, "value", GetMode::Raw), Some("\"10 k\""));
    }

    #[test]
    fn missing_key_is_none() {
        assert_eq!(get("name=R1", "value", GetMode::Unquoted), None);
    }

    #[test]
    fn set_replaces_existing_token_in_place() {
        let out = set("name=R1 value=10k", "value", "20k");
        assert_eq!(out, "name=R1 value=20k");
    }

    #[test]
    fn set_appends_when_missing() {
        let out = set("name=R1", "footprint", "0805");
        assert_eq!(out, "name=R1 footprint=0805");
    }

    #[test]
    fn set_quotes_values_containing_spaces() {
        let out = set("", "note", "hello world");
        assert_eq!(out, r#"note="hello world""#);
    }

    #[test]
    fn str_replace_substitutes_template_placeholder() {
        let out = str_replace("name=@symname#1", "@symname", "opamp", true);
        assert_eq!(out, "name=opamp#1");
    }

    #[test]
    fn str_replace_quotes_replacement_with_spaces_when_escaping() {
        let out = str_replace("label=@symname", "@symname", "my part", true);
        assert_eq!(out, r#"label="my part""#);
    }

    #[test]
    fn rect_flags_precedence_unscaled_beats_image() {
        assert_eq!(
            derive_rect_flags("image=1 unscaled=1"),
            xschem_geom::item::rect_flags::EMBEDDED_IMAGE | xschem_geom::item::rect_flags::IMAGE_UNSCALED
        );
    }

    #[test]
    fn rect_flags_image_alone() {
        assert_eq!(derive_rect_flags("image=1"), xschem_geom::item::rect_flags::EMBEDDED_IMAGE);
    }

    #[test]
    fn rect_flags_unlocked_graph() {
        assert_eq!(
            derive_rect_flags("graph unlocked"),
            xschem_geom::item::rect_flags::GRAPH | xschem_geom::item::rect_flags::UNLOCKED_GRAPH
        );
    }

    #[test]
    fn rect_flags_plain_graph() {
        assert_eq!(derive_rect_flags("graph"), xschem_geom::item::rect_flags::GRAPH);
    }

    #[test]
    fn rect_flags_none_when_no_keyword_present() {
        assert_eq!(derive_rect_flags("name=R1"), 0);
    }
}
