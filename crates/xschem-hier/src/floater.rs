//! The floater text cache (spec §4.12): a [`TextItem`] marked as a
//! floater has its visible string computed by substituting `@key`
//! placeholders with another instance's attribute values, resolved by
//! instance name and cached until the next document modification.

use ahash::AHashMap;
use xschem_state::{Sheet, TextItem};
use xschem_symbols::{GetMode, attr};

/// Accelerates floater-to-instance lookup by instance name. Freed and
/// rebuilt lazily on any modification, per spec §4.12 -- callers should
/// rebuild whenever `Sheet::set_modify(true)` has run since the last use.
#[derive(Debug, Default)]
pub struct InstanceNameIndex {
    by_name: AHashMap<String, usize>,
}

impl InstanceNameIndex {
    pub fn build(sheet: &Sheet) -> Self {
        let mut by_name = AHashMap::default();
        for (idx, inst) in sheet.instances.iter().enumerate() {
            if !inst.instance_name.is_empty() {
                by_name.insert(inst.instance_name.clone(), idx);
            }
        }
        Self { by_name }
    }

    pub fn find(&self, instance_name: &str) -> Option<usize> {
        self.by_name.get(instance_name).copied()
    }
}

/// Returns the floater's resolved string, computing and caching it first
/// if the cache is empty. Non-floater text items and floaters with no
/// resolvable source instance return `None` without touching the cache.
pub fn get_text_floater<'a>(text: &'a mut TextItem, sheet: &Sheet, index: &InstanceNameIndex) -> Option<&'a str> {
    if !text.is_floater() {
        return None;
    }
    if text.floater_cache.is_none() {
        let instname = text.floater_instname.as_deref()?;
        let source_idx = index.find(instname)?;
        let source = &sheet.instances[source_idx];
        text.floater_cache = Some(substitute_template(&text.text, &source.attr));
    }
    text.floater_cache.as_deref()
}

/// Replaces every `@key` placeholder in `template` with `key`'s value
/// from `instance_attr`, left verbatim when the key isn't set.
fn substitute_template(template: &str, instance_attr: &str) -> String {
    let chars: Vec<char> = template.chars().collect();
    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '@' {
            let start = i + 1;
            let mut j = start;
            while j < chars.len() && (chars[j].is_alphanumeric() || chars[j] == '_') {
                j += 1;
            }
            if j > start {
                let key: String = chars[start..j].iter().collect();
                match attr::get(instance_attr, &key, GetMode::Unquoted) {
                    Some(value) => out.push_str(value),
                    None => out.extend(&chars[i..j]),
                }
                i = j;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use xschem_geom::Point;
    use xschem_state::{Instance, TextFlags};

    fn floater(template: &str, instname: &str) -> TextItem {
        let mut t = TextItem::new(template, 0.0, 0.0, 2);
        t.flags.insert(TextFlags::FLOATER);
        t.floater_instname = Some(instname.to_string());
        t
    }

    #[test]
    fn resolves_and_caches_template_substitution() {
        let mut sheet = Sheet::new(8);
        let mut inst = Instance::new("r1", Point::origin());
        inst.instance_name = "R1".to_string();
        inst.attr = "name=R1 value=10k".to_string();
        sheet.instances.push(inst);
        let index = InstanceNameIndex::build(&sheet);

        let mut text = floater("R@name=@value", "R1");
        assert_eq!(get_text_floater(&mut text, &sheet, &index), Some("RR1=10k"));
        assert_eq!(text.floater_cache.as_deref(), Some("RR1=10k"));
    }

    #[test]
    fn non_floater_returns_none_and_leaves_cache_untouched() {
        let sheet = Sheet::new(8);
        let index = InstanceNameIndex::build(&sheet);
        let mut text = TextItem::new("plain", 0.0, 0.0, 2);
        assert_eq!(get_text_floater(&mut text, &sheet, &index), None);
        assert!(text.floater_cache.is_none());
    }

    #[test]
    fn unresolvable_source_instance_returns_none() {
        let sheet = Sheet::new(8);
        let index = InstanceNameIndex::build(&sheet);
        let mut text = floater("@name", "missing");
        assert_eq!(get_text_floater(&mut text, &sheet, &index), None);
    }

    #[test]
    fn unknown_placeholder_is_left_verbatim() {
        let mut sheet = Sheet::new(8);
        let mut inst = Instance::new("r1", Point::origin());
        inst.instance_name = "R1".to_string();
        inst.attr = "name=R1".to_string();
        sheet.instances.push(inst);
        let index = InstanceNameIndex::build(&sheet);
        let mut text = floater("@missing_key", "R1");
        assert_eq!(get_text_floater(&mut text, &sheet, &index), Some("@missing_key"));
    }
}
