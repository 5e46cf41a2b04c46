//! Flattening of the field tree into an ordered key namespace

use crate::model::{KEY_SEPARATOR, SchemaKind, TYPE_WORDS, normalize_key};
use crate::{Error, Result};
use codec_ir::Value;
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// The flattened key namespace of one schema document.
///
/// `key_list` preserves first-seen (declaration) order; `key_map` carries
/// the raw value attached to each field node for downstream code emission.
#[derive(Debug, Clone, Default)]
pub struct FlattenedSchema {
    /// Fully-qualified keys in declaration order
    pub key_list: Vec<String>,

    /// Key to raw field value
    pub key_map: HashMap<String, Value>,
}

/// Flatten a schema's field declarations into the key namespace.
///
/// Traversal is depth-first in declaration order. Every non-modifier
/// field node contributes one entry, group nodes included; modifier
/// keywords annotate the enclosing field and contribute nothing.
pub fn flatten(fields: &[Value], kind: SchemaKind) -> Result<FlattenedSchema> {
    let mut out = FlattenedSchema::default();
    let mut seen = HashSet::new();
    walk(fields, "", kind, &mut out, &mut seen)?;
    trace!(%kind, key_count = out.key_list.len(), "flattened schema fields");
    Ok(out)
}

fn walk(
    items: &[Value],
    prefix: &str,
    kind: SchemaKind,
    out: &mut FlattenedSchema,
    seen: &mut HashSet<String>,
) -> Result<()> {
    for item in items {
        let (key, value) = singleton_entry(item)?;

        if key.starts_with('$') {
            check_modifier(key, value, kind)?;
            continue;
        }

        let full_key = format!("{prefix}{}", normalize_key(key));
        if !seen.insert(full_key.clone()) {
            return Err(Error::DuplicateKey { key: full_key });
        }
        out.key_list.push(full_key.clone());
        out.key_map.insert(full_key.clone(), value.clone());

        if let Value::Seq(children) = value {
            let child_prefix = format!("{full_key}{KEY_SEPARATOR}");
            walk(children, &child_prefix, kind, out, seen)?;
        }
    }
    Ok(())
}

/// Require a field node to be a mapping with exactly one entry and a
/// string key.
fn singleton_entry(item: &Value) -> Result<(&str, &Value)> {
    let entries = item.as_map().ok_or_else(|| Error::InvalidFieldNode {
        found: item.kind_name().to_string(),
    })?;
    match entries {
        [(Value::Str(key), value)] => Ok((key, value)),
        [(key, _)] => Err(Error::InvalidFieldNode {
            found: format!("non-string key of type {}", key.kind_name()),
        }),
        _ => Err(Error::InvalidFieldNode {
            found: format!("mapping with {} entries", entries.len()),
        }),
    }
}

fn check_modifier(keyword: &str, value: &Value, kind: SchemaKind) -> Result<()> {
    if !kind.keywords().contains(&keyword) {
        return Err(Error::UnknownModifier {
            keyword: keyword.to_string(),
            kind,
        });
    }
    if keyword == "$type" {
        // only the four exact string literals are acceptable
        match value.as_str() {
            Some(tag) if TYPE_WORDS.contains(&tag) => {}
            Some(tag) => {
                return Err(Error::InvalidTypeTag {
                    found: tag.to_string(),
                });
            }
            None => {
                return Err(Error::InvalidTypeTag {
                    found: value.kind_name().to_string(),
                });
            }
        }
    }
    Ok(())
}
