//! Conversion from parsed YAML into the value model

use crate::value::Value;
use crate::{Error, Result};

/// Convert a parsed YAML value into a [`Value`] tree.
///
/// `serde_yaml` mappings iterate in document order, so the resulting
/// [`Value::Map`] entries preserve the declaration order of the source
/// file. YAML tags have no meaning in schema documents and are rejected.
pub fn from_yaml(yaml: &serde_yaml::Value) -> Result<Value> {
    convert(yaml, "document root")
}

fn convert(yaml: &serde_yaml::Value, context: &str) -> Result<Value> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => convert_number(n, context),
        serde_yaml::Value::String(s) => Ok(Value::Str(s.clone())),
        serde_yaml::Value::Sequence(items) => {
            let mut out = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                out.push(convert(item, &format!("{context}[{i}]"))?);
            }
            Ok(Value::Seq(out))
        }
        serde_yaml::Value::Mapping(mapping) => {
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = convert(key, context)?;
                let child_context = match key.as_str() {
                    Some(name) => format!("{context}.{name}"),
                    None => context.to_string(),
                };
                let value = convert(value, &child_context)?;
                entries.push((key, value));
            }
            Ok(Value::Map(entries))
        }
        serde_yaml::Value::Tagged(tagged) => Err(Error::unsupported(
            context,
            format!("tagged value {}", tagged.tag),
        )),
    }
}

fn convert_number(n: &serde_yaml::Number, context: &str) -> Result<Value> {
    if let Some(i) = n.as_i64() {
        return Ok(Value::Int(i));
    }
    if let Some(u) = n.as_u64() {
        // as_i64 already failed, so this only covers (i64::MAX, u64::MAX]
        return Ok(Value::UInt(u));
    }
    match n.as_f64() {
        Some(f) => Ok(Value::Float(f)),
        None => Err(Error::unsupported(context, n.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Value {
        let yaml: serde_yaml::Value = serde_yaml::from_str(input).unwrap();
        from_yaml(&yaml).unwrap()
    }

    #[test]
    fn scalars_convert() {
        assert_eq!(parse("42"), Value::Int(42));
        assert_eq!(parse("-7"), Value::Int(-7));
        assert_eq!(parse("2.5"), Value::Float(2.5));
        assert_eq!(parse("true"), Value::Bool(true));
        assert_eq!(parse("hello"), Value::Str("hello".into()));
        assert_eq!(parse("~"), Value::Null);
    }

    #[test]
    fn mapping_preserves_declaration_order() {
        let value = parse("z: 1\na: 2\nm: 3");
        let entries = value.as_map().unwrap();
        let keys: Vec<_> = entries
            .iter()
            .map(|(k, _)| k.as_str().unwrap().to_string())
            .collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn nested_sequences_convert() {
        let value = parse("- a: 1\n- b:\n    - c: 2");
        let items = value.as_seq().unwrap();
        assert_eq!(items.len(), 2);
        assert!(items[0].as_map().is_some());
    }

    #[test]
    fn integers_beyond_i64_widen_to_unsigned() {
        assert_eq!(parse("18446744073709551615"), Value::UInt(u64::MAX));
        assert_eq!(parse("9223372036854775807"), Value::Int(i64::MAX));
    }
}
