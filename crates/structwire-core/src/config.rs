//! JSON schema file loading.
//!
//! The file format keeps primitives and structures in two ordered sections
//! next to the byte order configuration:
//!
//! ```json
//! {
//!   "sizeof":  { "uint8_t": {"size": 1}, "uint32_t": {"size": 4} },
//!   "structs": { "Point": { "comment": "2D point",
//!                           "x": {"type": "uint32_t"},
//!                           "y": {"type": "uint8_t", "len": 2} } },
//!   "endianness": { "host": "little", "network": "big" }
//! }
//! ```
//!
//! Inside a struct object the key `"comment"` holds the struct's doc
//! string; every other key is a member. A key repeated within one object
//! is reported as a duplicate rather than merged.

use std::fmt;
use std::marker::PhantomData;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::endian::EndiannessConfig;
use crate::error::{Result, SchemaError};
use crate::schema::{Aggregate, Member, Schema};

/// Reserved struct key holding the struct-level doc comment.
const COMMENT_KEY: &str = "comment";

/// A loaded and shape-checked schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub schema: Schema,
    pub endianness: EndiannessConfig,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    sizeof: Entries<RawPrimitive>,
    #[serde(default)]
    structs: Entries<Entries<serde_json::Value>>,
    #[serde(default, alias = "endiannes")]
    endianness: Option<EndiannessConfig>,
}

#[derive(Debug, Deserialize)]
struct RawPrimitive {
    size: u64,
}

#[derive(Debug, Deserialize)]
struct RawMember {
    #[serde(rename = "type")]
    type_name: String,
    #[serde(default = "default_len")]
    len: u64,
    #[serde(default)]
    comment: Option<String>,
}

fn default_len() -> u64 {
    1
}

/// A JSON object read as its key/value sequence, repeated keys included.
#[derive(Debug)]
struct Entries<V>(Vec<(String, V)>);

impl<V> Default for Entries<V> {
    fn default() -> Self {
        Entries(Vec::new())
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for Entries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = Entries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut map: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(Entries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl Config {
    /// Read and validate a schema file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&content)?;
        tracing::debug!(
            path = %path.display(),
            types = config.schema.len(),
            endianness = %config.endianness,
            "loaded schema"
        );
        Ok(config)
    }

    /// Parse and validate a schema from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawConfig = serde_json::from_str(json)?;
        let endianness = raw.endianness.ok_or(SchemaError::MissingEndianness)?;

        let mut schema = Schema::new();
        for (name, prim) in raw.sizeof.0 {
            schema.add_primitive(name, prim.size)?;
        }
        for (name, body) in raw.structs.0 {
            let aggregate = parse_aggregate(&name, body)?;
            schema.add_aggregate(name, aggregate)?;
        }

        Ok(Config { schema, endianness })
    }
}

fn parse_aggregate(name: &str, body: Entries<serde_json::Value>) -> Result<Aggregate> {
    let mut aggregate = Aggregate::default();
    let mut has_comment = false;
    for (key, value) in body.0 {
        if key == COMMENT_KEY {
            if std::mem::replace(&mut has_comment, true) {
                return Err(SchemaError::DuplicateMember {
                    aggregate: name.to_string(),
                    member: key,
                });
            }
            match value {
                serde_json::Value::String(doc) => {
                    aggregate.doc = Some(doc).filter(|d| !d.is_empty());
                }
                other => {
                    return Err(SchemaError::InvalidMember {
                        aggregate: name.to_string(),
                        member: key,
                        detail: format!("struct comment must be a string, found {other}"),
                    })
                }
            }
            continue;
        }

        let raw: RawMember =
            serde_json::from_value(value).map_err(|e| SchemaError::InvalidMember {
                aggregate: name.to_string(),
                member: key.clone(),
                detail: e.to_string(),
            })?;
        let mut member = Member::new(key, raw.type_name).with_count(raw.len);
        member.doc = raw.comment.filter(|c| !c.is_empty());
        aggregate.members.push(member);
    }
    Ok(aggregate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endian::Endianness;
    use crate::schema::TypeDef;

    const SAMPLE: &str = r#"{
        "sizeof": {
            "uint8_t": {"size": 1},
            "uint32_t": {"size": 4}
        },
        "structs": {
            "Point": {
                "comment": "2D point",
                "y": {"type": "uint32_t", "comment": "ordinate"},
                "x": {"type": "uint8_t", "len": 3}
            },
            "Outer": {
                "p": {"type": "Point"},
                "f": {"type": "uint32_t"}
            }
        },
        "endianness": {"host": "little", "network": "big"}
    }"#;

    #[test]
    fn parses_sample() {
        let cfg = Config::from_json_str(SAMPLE).unwrap();
        assert_eq!(cfg.schema.len(), 4);
        assert_eq!(
            cfg.endianness,
            EndiannessConfig::new(Endianness::Little, Endianness::Big)
        );
        assert_eq!(cfg.schema.get("uint32_t"), Some(&TypeDef::Primitive { width: 4 }));

        let point = cfg.schema.get("Point").and_then(TypeDef::as_aggregate).unwrap();
        assert_eq!(point.doc.as_deref(), Some("2D point"));
        // Declaration order, not alphabetical.
        let names: Vec<_> = point.members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["y", "x"]);
        assert_eq!(point.members[0].doc.as_deref(), Some("ordinate"));
        assert_eq!(point.members[1].count, 3);
        assert_eq!(point.members[0].count, 1);
    }

    #[test]
    fn struct_order_is_kept() {
        let cfg = Config::from_json_str(SAMPLE).unwrap();
        let names: Vec<_> = cfg.schema.aggregates().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Point", "Outer"]);
    }

    #[test]
    fn misspelled_endianness_key_accepted() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {},
            "endiannes": {"host": "big", "network": "big"}
        }"#;
        let cfg = Config::from_json_str(json).unwrap();
        assert!(!cfg.endianness.needs_swap());
    }

    #[test]
    fn missing_endianness_rejected() {
        let json = r#"{"sizeof": {"u8": {"size": 1}}, "structs": {}}"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(matches!(err, SchemaError::MissingEndianness));
    }

    #[test]
    fn zero_len_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {"A": {"v": {"type": "u8", "len": 0}}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidCount { .. }));
    }

    #[test]
    fn member_without_type_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {"A": {"v": {"len": 2}}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidMember { ref member, .. } if member == "v"));
    }

    #[test]
    fn non_string_struct_comment_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {"A": {"comment": 5, "v": {"type": "u8"}}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        assert!(matches!(
            Config::from_json_str(json).unwrap_err(),
            SchemaError::InvalidMember { .. }
        ));
    }

    #[test]
    fn comment_only_struct_is_empty() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {"A": {"comment": "nothing here"}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        assert!(matches!(
            Config::from_json_str(json).unwrap_err(),
            SchemaError::EmptyAggregate { .. }
        ));
    }

    #[test]
    fn type_declared_twice_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {"u8": {"v": {"type": "u8"}}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        assert!(matches!(
            Config::from_json_str(json).unwrap_err(),
            SchemaError::DuplicateType { .. }
        ));
    }

    #[test]
    fn repeated_member_key_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}, "u32": {"size": 4}},
            "structs": {"A": {"v": {"type": "u8"}, "v": {"type": "u32"}}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        let err = Config::from_json_str(json).unwrap_err();
        assert!(
            matches!(err, SchemaError::DuplicateMember { ref aggregate, ref member }
                if aggregate == "A" && member == "v"),
            "got {err:?}"
        );
    }

    #[test]
    fn repeated_comment_key_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}},
            "structs": {"A": {"comment": "one", "v": {"type": "u8"}, "comment": "two"}},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        assert!(matches!(
            Config::from_json_str(json).unwrap_err(),
            SchemaError::DuplicateMember { ref member, .. } if member == "comment"
        ));
    }

    #[test]
    fn repeated_primitive_key_rejected() {
        let json = r#"{
            "sizeof": {"u8": {"size": 1}, "u8": {"size": 2}},
            "structs": {},
            "endianness": {"host": "little", "network": "little"}
        }"#;
        assert!(matches!(
            Config::from_json_str(json).unwrap_err(),
            SchemaError::DuplicateType { ref name } if name == "u8"
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            Config::from_json_str("{not json").unwrap_err(),
            SchemaError::Json(_)
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let cfg = Config::load(&path).unwrap();
        assert_eq!(cfg.schema.aggregates().count(), 2);

        let err = Config::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, SchemaError::Io { .. }));
    }
}
