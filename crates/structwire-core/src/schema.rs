//! Tagged type definitions and the ordered schema container.
//!
//! A schema maps each [`TypeName`] to either a fixed-width primitive or an
//! aggregate with an ordered member list. Declaration order is significant:
//! it fixes member placement and the order of emitted declarations.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchemaError};

/// Unique identifier of a type within a schema.
pub type TypeName = String;

/// One field declaration inside an aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Field name.
    pub name: String,
    /// Referenced type. Not resolved until layout time.
    pub type_name: TypeName,
    /// Repeat count; anything above 1 declares a fixed-size array.
    pub count: u64,
    /// Optional doc comment.
    pub doc: Option<String>,
}

impl Member {
    /// A scalar member of the given type.
    pub fn new(name: impl Into<String>, type_name: impl Into<TypeName>) -> Self {
        Member {
            name: name.into(),
            type_name: type_name.into(),
            count: 1,
            doc: None,
        }
    }

    /// Turn the member into a fixed-size array of `count` elements.
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Whether the member is declared as an array.
    pub fn is_array(&self) -> bool {
        self.count > 1
    }
}

/// A user-declared structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregate {
    /// Members in declaration order.
    pub members: Vec<Member>,
    /// Optional doc comment for the whole structure.
    pub doc: Option<String>,
}

impl Aggregate {
    pub fn new(members: Vec<Member>) -> Self {
        Aggregate { members, doc: None }
    }

    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Definition of a single schema type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeDef {
    /// Leaf scalar of a fixed byte width.
    Primitive { width: u64 },
    /// Structure composed of members.
    Aggregate(Aggregate),
}

impl TypeDef {
    pub fn as_aggregate(&self) -> Option<&Aggregate> {
        match self {
            TypeDef::Aggregate(agg) => Some(agg),
            TypeDef::Primitive { .. } => None,
        }
    }
}

/// An immutable-once-built collection of type definitions.
///
/// Shape invariants (positive widths, non-empty aggregates, counts of at
/// least one, unique names) are enforced on insertion. Member type
/// references are left for the layout engine to resolve.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    types: IndexMap<TypeName, TypeDef>,
}

impl Schema {
    pub fn new() -> Self {
        Schema::default()
    }

    /// Declare a primitive of `width` bytes.
    pub fn add_primitive(&mut self, name: impl Into<TypeName>, width: u64) -> Result<()> {
        let name = name.into();
        if width == 0 {
            return Err(SchemaError::InvalidWidth { name, width });
        }
        self.insert(name, TypeDef::Primitive { width })
    }

    /// Declare an aggregate.
    pub fn add_aggregate(&mut self, name: impl Into<TypeName>, aggregate: Aggregate) -> Result<()> {
        let name = name.into();
        if aggregate.members.is_empty() {
            return Err(SchemaError::EmptyAggregate { name });
        }
        for (i, member) in aggregate.members.iter().enumerate() {
            if member.count == 0 {
                return Err(SchemaError::InvalidCount {
                    aggregate: name,
                    member: member.name.clone(),
                    count: member.count,
                });
            }
            if aggregate.members[..i].iter().any(|m| m.name == member.name) {
                return Err(SchemaError::DuplicateMember {
                    aggregate: name,
                    member: member.name.clone(),
                });
            }
        }
        self.insert(name, TypeDef::Aggregate(aggregate))
    }

    fn insert(&mut self, name: TypeName, def: TypeDef) -> Result<()> {
        if self.types.contains_key(&name) {
            return Err(SchemaError::DuplicateType { name });
        }
        self.types.insert(name, def);
        Ok(())
    }

    /// Builder-style [`Schema::add_primitive`].
    pub fn with_primitive(mut self, name: impl Into<TypeName>, width: u64) -> Result<Self> {
        self.add_primitive(name, width)?;
        Ok(self)
    }

    /// Builder-style [`Schema::add_aggregate`].
    pub fn with_aggregate(mut self, name: impl Into<TypeName>, aggregate: Aggregate) -> Result<Self> {
        self.add_aggregate(name, aggregate)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn is_aggregate(&self, name: &str) -> bool {
        matches!(self.types.get(name), Some(TypeDef::Aggregate(_)))
    }

    /// All types in declaration order.
    pub fn types(&self) -> impl Iterator<Item = (&TypeName, &TypeDef)> {
        self.types.iter()
    }

    /// Primitives with their widths, in declaration order.
    pub fn primitives(&self) -> impl Iterator<Item = (&TypeName, u64)> {
        self.types.iter().filter_map(|(name, def)| match def {
            TypeDef::Primitive { width } => Some((name, *width)),
            TypeDef::Aggregate(_) => None,
        })
    }

    /// Aggregates in declaration order.
    pub fn aggregates(&self) -> impl Iterator<Item = (&TypeName, &Aggregate)> {
        self.types
            .iter()
            .filter_map(|(name, def)| def.as_aggregate().map(|agg| (name, agg)))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
