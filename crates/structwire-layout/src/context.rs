//! Memoizing layout context.
//!
//! The context owns the host and net layout caches for one run together
//! with the stack of types whose host layout is currently being built. A
//! type's layout is inserted only once it is complete, so a failed build
//! leaves no trace in either cache.

use std::collections::{HashMap, HashSet};

use structwire_core::{Aggregate, EndiannessConfig, Schema, TypeDef, TypeName};

use crate::error::{LayoutError, Result};
use crate::layout::{align_up, Layout};
use crate::net;
use crate::report::TypeReport;

/// Number of layouts actually computed (cache misses) so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayoutStats {
    pub host_builds: usize,
    pub net_builds: usize,
}

/// Caller-owned layout cache over one schema and byte order configuration.
#[derive(Debug)]
pub struct LayoutContext<'s> {
    schema: &'s Schema,
    endianness: EndiannessConfig,
    host: HashMap<TypeName, Layout>,
    net: HashMap<TypeName, Layout>,
    /// Aggregates on the active recursion path, outermost first.
    in_progress: Vec<TypeName>,
    stats: LayoutStats,
}

impl<'s> LayoutContext<'s> {
    /// Create a context with every primitive's host layout pre-seeded.
    pub fn new(schema: &'s Schema, endianness: EndiannessConfig) -> Self {
        let host = schema
            .primitives()
            .map(|(name, width)| (name.clone(), Layout::primitive(width)))
            .collect();
        LayoutContext {
            schema,
            endianness,
            host,
            net: HashMap::new(),
            in_progress: Vec::new(),
            stats: LayoutStats::default(),
        }
    }

    pub fn schema(&self) -> &'s Schema {
        self.schema
    }

    pub fn endianness(&self) -> EndiannessConfig {
        self.endianness
    }

    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    /// Whether the host layout of `name` has already been computed.
    pub fn is_host_cached(&self, name: &str) -> bool {
        self.host.contains_key(name)
    }

    /// Whether the net layout of `name` has already been computed.
    pub fn is_net_cached(&self, name: &str) -> bool {
        self.net.contains_key(name)
    }

    /// Padded native layout of `name`, computed on first request.
    pub fn host_layout(&mut self, name: &str) -> Result<&Layout> {
        if !self.host.contains_key(name) {
            let layout = self.build_host(name)?;
            self.stats.host_builds += 1;
            tracing::debug!(
                type_name = name,
                fields = layout.len(),
                layout = %layout,
                "built host layout"
            );
            self.host.insert(name.to_string(), layout);
        }
        Ok(&self.host[name])
    }

    /// Packed wire layout of `name`, computed on first request.
    pub fn net_layout(&mut self, name: &str) -> Result<&Layout> {
        if !self.net.contains_key(name) {
            let endianness = self.endianness;
            let layout = net::pack(self.host_layout(name)?, endianness).ok_or_else(|| {
                LayoutError::Overflow {
                    type_name: name.to_string(),
                }
            })?;
            self.stats.net_builds += 1;
            tracing::debug!(
                type_name = name,
                wire_len = layout.wire_len(),
                layout = %layout,
                "built net layout"
            );
            self.net.insert(name.to_string(), layout);
        }
        Ok(&self.net[name])
    }

    /// Everything an emitter needs to know about one type.
    pub fn report(&mut self, name: &str) -> Result<TypeReport> {
        let host = self.host_layout(name)?.clone();
        let net = self.net_layout(name)?.clone();
        TypeReport::new(name, host, net)
    }

    /// Reports for every aggregate, in [`dependency_order`](Self::dependency_order).
    pub fn reports(&mut self) -> Result<Vec<TypeReport>> {
        self.dependency_order()?
            .iter()
            .map(|name| self.report(name))
            .collect()
    }

    /// Aggregates ordered so each one follows every aggregate it embeds.
    ///
    /// Independent aggregates keep their declaration order. Reference and
    /// cycle errors are reported before any ordering is attempted.
    pub fn dependency_order(&mut self) -> Result<Vec<TypeName>> {
        let schema = self.schema;
        for (name, _) in schema.aggregates() {
            self.host_layout(name)?;
        }

        fn visit(
            schema: &Schema,
            name: &TypeName,
            seen: &mut HashSet<TypeName>,
            order: &mut Vec<TypeName>,
        ) {
            if !seen.insert(name.clone()) {
                return;
            }
            if let Some(aggregate) = schema.get(name).and_then(TypeDef::as_aggregate) {
                for member in &aggregate.members {
                    visit(schema, &member.type_name, seen, order);
                }
                order.push(name.clone());
            }
        }

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for (name, _) in schema.aggregates() {
            visit(schema, name, &mut seen, &mut order);
        }
        Ok(order)
    }

    fn build_host(&mut self, name: &str) -> Result<Layout> {
        let schema = self.schema;
        let aggregate = match schema.get(name) {
            Some(TypeDef::Aggregate(aggregate)) => aggregate,
            Some(TypeDef::Primitive { width }) => return Ok(Layout::primitive(*width)),
            None => {
                return Err(LayoutError::UnknownType {
                    name: name.to_string(),
                })
            }
        };

        if let Some(pos) = self.in_progress.iter().position(|n| n == name) {
            let mut path = self.in_progress[pos..].to_vec();
            path.push(name.to_string());
            return Err(LayoutError::CyclicSchema { path });
        }

        self.in_progress.push(name.to_string());
        let result = self.place_members(name, aggregate);
        self.in_progress.pop();
        result
    }

    /// Lay out members in declaration order with a running cursor.
    ///
    /// Offsets and sizes past `u64::MAX` fail the whole type with
    /// [`LayoutError::Overflow`].
    fn place_members(&mut self, name: &str, aggregate: &Aggregate) -> Result<Layout> {
        let overflow = || LayoutError::Overflow {
            type_name: name.to_string(),
        };
        let widen = |err: LayoutError| match err {
            LayoutError::AlignOverflow { .. } => overflow(),
            other => other,
        };
        let mut cursor = 0u64;
        let mut ranges = Vec::new();

        for member in &aggregate.members {
            if !self.schema.contains(&member.type_name) {
                return Err(LayoutError::UnresolvedMember {
                    aggregate: name.to_string(),
                    member: member.name.clone(),
                    type_name: member.type_name.clone(),
                });
            }

            let element = self.host_layout(&member.type_name)?.clone();
            let align = element.alignment()?;
            let stride = element.size().map_err(widen)?;
            cursor = align_up(cursor, align).map_err(widen)?;

            tracing::trace!(
                type_name = name,
                member = %member.name,
                offset = cursor,
                align,
                stride,
                count = member.count,
                "placing member"
            );

            // Array elements are packed at the element's own size.
            for _ in 0..member.count {
                for range in &element {
                    ranges.push(range.checked_offset(cursor).ok_or_else(overflow)?);
                }
                cursor = cursor.checked_add(stride).ok_or_else(overflow)?;
            }
        }

        let layout = Layout::new(ranges);
        layout.size().map_err(widen)?;
        Ok(layout)
    }
}
