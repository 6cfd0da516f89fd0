//! Scale-constraint groups: disjoint sets of axes locked to fixed mutual
//! scale ratios.
//!
//! Each group maps an axis id to a relative scale factor. Only the ratios
//! between factors within one group are meaningful; the absolute values
//! carry no information across groups. The collection is rebuilt from
//! scratch for every layout solve and discarded afterward.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use thiserror::Error;

use super::axis::{AxisId, AxisType};

/// Errors from constraint group mutation
#[derive(Debug, Error)]
pub enum GroupError {
    /// Scale ratios must be positive and finite
    #[error("invalid scale ratio {value}: must be a positive finite number")]
    InvalidRatio { value: f64 },
}

/// A set of axes whose data-to-pixel scale factors are locked to fixed
/// mutual ratios
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScaleGroup {
    factors: IndexMap<AxisId, f64>,
}

impl ScaleGroup {
    /// The minimal state for a newly linked axis: one member with factor 1
    fn singleton(axis: AxisId) -> Self {
        let mut factors = IndexMap::new();
        factors.insert(axis, 1.0);
        Self { factors }
    }

    pub fn contains(&self, axis: &AxisId) -> bool {
        self.factors.contains_key(axis)
    }

    /// Relative scale factor of a member axis
    pub fn factor(&self, axis: &AxisId) -> Option<f64> {
        self.factors.get(axis).copied()
    }

    /// Visual scale ratio between two member axes
    pub fn ratio(&self, a: &AxisId, b: &AxisId) -> Option<f64> {
        Some(self.factor(a)? / self.factor(b)?)
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    pub fn axes(&self) -> impl Iterator<Item = &AxisId> {
        self.factors.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AxisId, f64)> {
        self.factors.iter().map(|(axis, factor)| (axis, *factor))
    }

    fn scale_all(&mut self, factor: f64) {
        for value in self.factors.values_mut() {
            *value *= factor;
        }
    }
}

impl fmt::Display for ScaleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (axis, factor)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", axis, factor)?;
        }
        write!(f, "}}")
    }
}

/// Link options for one axis, as seen by the defaults pass
#[derive(Debug)]
pub struct LinkOptions<'a> {
    /// Counter axes the subject may legally scale with: type-matched and
    /// not already in the subject's own group
    pub linkable_axes: Vec<AxisId>,
    /// The group the subject already belongs to, if any
    pub this_group: Option<&'a ScaleGroup>,
}

/// The disjoint scale groups of one layout solve.
///
/// Invariant: every axis appears in at most one group. Lookups take the
/// first match, so a violated invariant degrades to stale factors rather
/// than a panic.
#[derive(Debug, Clone, Default)]
pub struct ScaleGroups {
    groups: Vec<ScaleGroup>,
}

impl ScaleGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScaleGroup> {
        self.groups.iter()
    }

    /// The group containing `axis`, if any (first match wins)
    pub fn group_of(&self, axis: &AxisId) -> Option<&ScaleGroup> {
        self.groups.iter().find(|group| group.contains(axis))
    }

    fn index_of(&self, axis: &AxisId) -> Option<usize> {
        self.groups.iter().position(|group| group.contains(axis))
    }

    /// Compute which counter axes `axis` may scale with.
    ///
    /// A candidate is linkable when its type matches the subject's and it is
    /// not already a member of the subject's own group; linking to a
    /// same-group member would create a loop. Pure query, no side effects.
    pub fn link_options<'a>(
        &'a self,
        axis: &AxisId,
        counter_axes: &[AxisId],
        types: &HashMap<AxisId, AxisType>,
    ) -> LinkOptions<'a> {
        let this_group = self.group_of(axis);
        let this_type = match types.get(axis) {
            Some(t) => *t,
            None => {
                // untyped subject: nothing to match against
                return LinkOptions {
                    linkable_axes: Vec::new(),
                    this_group,
                };
            }
        };

        let linkable_axes = counter_axes
            .iter()
            .filter(|candidate| this_group.map_or(true, |group| !group.contains(candidate)))
            .filter(|candidate| types.get(*candidate) == Some(&this_type))
            .cloned()
            .collect();

        LinkOptions {
            linkable_axes,
            this_group,
        }
    }

    /// Record that `axis` scales with `target` at the given ratio.
    ///
    /// The caller must have validated `target` against
    /// [`link_options`](Self::link_options); passing a member of the
    /// subject's own group corrupts that group's ratios. A non-positive or
    /// non-finite ratio is rejected before any mutation.
    pub fn link(&mut self, axis: &AxisId, target: &AxisId, ratio: f64) -> Result<(), GroupError> {
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(GroupError::InvalidRatio { value: ratio });
        }

        let this_index = match self.index_of(axis) {
            Some(index) => index,
            None => {
                self.groups.push(ScaleGroup::singleton(axis.clone()));
                self.groups.len() - 1
            }
        };

        // If the target already sits in another group, merge this group into
        // it. Multiplying every member by base_scale * ratio preserves all
        // ratios that held within this group while positioning the whole
        // group relative to the target's existing factor.
        let merge = self
            .groups
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != this_index)
            .find_map(|(index, group)| group.factor(target).map(|base| (index, base)));

        if let Some((other_index, base_scale)) = merge {
            let absorbed = self.groups.remove(this_index);
            let other_index = if other_index > this_index {
                other_index - 1
            } else {
                other_index
            };
            let other = &mut self.groups[other_index];
            for (member, factor) in absorbed.iter() {
                other
                    .factors
                    .insert(member.clone(), base_scale * ratio * factor);
            }
            return Ok(());
        }

        // Otherwise the target was ungrouped: rebase this group so the
        // target becomes its reference factor of 1.
        let group = &mut self.groups[this_index];
        if ratio != 1.0 {
            group.scale_all(ratio);
        }
        group.factors.insert(target.clone(), 1.0);
        Ok(())
    }
}

impl fmt::Display for ScaleGroups {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, group) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", group)?;
        }
        write!(f, "]")
    }
}
