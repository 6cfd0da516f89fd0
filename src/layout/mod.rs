//! Axis layout resolution
//!
//! Takes user axis declarations and computes the configuration for one
//! layout solve: per-axis types, validated scale constraints, and the
//! scale groups that a later range-computation stage turns into actual
//! pixel-to-data factors. The whole pass is sequential; every solve starts
//! from an empty group collection.

pub mod axis;
pub mod defaults;
pub mod groups;

pub use axis::{AxisFamily, AxisId, AxisType};
pub use defaults::{ConfigWarning, ScaleConstraint, WarningCategory};
pub use groups::{GroupError, LinkOptions, ScaleGroup, ScaleGroups};

use std::collections::HashMap;

use thiserror::Error;

use crate::input::LayoutDoc;

/// Errors that reject a layout document outright
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Axis ids must be `x`, `y`, or a numbered form like `x2`
    #[error("invalid axis id '{id}': expected 'x', 'y', or a numbered form like 'x2'")]
    InvalidAxisId { id: String },

    #[error("duplicate axis id '{id}'")]
    DuplicateAxis { id: String },
}

/// Fully resolved configuration for one axis
#[derive(Debug, Clone)]
pub struct ResolvedAxis {
    pub id: AxisId,
    pub axis_type: AxisType,
    /// The accepted scale-constraint request, if any
    pub scale_constraint: Option<ScaleConstraint>,
}

/// Output of one layout solve
#[derive(Debug)]
pub struct ResolvedLayout {
    /// Axes in declaration order
    pub axes: Vec<ResolvedAxis>,
    /// Disjoint scale-constraint groups
    pub groups: ScaleGroups,
    /// Non-fatal problems found while resolving
    pub warnings: Vec<ConfigWarning>,
}

/// Resolve a layout document.
///
/// Axis ids are validated up front, and every axis gets its type before
/// any constraint is processed: linkability can depend on the type of an
/// axis declared later. Constraint requests are then handled in
/// declaration order, each observing the groups left by its predecessors.
pub fn resolve(doc: &LayoutDoc) -> Result<ResolvedLayout, LayoutError> {
    let mut ids: Vec<AxisId> = Vec::with_capacity(doc.axes.len());
    let mut families: Vec<AxisFamily> = Vec::with_capacity(doc.axes.len());
    for decl in &doc.axes {
        let id = AxisId::new(&decl.id);
        let family = id.family().ok_or_else(|| LayoutError::InvalidAxisId {
            id: decl.id.clone(),
        })?;
        if ids.contains(&id) {
            return Err(LayoutError::DuplicateAxis { id: decl.id.clone() });
        }
        ids.push(id);
        families.push(family);
    }

    let mut types: HashMap<AxisId, AxisType> = HashMap::with_capacity(ids.len());
    for (decl, id) in doc.axes.iter().zip(&ids) {
        types.insert(id.clone(), decl.axis_type.unwrap_or_default());
    }

    let mut groups = ScaleGroups::new();
    let mut warnings = Vec::new();
    let mut axes = Vec::with_capacity(ids.len());
    for (i, decl) in doc.axes.iter().enumerate() {
        let counter_family = families[i].counter();
        let counter_axes: Vec<AxisId> = ids
            .iter()
            .zip(&families)
            .filter(|(_, family)| **family == counter_family)
            .map(|(id, _)| id.clone())
            .collect();

        let scale_constraint = defaults::resolve_scale_constraint(
            decl,
            &ids[i],
            &counter_axes,
            &types,
            &mut groups,
            &mut warnings,
        );
        axes.push(ResolvedAxis {
            id: ids[i].clone(),
            axis_type: decl.axis_type.unwrap_or_default(),
            scale_constraint,
        });
    }

    Ok(ResolvedLayout {
        axes,
        groups,
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::AxisDecl;

    fn axis(id: &str) -> AxisDecl {
        AxisDecl {
            id: id.to_string(),
            axis_type: None,
            scale_with: None,
            scale_ratio: None,
        }
    }

    fn linked(id: &str, target: &str, ratio: Option<f64>) -> AxisDecl {
        AxisDecl {
            scale_with: Some(target.to_string()),
            scale_ratio: ratio,
            ..axis(id)
        }
    }

    #[test]
    fn test_invalid_axis_id_rejected() {
        let doc = LayoutDoc {
            title: None,
            axes: vec![axis("q")],
        };
        let err = resolve(&doc).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidAxisId { .. }));
    }

    #[test]
    fn test_duplicate_axis_id_rejected() {
        let doc = LayoutDoc {
            title: None,
            axes: vec![axis("x"), axis("x")],
        };
        let err = resolve(&doc).unwrap_err();
        assert!(matches!(err, LayoutError::DuplicateAxis { .. }));
    }

    #[test]
    fn test_untyped_axes_default_to_linear() {
        let doc = LayoutDoc {
            title: None,
            axes: vec![axis("x"), linked("y", "x", Some(2.0))],
        };
        let resolved = resolve(&doc).unwrap();
        assert_eq!(resolved.axes[0].axis_type, AxisType::Linear);
        assert_eq!(resolved.groups.len(), 1);
        assert!(resolved.warnings.is_empty());
    }

    #[test]
    fn test_counter_axes_are_opposite_family_only() {
        // y2 asking to scale with another y axis is an unknown target
        let doc = LayoutDoc {
            title: None,
            axes: vec![axis("x"), axis("y"), linked("y2", "y", None)],
        };
        let resolved = resolve(&doc).unwrap();
        assert!(resolved.groups.is_empty());
        assert_eq!(resolved.warnings.len(), 1);
        assert_eq!(resolved.warnings[0].category, WarningCategory::UnknownAxis);
    }

    #[test]
    fn test_forward_reference_links() {
        // y may scale with an x axis declared after it
        let doc = LayoutDoc {
            title: None,
            axes: vec![linked("y", "x2", None), axis("x"), axis("x2")],
        };
        let resolved = resolve(&doc).unwrap();
        assert_eq!(resolved.groups.len(), 1);
        assert!(resolved
            .groups
            .group_of(&AxisId::from("x2"))
            .unwrap()
            .contains(&AxisId::from("y")));
    }
}
