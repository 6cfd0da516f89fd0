//! Scale-constraint resolution for a single axis of the defaults pass.
//!
//! Reads the user's `scale_with` request, validates it against the current
//! link options, coerces the ratio, and records the link in the group
//! collection. Rejected requests never abort the solve; they surface as
//! warnings and the axis keeps whatever membership earlier requests gave it.

use std::collections::HashMap;
use std::fmt;

use super::axis::{AxisId, AxisType};
use super::groups::ScaleGroups;
use crate::input::AxisDecl;

/// A warning about a dropped or adjusted scale-constraint request
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigWarning {
    pub category: WarningCategory,
    pub message: String,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Why a request was dropped or adjusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningCategory {
    /// Target already shares a group with the requesting axis
    Cycle,
    /// Target is a counter axis of a different type
    TypeMismatch,
    /// Target names no declared counter axis
    UnknownAxis,
    /// Non-positive or non-finite user ratio, replaced by 1
    Ratio,
}

impl fmt::Display for WarningCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningCategory::Cycle => write!(f, "cycle"),
            WarningCategory::TypeMismatch => write!(f, "type-mismatch"),
            WarningCategory::UnknownAxis => write!(f, "unknown-axis"),
            WarningCategory::Ratio => write!(f, "ratio"),
        }
    }
}

/// The resolved scale constraint recorded on an output axis
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConstraint {
    /// Counter axis this axis scales with
    pub scale_with: AxisId,
    /// Data units of this axis per data unit of the target
    pub scale_ratio: f64,
}

/// Resolve one axis's scale-constraint request.
///
/// Must be called once per axis in declaration order: each call observes
/// group state left behind by earlier axes. Returns the constraint recorded
/// on the output axis, or `None` when no request was made or the request
/// was dropped.
pub fn resolve_scale_constraint(
    decl: &AxisDecl,
    axis: &AxisId,
    counter_axes: &[AxisId],
    types: &HashMap<AxisId, AxisType>,
    groups: &mut ScaleGroups,
    warnings: &mut Vec<ConfigWarning>,
) -> Option<ScaleConstraint> {
    let target = AxisId::new(decl.scale_with.as_deref()?);

    let options = groups.link_options(axis, counter_axes, types);
    if options.linkable_axes.contains(&target) {
        let ratio = coerce_ratio(decl.scale_ratio, axis, warnings);
        if let Err(e) = groups.link(axis, &target, ratio) {
            // coercion already guarantees a valid ratio; a dropped link
            // must still not abort the solve
            warnings.push(ConfigWarning {
                category: WarningCategory::Ratio,
                message: format!("ignored {}.scale_with: {}", axis, e),
            });
            return None;
        }
        return Some(ScaleConstraint {
            scale_with: target,
            scale_ratio: ratio,
        });
    }

    if !counter_axes.contains(&target) {
        warnings.push(ConfigWarning {
            category: WarningCategory::UnknownAxis,
            message: format!(
                "ignored {}.scale_with: \"{}\" is not a counter axis of {}",
                axis, target, axis
            ),
        });
        return None;
    }

    // The target is a real counter axis, so the request failed either on
    // type or on membership. Report the two causes distinctly.
    if types.get(&target) != types.get(axis) {
        warnings.push(ConfigWarning {
            category: WarningCategory::TypeMismatch,
            message: format!(
                "ignored {}.scale_with: \"{}\" has a different axis type",
                axis, target
            ),
        });
    } else {
        warnings.push(ConfigWarning {
            category: WarningCategory::Cycle,
            message: format!(
                "ignored {}.scale_with: \"{}\" to avoid an infinite loop \
                 and possibly inconsistent scale ratios",
                axis, target
            ),
        });
    }
    None
}

/// Coerce the user-supplied ratio: absent means 1, invalid falls back to 1
/// with a warning rather than failing the solve.
fn coerce_ratio(ratio: Option<f64>, axis: &AxisId, warnings: &mut Vec<ConfigWarning>) -> f64 {
    match ratio {
        None => 1.0,
        Some(r) if r.is_finite() && r > 0.0 => r,
        Some(r) => {
            warnings.push(ConfigWarning {
                category: WarningCategory::Ratio,
                message: format!(
                    "invalid {}.scale_ratio {}: must be a positive finite number, using 1",
                    axis, r
                ),
            });
            1.0
        }
    }
}
