//! Axis Constraints - scale-constraint configuration for chart layouts
//!
//! This library resolves "scale together" relationships between chart axes:
//! each axis may declare a counter axis it scales with and a ratio, and the
//! resolver maintains a consistent partition of axes into constraint groups
//! with relative scale factors, rejecting requests that would create a loop.
//!
//! # Example
//!
//! ```rust
//! use axis_constraints::resolve_str;
//!
//! let resolved = resolve_str(r#"
//!     [[axes]]
//!     id = "x"
//!
//!     [[axes]]
//!     id = "y"
//!     scale_with = "x"
//!     scale_ratio = 2.0
//! "#).unwrap();
//!
//! assert_eq!(resolved.groups.len(), 1);
//! assert!(resolved.warnings.is_empty());
//! ```

pub mod input;
pub mod layout;

pub use input::{AxisDecl, InputError, LayoutDoc};
pub use layout::{
    resolve, AxisId, AxisType, ConfigWarning, LayoutError, ResolvedAxis, ResolvedLayout,
    ScaleConstraint, ScaleGroup, ScaleGroups, WarningCategory,
};

use thiserror::Error;

/// Errors that can occur during the resolve pipeline
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Error reading or parsing the layout document
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Error in the declared axes themselves
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),
}

/// Parse a TOML layout document and resolve its axis configuration
///
/// This is the main entry point for the library. Warnings about dropped
/// scale-constraint requests are part of the result, not errors.
pub fn resolve_str(source: &str) -> Result<ResolvedLayout, ResolveError> {
    let doc = LayoutDoc::from_str(source)?;
    Ok(layout::resolve(&doc)?)
}
