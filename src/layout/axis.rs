//! Axis identity and classification

use std::fmt;

use serde::Deserialize;

/// Identifier for an axis, unique within a layout (e.g. `x`, `y`, `x2`, `y3`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AxisId(pub String);

impl AxisId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Family of this axis, derived from its id.
    ///
    /// Valid ids are `x` or `y` optionally followed by a counter starting
    /// at 2 (`x`, `y`, `x2`, `y10`). Returns `None` for anything else.
    pub fn family(&self) -> Option<AxisFamily> {
        let (family, rest) = if let Some(rest) = self.0.strip_prefix('x') {
            (AxisFamily::X, rest)
        } else if let Some(rest) = self.0.strip_prefix('y') {
            (AxisFamily::Y, rest)
        } else {
            return None;
        };
        if rest.is_empty() {
            return Some(family);
        }
        if !rest.chars().all(|c| c.is_ascii_digit()) || rest.starts_with('0') {
            return None;
        }
        match rest.parse::<u32>() {
            Ok(n) if n >= 2 => Some(family),
            _ => None,
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for AxisId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// The two axis families of a cartesian layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisFamily {
    X,
    Y,
}

impl AxisFamily {
    /// The opposite family; an axis may only scale with counter axes
    pub fn counter(&self) -> AxisFamily {
        match self {
            AxisFamily::X => AxisFamily::Y,
            AxisFamily::Y => AxisFamily::X,
        }
    }
}

/// Classification of an axis.
///
/// Two axes may only scale together when their types match: locking a log
/// axis to a linear one has no meaningful scale ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisType {
    #[default]
    Linear,
    Log,
    Date,
    Category,
}

impl fmt::Display for AxisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisType::Linear => write!(f, "linear"),
            AxisType::Log => write!(f, "log"),
            AxisType::Date => write!(f, "date"),
            AxisType::Category => write!(f, "category"),
        }
    }
}
