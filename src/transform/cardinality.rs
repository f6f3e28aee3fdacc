//! Multiplicity to cardinality-bound synthesis.
//!
//! Declared bounds collapse to at most two restriction constraints:
//!
//! ```text
//! (0, *)        nothing
//! (m, *) m > 0  min m
//! (m, m) m > 0  exactly m
//! (m, n) m > 0  min m, then max n
//! (0, n)        max n            (n may be 0)
//! ```

use crate::base::{Multiplicity, UNBOUNDED};

/// A single cardinality constraint to assert on a property.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardinalityBound {
    Min(u32),
    Max(u32),
    Exact(u32),
}

/// The cardinality constraints a declared multiplicity synthesizes to.
///
/// When both a minimum and a maximum survive, the minimum comes first.
pub fn synthesize(multiplicity: Multiplicity) -> Vec<CardinalityBound> {
    let Multiplicity { lower, upper } = multiplicity;
    if lower > 0 {
        if upper == UNBOUNDED {
            vec![CardinalityBound::Min(lower)]
        } else if upper == lower as i32 {
            vec![CardinalityBound::Exact(lower)]
        } else {
            vec![CardinalityBound::Min(lower), CardinalityBound::Max(upper as u32)]
        }
    } else if upper >= 0 {
        vec![CardinalityBound::Max(upper as u32)]
    } else {
        Vec::new()
    }
}

/// The bounds an attribute is translated with.
///
/// Only the nullable boxed forms of the built-in scalars can be absent,
/// so every other value type collapses to exactly one.
pub fn attribute_bounds(declared: Multiplicity, boxed: bool) -> Multiplicity {
    if boxed { declared } else { Multiplicity::ONE }
}
