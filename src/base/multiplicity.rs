//! Lower/upper bounds of a structural feature.

/// Upper bound marker for an unlimited number of values.
pub const UNBOUNDED: i32 = -1;

/// Declared bounds of a structural feature.
///
/// `upper` is either a count or [`UNBOUNDED`]. A valid multiplicity has
/// `upper >= lower` or `upper == UNBOUNDED`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Multiplicity {
    pub lower: u32,
    pub upper: i32,
}

impl Multiplicity {
    /// `0..1`, the default for scalar features.
    pub const OPTIONAL: Self = Self::new(0, 1);

    /// `1..1`, exactly one value.
    pub const ONE: Self = Self::new(1, 1);

    /// `0..*`, any number of values.
    pub const ANY: Self = Self::new(0, UNBOUNDED);

    /// Create bounds from raw lower/upper values.
    pub const fn new(lower: u32, upper: i32) -> Self {
        Self { lower, upper }
    }

    /// Returns true if there is no upper limit.
    pub fn is_unbounded(&self) -> bool {
        self.upper == UNBOUNDED
    }

    /// Returns true if more than one value is allowed.
    pub fn is_many(&self) -> bool {
        self.upper == UNBOUNDED || self.upper > 1
    }

    /// Returns true if at least one value is required.
    pub fn is_required(&self) -> bool {
        self.lower > 0
    }
}

impl Default for Multiplicity {
    fn default() -> Self {
        Self::OPTIONAL
    }
}
