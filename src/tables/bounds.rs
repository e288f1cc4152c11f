//! Nearest-bound search over integer row keys.

/// Nearest row keys strictly below and above a target.
///
/// `None` marks a side with no key (target outside the covered range).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterpolationBound {
    pub lower: Option<u32>,
    pub upper: Option<u32>,
}

impl InterpolationBound {
    /// Both bounds when present.
    pub fn pair(&self) -> Option<(u32, u32)> {
        Some((self.lower?, self.upper?))
    }
}

/// Finds the greatest key `< target` and the least key `> target`.
///
/// A key equal to `target` is ignored; callers check for an exact row
/// before interpolating.
///
/// # Examples
///
/// ```
/// use energy_calc::tables::bounds::find_bounds;
///
/// let b = find_bounds(&[30, 10, 20], 25);
/// assert_eq!((b.lower, b.upper), (Some(20), Some(30)));
/// ```
pub fn find_bounds(keys: &[u32], target: u32) -> InterpolationBound {
    let mut sorted = keys.to_vec();
    sorted.sort_unstable();

    let mut bound = InterpolationBound::default();
    for key in sorted {
        if key < target {
            bound.lower = Some(key);
        } else if key > target {
            bound.upper = Some(key);
            break;
        }
    }
    bound
}
