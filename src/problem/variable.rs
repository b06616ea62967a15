//! Decision variables.

/// A single decision-variable value.
///
/// Numeric bounds are owned by the [`Problem`](super::Problem), not by the
/// variable, so a `Variable` is just a typed slot. Real, integer and
/// boolean domains are all expressed through `T`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Variable<T> {
    value: T,
}

impl<T> Variable<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy> Variable<T> {
    /// Returns a copy of the value.
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T> From<T> for Variable<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
