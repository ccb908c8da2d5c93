use serde::{Deserialize, Serialize};

use franchise_core::ValueObject;

/// A derived figure that a user may pin to a manual value.
///
/// `calculated` is what the engine would produce; `final` is what every
/// downstream consumer reads. While `is_override` is false the two are equal
/// after each recompute. While it is true, `calculated` keeps tracking the
/// inputs and `final` stays where the user put it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverrideValue<T> {
    calculated: T,
    #[serde(rename = "final")]
    final_value: T,
    is_override: bool,
}

impl<T: Copy + PartialEq + core::fmt::Debug> ValueObject for OverrideValue<T> {}

impl<T: Copy + PartialEq> OverrideValue<T> {
    /// Automatic value: `final == calculated`.
    pub fn automatic(value: T) -> Self {
        Self {
            calculated: value,
            final_value: value,
            is_override: false,
        }
    }

    /// Pinned value, regardless of whether it happens to equal `calculated`.
    pub fn pinned(calculated: T, final_value: T) -> Self {
        Self {
            calculated,
            final_value,
            is_override: true,
        }
    }

    pub fn calculated(&self) -> T {
        self.calculated
    }

    /// The value downstream consumers must use.
    pub fn final_value(&self) -> T {
        self.final_value
    }

    pub fn is_override(&self) -> bool {
        self.is_override
    }

    /// Manual edit: pins `value` unless it equals the automatic value, in which
    /// case automatic behavior is restored.
    pub fn with_manual(self, value: T) -> Self {
        Self {
            calculated: self.calculated,
            final_value: value,
            is_override: value != self.calculated,
        }
    }

    /// Drop the manual value and follow the calculation again.
    pub fn restored(self) -> Self {
        Self::automatic(self.calculated)
    }

    /// Recompute step: take a fresh `calculated`, keep `final` when pinned.
    ///
    /// Never changes `is_override`.
    pub fn refreshed(self, calculated: T) -> Self {
        Self {
            calculated,
            final_value: if self.is_override {
                self.final_value
            } else {
                calculated
            },
            is_override: self.is_override,
        }
    }
}

impl<T: Copy + PartialEq + Default> Default for OverrideValue<T> {
    fn default() -> Self {
        Self::automatic(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_value_different_from_calculated_pins() {
        let v = OverrideValue::automatic(100.0).with_manual(120.0);
        assert!(v.is_override());
        assert_eq!(v.final_value(), 120.0);
        assert_eq!(v.calculated(), 100.0);
    }

    #[test]
    fn manual_value_equal_to_calculated_unpins() {
        let v = OverrideValue::pinned(100.0, 80.0).with_manual(100.0);
        assert!(!v.is_override());
        assert_eq!(v.final_value(), 100.0);
    }

    #[test]
    fn restore_follows_calculation() {
        let v = OverrideValue::pinned(100.0, 80.0).restored();
        assert_eq!(v, OverrideValue::automatic(100.0));
    }

    #[test]
    fn refresh_keeps_pinned_final() {
        let v = OverrideValue::pinned(100.0, 80.0).refreshed(150.0);
        assert_eq!(v.calculated(), 150.0);
        assert_eq!(v.final_value(), 80.0);
        assert!(v.is_override());
    }

    #[test]
    fn refresh_moves_automatic_final() {
        let v = OverrideValue::automatic(100.0).refreshed(150.0);
        assert_eq!(v.final_value(), 150.0);
        assert!(!v.is_override());
    }

    #[test]
    fn final_is_serialized_under_its_own_name() {
        let json = serde_json::to_value(OverrideValue::pinned(1.0, 2.0)).unwrap();
        assert_eq!(json["calculated"], 1.0);
        assert_eq!(json["final"], 2.0);
        assert_eq!(json["is_override"], true);
    }
}
