//! Strongly typed, zero-cost identifier wrappers for simulation entities.
//!
//! Entities live in plain `Vec`s owned by one replication, so every id is a
//! dense index.  Ids are assigned in creation order at initialization, which
//! makes the id scheme deterministic for a given configuration.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) => $label:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $label, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a transport vehicle in a fleet.
    pub struct VehicleId(u32) => "vehicle";
}

typed_id! {
    /// Index of an inspector or servicer drone.
    pub struct DroneId(u32) => "drone";
}

typed_id! {
    /// Index of a maintenance depot.
    pub struct DepotId(u32) => "depot";
}

typed_id! {
    /// Index of a collector failure record, in detection order.
    pub struct FailureId(u32) => "failure";
}
