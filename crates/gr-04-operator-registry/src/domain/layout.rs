//! Access region (`gamereg.access.storage`).
//!
//! | Offset | Field |
//! |--------|-------|
//! | 0 | owner |
//! | 1 | pending owner |
//! | 2, 3 | operator set |

use gr_01_namespaced_storage::{EnumerableSet, Field, Region};
use shared_types::Address;

/// Access region marker.
pub struct AccessLayout;

impl Region for AccessLayout {
    const TAG: &'static str = "gamereg.access.storage";
}

impl AccessLayout {
    pub(crate) fn owner() -> Field<Address> {
        Field::at(Self::field(0))
    }

    pub(crate) fn pending_owner() -> Field<Address> {
        Field::at(Self::field(1))
    }

    pub(crate) fn operators() -> EnumerableSet<Address> {
        EnumerableSet::at(Self::field(2))
    }
}
