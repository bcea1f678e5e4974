//! # Regions
//!
//! Each module declares one region type with a unique tag and lays out its
//! record as fixed offsets from the region base.
//!
//! Tags are never checked at runtime. [`RegionRegistry`] exists so tests can
//! assert that every region the workspace declares is disjoint.

use super::errors::StorageError;
use super::slot::{region_for, StorageSlot};
use std::collections::HashMap;
use tracing::debug;

/// A namespaced storage region.
pub trait Region {
    /// Unique namespace tag, e.g. `"gamereg.router.storage"`.
    const TAG: &'static str;

    /// Base slot of the region.
    fn base() -> StorageSlot {
        region_for(Self::TAG)
    }

    /// Slot of the field at `offset`.
    fn field(offset: u8) -> StorageSlot {
        Self::base().offset(offset)
    }
}

/// Set of declared regions, used to prove tag uniqueness and disjointness.
#[derive(Debug, Default, Clone)]
pub struct RegionRegistry {
    regions: Vec<(&'static str, StorageSlot)>,
}

impl RegionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a raw tag. Fails if the tag was registered before.
    pub fn register_tag(&mut self, tag: &'static str) -> Result<StorageSlot, StorageError> {
        if self.regions.iter().any(|(existing, _)| *existing == tag) {
            return Err(StorageError::DuplicateTag(tag.to_string()));
        }
        let base = region_for(tag);
        debug!(tag, base = %base, "Region registered");
        self.regions.push((tag, base));
        Ok(base)
    }

    /// Register a region type.
    pub fn register<R: Region>(&mut self) -> Result<StorageSlot, StorageError> {
        self.register_tag(R::TAG)
    }

    /// Builder form of [`Self::register`].
    pub fn with<R: Region>(mut self) -> Result<Self, StorageError> {
        self.register::<R>()?;
        Ok(self)
    }

    /// Number of registered regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// True when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.regions.iter().map(|(tag, _)| *tag)
    }

    /// Fail if two distinct tags derive the same base.
    ///
    /// Bases are 256-aligned, so equal bases is the only way two field
    /// ranges can overlap.
    pub fn verify_disjoint(&self) -> Result<(), StorageError> {
        let mut seen: HashMap<StorageSlot, &'static str> = HashMap::new();
        for (tag, base) in &self.regions {
            if let Some(first) = seen.insert(*base, tag) {
                return Err(StorageError::RegionCollision {
                    first: first.to_string(),
                    second: (*tag).to_string(),
                    base: *base,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Alpha;
    impl Region for Alpha {
        const TAG: &'static str = "gamereg.test.alpha";
    }

    struct Beta;
    impl Region for Beta {
        const TAG: &'static str = "gamereg.test.beta";
    }

    struct AlphaAgain;
    impl Region for AlphaAgain {
        const TAG: &'static str = "gamereg.test.alpha";
    }

    #[test]
    fn test_field_offsets_from_base() {
        assert_eq!(Alpha::field(0), Alpha::base());
        assert_eq!(Alpha::field(4), Alpha::base().plus(4));
    }

    #[test]
    fn test_distinct_regions_are_disjoint() {
        let registry = RegionRegistry::new()
            .with::<Alpha>()
            .and_then(RegionRegistry::with::<Beta>)
            .unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.verify_disjoint().is_ok());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut registry = RegionRegistry::new();
        registry.register::<Alpha>().unwrap();
        assert_eq!(
            registry.register::<AlphaAgain>(),
            Err(StorageError::DuplicateTag("gamereg.test.alpha".into()))
        );
    }

    #[test]
    fn test_collision_detected() {
        // Bypass the duplicate check to exercise the disjointness check itself.
        let base = region_for("gamereg.test.alpha");
        let registry = RegionRegistry {
            regions: vec![("gamereg.test.alpha", base), ("shadow", base)],
        };
        assert!(matches!(
            registry.verify_disjoint(),
            Err(StorageError::RegionCollision { .. })
        ));
    }
}
