//! # Storage Regions
//!
//! Every component's region, declared together, must be distinct and must
//! not overlap.

#[cfg(test)]
mod tests {
    use gr_01_namespaced_storage::{region_for, Region, RegionRegistry, StorageError};
    use gr_02_module_router::RouterLayout;
    use gr_03_consent_verification::ConsentLayout;
    use gr_04_operator_registry::AccessLayout;
    use gr_05_item_registry::{AssetLayout, RegistryLayout};

    fn deployed_regions() -> RegionRegistry {
        RegionRegistry::new()
            .with::<RouterLayout>()
            .and_then(RegionRegistry::with::<ConsentLayout>)
            .and_then(RegionRegistry::with::<AccessLayout>)
            .and_then(RegionRegistry::with::<RegistryLayout>)
            .and_then(RegionRegistry::with::<AssetLayout>)
            .unwrap()
    }

    #[test]
    fn test_component_regions_are_disjoint() {
        let regions = deployed_regions();
        assert_eq!(regions.len(), 5);
        regions.verify_disjoint().unwrap();
    }

    #[test]
    fn test_region_bases_follow_tags() {
        assert_eq!(RegistryLayout::base(), region_for("gamereg.registry.storage"));
        assert_eq!(AssetLayout::base(), region_for("gamereg.asset.storage"));
        assert_ne!(RegistryLayout::base(), AssetLayout::base());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut regions = deployed_regions();
        let err = regions.register_tag(ConsentLayout::TAG).unwrap_err();
        assert!(matches!(err, StorageError::DuplicateTag(tag) if tag == ConsentLayout::TAG));
    }
}
