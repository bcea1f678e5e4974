//! # Module Upgrades
//!
//! Cuts applied to a live registry: adding, replacing and removing modules,
//! initializer rollback, loupe consistency and fallback routing.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use gr_01_namespaced_storage::{Field, Region};
    use gr_02_module_router::{
        decode_args, encode_call, encode_output, erc165_interface, loupe_interface, CallContext,
        Facet, FacetError, RouterCall, RouterError,
    };
    use gr_04_operator_registry::ownership_interface;
    use gr_05_item_registry::{
        registry_interface, ItemRegistry, NamespacedAssetLedger, RegistryFacet,
    };
    use shared_crypto::{selector, Secp256k1KeyPair};
    use shared_types::{Address, ErrorKind, FacetCut, Selector};
    use std::sync::Arc;
    use thiserror::Error;

    struct ScoreRegion;
    impl Region for ScoreRegion {
        const TAG: &'static str = "gamereg.test.scores";
    }

    #[derive(Debug, Error, PartialEq)]
    #[error("starting score must be non-zero")]
    struct ZeroStart;

    fn score() -> Field<u64> {
        Field::at(ScoreRegion::field(0))
    }

    const RECORD: &str = "recordScore(uint64)";
    const SCORE: &str = "score()";
    const VERSION: &str = "version()";
    const INIT: &str = "initScores(uint64)";

    /// Leaderboard module in two versions. `initScores` is reachable only as
    /// a post-cut initializer.
    struct ScoreFacet {
        version: u32,
    }

    impl Facet for ScoreFacet {
        fn name(&self) -> &'static str {
            "scores"
        }

        fn selectors(&self) -> Vec<Selector> {
            vec![selector(RECORD), selector(SCORE), selector(VERSION)]
        }

        fn execute(
            &self,
            ctx: &mut CallContext<'_>,
            sel: Selector,
            args: &[u8],
        ) -> Result<Vec<u8>, FacetError> {
            if sel == selector(RECORD) {
                let points: u64 = decode_args(args)?;
                let total = score().get_or_default(ctx.store())? + points * u64::from(self.version);
                score().set(ctx.store_mut(), &total)?;
                encode_output(&total)
            } else if sel == selector(SCORE) {
                encode_output(&score().get_or_default(ctx.store())?)
            } else if sel == selector(VERSION) {
                encode_output(&self.version)
            } else if sel == selector(INIT) {
                let start: u64 = decode_args(args)?;
                score().set(ctx.store_mut(), &start)?;
                if start == 0 {
                    return Err(FacetError::module(ErrorKind::Validation, ZeroStart));
                }
                encode_output(&())
            } else {
                Err(FacetError::UnhandledSelector(sel))
            }
        }
    }

    fn deploy_scores(fx: &Fixture, version: u32) -> Address {
        fx.client
            .router()
            .deployments()
            .deploy(Arc::new(ScoreFacet { version }))
    }

    fn call<R: serde::de::DeserializeOwned>(fx: &Fixture, signature: &str, args: &impl serde::Serialize) -> Result<R, RouterError> {
        fx.client.router().call_typed(STRANGER, selector(signature), args)
    }

    // =========================================================================
    // ADD / REPLACE / REMOVE
    // =========================================================================

    #[test]
    fn test_module_lifecycle() {
        let fx = Fixture::new();
        let router = fx.client.router();
        let v1 = deploy_scores(&fx, 1);
        let selectors = ScoreFacet { version: 1 }.selectors();

        router
            .apply_module_cuts(ADMIN, vec![FacetCut::add(v1, selectors.clone())], Address::ZERO, vec![])
            .unwrap();
        assert_eq!(call::<u64>(&fx, RECORD, &5u64).unwrap(), 5);
        assert_eq!(call::<u32>(&fx, VERSION, &()).unwrap(), 1);

        let v2 = deploy_scores(&fx, 2);
        router
            .apply_module_cuts(ADMIN, vec![FacetCut::replace(v2, selectors.clone())], Address::ZERO, vec![])
            .unwrap();
        assert_eq!(call::<u32>(&fx, VERSION, &()).unwrap(), 2);
        // Same region, new logic.
        assert_eq!(call::<u64>(&fx, RECORD, &5u64).unwrap(), 15);
        assert_eq!(router.facet_selectors(v1).unwrap(), Vec::<Selector>::new());
        assert!(!router.facet_addresses().unwrap().contains(&v1));

        router
            .apply_module_cuts(ADMIN, vec![FacetCut::remove(selectors)], Address::ZERO, vec![])
            .unwrap();
        let err = call::<u64>(&fx, SCORE, &()).unwrap_err();
        assert!(matches!(err, RouterError::NoSuchFunction(s) if s == selector(SCORE)));
        assert_eq!(err.kind(), ErrorKind::Routing);
    }

    #[test]
    fn test_only_admin_cuts() {
        let fx = Fixture::new();
        let v1 = deploy_scores(&fx, 1);
        let cut = FacetCut::add(v1, ScoreFacet { version: 1 }.selectors());

        let err = fx
            .client
            .router()
            .apply_module_cuts(OWNER, vec![cut], Address::ZERO, vec![])
            .unwrap_err();
        assert!(matches!(err, RouterError::NotAdmin { caller } if caller == OWNER));
        assert_eq!(fx.client.router().facet_address(selector(SCORE)).unwrap(), None);
    }

    #[test]
    fn test_registry_state_survives_module_replacement() {
        let fx = Fixture::new();
        let alice = Secp256k1KeyPair::generate();
        let (id, uuid) = fx.create_for(&alice, "ipfs://v1");

        let replacement = RegistryFacet::new(ItemRegistry::new(Arc::new(NamespacedAssetLedger::new())));
        let selectors = replacement.selectors();
        let address = fx.client.router().deployments().deploy(Arc::new(replacement));
        fx.client
            .router()
            .apply_module_cuts(ADMIN, vec![FacetCut::replace(address, selectors)], Address::ZERO, vec![])
            .unwrap();

        assert_ne!(address, fx.client.facets().registry);
        assert_eq!(fx.client.id_for(&uuid).unwrap(), id);
        assert_eq!(fx.client.uri(id).unwrap(), "ipfs://v1");
        let (next, _) = fx.create_for(&alice, "ipfs://v2");
        assert_eq!(next, id + 1);
    }

    #[test]
    fn test_router_selectors_are_immutable() {
        let fx = Fixture::new();
        let v1 = deploy_scores(&fx, 1);
        let admin_selector = RouterCall::Admin.selector();

        let err = fx
            .client
            .router()
            .apply_module_cuts(ADMIN, vec![FacetCut::add(v1, vec![admin_selector])], Address::ZERO, vec![])
            .unwrap_err();
        assert!(matches!(err, RouterError::ImmutableSelector(s) if s == admin_selector));
        assert_eq!(fx.client.router().admin().unwrap(), ADMIN);
    }

    #[test]
    fn test_malformed_batch_rolls_back_earlier_cuts() {
        let fx = Fixture::new();
        let router = fx.client.router();
        let v1 = deploy_scores(&fx, 1);
        let registry = fx.client.facets().registry;
        let taken = router.facet_selectors(registry).unwrap()[0];
        let logs = router.log_len();

        let err = router
            .apply_module_cuts(
                ADMIN,
                vec![FacetCut::add(v1, vec![selector(SCORE)]), FacetCut::add(v1, vec![taken])],
                Address::ZERO,
                vec![],
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RouterError::SelectorAlreadyMapped { selector: s, target } if s == taken && target == registry
        ));
        assert_eq!(err.kind(), ErrorKind::StateConflict);

        assert_eq!(router.facet_address(selector(SCORE)).unwrap(), None);
        assert_eq!(router.facet_address(taken).unwrap(), Some(registry));
        assert!(!router.facet_addresses().unwrap().contains(&v1));
        assert_eq!(router.log_len(), logs);
    }

    // =========================================================================
    // INITIALIZERS
    // =========================================================================

    #[test]
    fn test_initializer_runs_after_cut() {
        let fx = Fixture::new();
        let v1 = deploy_scores(&fx, 1);
        let init = encode_call(selector(INIT), &40u64).unwrap();

        fx.client
            .router()
            .apply_module_cuts(ADMIN, vec![FacetCut::add(v1, ScoreFacet { version: 1 }.selectors())], v1, init)
            .unwrap();
        assert_eq!(call::<u64>(&fx, SCORE, &()).unwrap(), 40);
    }

    #[test]
    fn test_failed_initializer_rolls_back_batch() {
        let fx = Fixture::new();
        let router = fx.client.router();
        let v1 = deploy_scores(&fx, 1);
        let logs = router.log_len();
        let init = encode_call(selector(INIT), &0u64).unwrap();

        let err = router
            .apply_module_cuts(ADMIN, vec![FacetCut::add(v1, ScoreFacet { version: 1 }.selectors())], v1, init)
            .unwrap_err();
        assert!(matches!(err, RouterError::InitializationFailed { target, .. } if target == v1));
        assert_eq!(err.module_error::<ZeroStart>(), Some(&ZeroStart));
        assert_eq!(err.kind(), ErrorKind::Validation);

        assert_eq!(router.facet_address(selector(SCORE)).unwrap(), None);
        assert_eq!(router.log_len(), logs);
    }

    // =========================================================================
    // INTROSPECTION
    // =========================================================================

    #[test]
    fn test_loupe_matches_routing() {
        let fx = Fixture::new();
        let router = fx.client.router();

        for (target, selectors) in router.facets().unwrap() {
            assert!(!selectors.is_empty());
            assert_eq!(router.facet_selectors(target).unwrap(), selectors);
            for sel in selectors {
                assert_eq!(router.facet_address(sel).unwrap(), Some(target));
            }
        }

        for interface in [erc165_interface(), loupe_interface(), registry_interface(), ownership_interface()] {
            assert!(router.supports_interface(interface).unwrap());
        }
        assert!(!router.supports_interface(Selector::new([0xff; 4])).unwrap());
    }

    #[test]
    fn test_fallback_receives_unrouted_calls() {
        let fx = Fixture::new();
        let router = fx.client.router();
        let scores = deploy_scores(&fx, 3);

        assert!(matches!(call::<u64>(&fx, SCORE, &()), Err(RouterError::NoSuchFunction(_))));

        assert!(router.set_fallback(OWNER, scores).is_err());
        router.set_fallback(ADMIN, scores).unwrap();
        assert_eq!(router.fallback_target().unwrap(), Some(scores));

        assert_eq!(call::<u64>(&fx, RECORD, &2u64).unwrap(), 6);
        // Routed selectors still win over the fallback.
        assert_eq!(fx.client.total_issued().unwrap(), 0);

        router.set_fallback(ADMIN, Address::ZERO).unwrap();
        assert_eq!(router.fallback_target().unwrap(), None);
        assert!(matches!(call::<u64>(&fx, SCORE, &()), Err(RouterError::NoSuchFunction(_))));
    }
}
