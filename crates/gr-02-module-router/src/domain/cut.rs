//! # Module Cuts
//!
//! Applies a batch of add/replace/remove cuts to the selector table.
//! Validation and mutation interleave; callers run this inside a transaction
//! so a failing cut discards the earlier ones.

use super::calls::RouterCall;
use super::errors::RouterError;
use super::layout::RouterLayout;
use gr_01_namespaced_storage::SlotStore;
use shared_types::{Address, CutAction, FacetCut};

/// Apply `cuts` in order. `is_deployed` answers whether a module lives at an
/// address.
pub fn apply_cuts<S, F>(store: &mut S, cuts: &[FacetCut], is_deployed: F) -> Result<(), RouterError>
where
    S: SlotStore + ?Sized,
    F: Fn(&Address) -> bool,
{
    for (index, cut) in cuts.iter().enumerate() {
        if cut.selectors.is_empty() {
            return Err(RouterError::EmptySelectorList { index });
        }
        if let Some(selector) = cut
            .selectors
            .iter()
            .copied()
            .find(|s| RouterCall::is_router_owned(*s))
        {
            return Err(RouterError::ImmutableSelector(selector));
        }

        match cut.action {
            CutAction::Add => {
                require_target(&cut.target, &is_deployed)?;
                for &selector in &cut.selectors {
                    if let Some(existing) = RouterLayout::target_of(store, selector)? {
                        return Err(RouterError::SelectorAlreadyMapped {
                            selector,
                            target: existing,
                        });
                    }
                    RouterLayout::link(store, selector, cut.target)?;
                }
            }
            CutAction::Replace => {
                require_target(&cut.target, &is_deployed)?;
                for &selector in &cut.selectors {
                    let current = RouterLayout::target_of(store, selector)?
                        .ok_or(RouterError::SelectorNotMapped(selector))?;
                    if current == cut.target {
                        return Err(RouterError::ReplaceWithSameTarget {
                            selector,
                            target: current,
                        });
                    }
                    RouterLayout::unlink(store, selector, current)?;
                    RouterLayout::link(store, selector, cut.target)?;
                }
            }
            CutAction::Remove => {
                if !cut.target.is_zero() {
                    return Err(RouterError::RemoveTargetNotZero(cut.target));
                }
                for &selector in &cut.selectors {
                    let current = RouterLayout::target_of(store, selector)?
                        .ok_or(RouterError::SelectorNotMapped(selector))?;
                    RouterLayout::unlink(store, selector, current)?;
                }
            }
        }
    }
    Ok(())
}

fn require_target<F: Fn(&Address) -> bool>(target: &Address, is_deployed: &F) -> Result<(), RouterError> {
    if target.is_zero() {
        return Err(RouterError::ZeroAddress);
    }
    if !is_deployed(target) {
        return Err(RouterError::TargetNotDeployed(*target));
    }
    Ok(())
}
