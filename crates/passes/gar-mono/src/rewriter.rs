//! Step E — call-site rewriting (spec.md §4.3).
//!
//! Iterates over the collected entries once, tracking processed call nodes
//! by identity so union expansion's multiple entries per call don't
//! double-annotate it.

use crate::collector::CallSite;
use crate::planner::Plan;
use crate::type_adapter::to_suffix;
use gar_hir::{CallAnnotation, CallId};
use gar_intern::Interner;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;

/// Computes the annotation to attach to each call, keyed by `CallId`.
/// A call whose group was dropped in Step B yields no entry here — it
/// remains un-annotated, the back end's responsibility (spec.md §4.3).
pub(crate) fn rewrite(sites: &[CallSite], plan: &Plan, interner: &Interner) -> IndexMap<CallId, CallAnnotation> {
    let mut annotations: IndexMap<CallId, CallAnnotation> = IndexMap::new();
    let mut processed: FxHashSet<CallId> = FxHashSet::default();

    for site in sites {
        if !processed.insert(site.call_id) {
            continue;
        }

        if site.union_dispatch {
            let Some(original_types) = site.original_types.as_ref() else {
                continue;
            };
            let key = (
                site.target_name,
                original_types.iter().map(|ty| to_suffix(ty, interner)).collect(),
            );
            if let Some(descriptor) = plan.union_dispatch_table.get(&key) {
                annotations.insert(site.call_id, CallAnnotation::UnionDispatch(descriptor.clone()));
            }
        } else {
            let key = (
                site.target_name,
                site.types.iter().map(|ty| to_suffix(ty, interner)).collect(),
            );
            if let Some(group) = plan.groups.get(&key) {
                annotations.insert(
                    site.call_id,
                    CallAnnotation::Specialized {
                        target: group.specialized_name,
                    },
                );
            }
        }
    }

    annotations
}
