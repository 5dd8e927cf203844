use std::collections::BTreeSet;

use tracing::warn;

use crate::config::EndpointSpec;

/// Orders endpoints so every dependency runs before its dependents.
///
/// Repeated fixed-point passes move endpoints whose dependencies are all
/// resolved; endpoints with no mutual constraint keep their original
/// relative order. A pass that moves nothing means a cycle (missing names
/// are rejected by validation): resolution degrades by appending the
/// remaining endpoints in file order instead of failing.
#[must_use]
pub fn resolve_order(endpoints: Vec<EndpointSpec>) -> Vec<EndpointSpec> {
    let mut ordered = Vec::with_capacity(endpoints.len());
    let mut resolved_names: BTreeSet<String> = BTreeSet::new();
    let mut pending = endpoints;

    while !pending.is_empty() {
        let mut remaining = Vec::with_capacity(pending.len());
        let mut moved = false;

        for endpoint in pending {
            let ready = endpoint
                .dependencies
                .iter()
                .all(|dependency| resolved_names.contains(dependency));
            if ready {
                resolved_names.insert(endpoint.name.clone());
                ordered.push(endpoint);
                moved = true;
            } else {
                remaining.push(endpoint);
            }
        }

        if !moved {
            let names: Vec<&str> = remaining
                .iter()
                .map(|endpoint| endpoint.name.as_str())
                .collect();
            warn!(
                "Dependency cycle detected among [{}]; running them in file order.",
                names.join(", ")
            );
            ordered.append(&mut remaining);
            return ordered;
        }

        pending = remaining;
    }

    ordered
}
