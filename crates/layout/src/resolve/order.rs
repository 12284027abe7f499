use rustc_hash::FxHashMap;
use trellis_primitives::Axis;

use crate::expr::Targets;
use crate::tree::ViewTree;
use crate::ViewId;

/// Orders siblings so each view comes after the siblings its expressions read from.
///
/// Returns indices into `siblings` and whether the dependency graph was acyclic. Ties keep
/// insertion order. On a cycle the insertion order is returned unchanged and the caller
/// falls back to relaxation. Self-references are not edges: they are resolved component by
/// component.
pub(crate) fn sibling_order(tree: &ViewTree, siblings: &[ViewId]) -> (Vec<usize>, bool) {
	let index: FxHashMap<ViewId, usize> = siblings
		.iter()
		.enumerate()
		.map(|(i, &view)| (view, i))
		.collect();

	let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); siblings.len()];
	let mut indegree = vec![0usize; siblings.len()];
	for (i, &view) in siblings.iter().enumerate() {
		let Some(layout) = tree.layout(view) else {
			continue;
		};
		let mut targets = Targets::new();
		for axis in Axis::ALL {
			layout.position(axis).targets(&mut targets);
			layout.size(axis).targets(&mut targets);
		}
		targets.sort_unstable();
		targets.dedup();
		for target in targets {
			if let Some(&j) = index.get(&target)
				&& j != i
			{
				dependents[j].push(i);
				indegree[i] += 1;
			}
		}
	}

	let mut order = Vec::with_capacity(siblings.len());
	let mut done = vec![false; siblings.len()];
	while order.len() < siblings.len() {
		let Some(next) = (0..siblings.len()).find(|&i| !done[i] && indegree[i] == 0) else {
			tracing::trace!(
				siblings = siblings.len(),
				ordered = order.len(),
				"Sibling dependency cycle, falling back to relaxation"
			);
			return ((0..siblings.len()).collect(), false);
		};
		done[next] = true;
		order.push(next);
		for &dependent in &dependents[next] {
			indegree[dependent] -= 1;
		}
	}
	(order, true)
}
