//! Exhaustive search of the remaining mappings.
use std::collections::BTreeSet;

use log::{debug, trace};

use crate::mapping::Mapping;
use crate::matcher::{Matcher, Problem};
use crate::snapshot::{ITriple, Idx};

impl<'a> Matcher<'a> {
    /// Complete `base` by trying every injective assignment of the unmapped source nodes
    /// to unbound target nodes of compatible degree.
    ///
    /// Returns the first assignment that validates.
    pub(crate) fn brute_force(&self, pb: &Problem, base: Mapping, depth: usize) -> Option<Mapping> {
        let pad = depth * 2;
        let mut candidates = vec![];
        for x in pb.src_nodes.keys().copied().filter(|x| !base.is_mapped(*x)) {
            let ys: Vec<Idx> = pb
                .tgt_nodes
                .keys()
                .copied()
                .filter(|y| !base.is_bound(*y) && pb.degree_compatible(self.mode, x, *y))
                .collect();
            if ys.is_empty() {
                trace!("{:pad$}no candidate for {}", "", x);
                self.reject(depth, "node without candidate");
                return None;
            }
            candidates.push((x, ys));
        }
        let order = search_order(pb, candidates);
        debug!(
            "{:pad$}brute force on {} nodes ({} mapped)",
            "",
            order.len(),
            base.len()
        );

        let mut search = Search {
            matcher: self,
            pb,
            order: &order,
            mapping: base,
            visited: 0,
        };
        let found = search.assign(0);
        trace!("{:pad$}{} partial mappings visited", "", search.visited);
        if found {
            Some(search.mapping)
        } else {
            self.reject(depth, "exhausted brute force");
            None
        }
    }
}

/// Unmapped source nodes, with their candidates and the triples to check once they are assigned.
type Step = (Idx, Vec<Idx>, Vec<ITriple>);

/// Order the nodes so that each one is as constrained as possible by the previous ones:
/// start with the node having the fewest candidates,
/// then repeatedly pick the node sharing the most triples with already ordered nodes.
fn search_order(pb: &Problem, candidates: Vec<(Idx, Vec<Idx>)>) -> Vec<Step> {
    let mut remaining = candidates;
    let mut placed = BTreeSet::new();
    let mut ret = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let links = |x: Idx| -> usize {
            pb.src_triples
                .get(&x)
                .into_iter()
                .flatten()
                .filter(|t| t.iter().any(|n| placed.contains(n)))
                .count()
        };
        let best = remaining
            .iter()
            .enumerate()
            .max_by(|(_, (x1, c1)), (_, (x2, c2))| {
                links(*x1)
                    .cmp(&links(*x2))
                    .then_with(|| c2.len().cmp(&c1.len()))
                    .then_with(|| x2.cmp(x1))
            })
            .map(|(i, _)| i)
            .unwrap_or(0);
        let (x, ys) = remaining.swap_remove(best);
        placed.insert(x);
        // triples to check once x is assigned
        let checks = pb
            .src_triples
            .get(&x)
            .into_iter()
            .flatten()
            .copied()
            .collect();
        ret.push((x, ys, checks));
    }
    ret
}

struct Search<'a, 'b> {
    matcher: &'b Matcher<'a>,
    pb: &'b Problem,
    order: &'b [Step],
    mapping: Mapping,
    visited: usize,
}

impl<'a, 'b> Search<'a, 'b> {
    fn assign(&mut self, i: usize) -> bool {
        let order = self.order;
        let Some((x, ys, checks)) = order.get(i) else {
            return self.matcher.validate(self.pb, &self.mapping);
        };
        for y in ys {
            if !self.mapping.insert(*x, *y) {
                continue;
            }
            self.visited += 1;
            if self.consistent(checks) && self.assign(i + 1) {
                return true;
            }
            self.mapping.remove(*x);
        }
        false
    }

    /// Whether the fully assigned triples among `checks` hold in the target.
    fn consistent(&self, checks: &[ITriple]) -> bool {
        checks.iter().all(|t| {
            match self.mapping.remap(self.matcher.terms, t) {
                Some(t2) => self.pb.target.contains(&t2),
                // some other node is not assigned yet
                None => true,
            }
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::matcher::Mode;
    use crate::snapshot::test::{idx, snapshot};
    use crate::snapshot::Snapshot;

    fn problem(snap: &Snapshot) -> Problem {
        Problem::new(&snap.terms, snap.source.clone(), snap.target.clone())
    }

    const CYCLE_6: &str = "_:a p _:b\n_:b p _:c\n_:c p _:d\n_:d p _:e\n_:e p _:f\n_:f p _:a";
    const CYCLE_6B: &str = "_:u p _:v\n_:v p _:w\n_:w p _:x\n_:x p _:y\n_:y p _:z\n_:z p _:u";
    const TWO_CYCLES_3: &str = "_:u p _:v\n_:v p _:w\n_:w p _:u\n_:x p _:y\n_:y p _:z\n_:z p _:x";

    #[test]
    fn finds_mapping() {
        crate::test_setup();
        let snap = snapshot(CYCLE_6, CYCLE_6B);
        let pb = problem(&snap);
        let matcher = Matcher::new(&snap.terms, Mode::Isomorphism);
        let m = matcher.brute_force(&pb, Mapping::new(), 0).unwrap();
        assert_eq!(m.len(), 6);
        assert!(matcher.validate(&pb, &m));
    }

    #[test]
    fn respects_base() {
        crate::test_setup();
        let snap = snapshot(CYCLE_6, CYCLE_6B);
        let pb = problem(&snap);
        let matcher = Matcher::new(&snap.terms, Mode::Isomorphism);
        let mut base = Mapping::new();
        base.insert(idx(&snap, "_:a"), idx(&snap, "_:x"));
        let m = matcher.brute_force(&pb, base, 0).unwrap();
        assert_eq!(m.get(idx(&snap, "_:a")), Some(idx(&snap, "_:x")));
        assert_eq!(m.get(idx(&snap, "_:b")), Some(idx(&snap, "_:y")));
    }

    #[test]
    fn exhausts() {
        crate::test_setup();
        let snap = snapshot(CYCLE_6, TWO_CYCLES_3);
        let pb = problem(&snap);
        let matcher = Matcher::new(&snap.terms, Mode::Isomorphism);
        assert!(matcher.brute_force(&pb, Mapping::new(), 0).is_none());
    }

    #[test]
    fn no_candidate() {
        crate::test_setup();
        let snap = snapshot("_:a p _:a", "_:b p x");
        let pb = problem(&snap);
        let matcher = Matcher::new(&snap.terms, Mode::Isomorphism);
        assert!(matcher.brute_force(&pb, Mapping::new(), 0).is_none());
    }

    #[test]
    fn sub_graph() {
        crate::test_setup();
        let snap = snapshot("_:a p _:b\n_:b p _:c", CYCLE_6B);
        let pb = problem(&snap);
        let matcher = Matcher::new(&snap.terms, Mode::SubGraph);
        let m = matcher.brute_force(&pb, Mapping::new(), 0).unwrap();
        assert!(matcher.validate(&pb, &m));
    }

    #[test]
    fn order_follows_links() {
        let snap = snapshot(CYCLE_6, CYCLE_6B);
        let pb = problem(&snap);
        let candidates = pb
            .src_nodes
            .keys()
            .map(|x| (*x, pb.tgt_nodes.keys().copied().collect()))
            .collect();
        let order = search_order(&pb, candidates);
        for w in order.windows(2).skip(1) {
            // each node after the second is linked to a previously ordered node
            let x = w[1].0;
            let linked = pb.src_triples[&x]
                .iter()
                .any(|t| order.iter().take_while(|s| s.0 != x).any(|s| t.contains(&s.0)));
            assert!(linked);
        }
    }
}
