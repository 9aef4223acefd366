//! Maximal isolated sub-graphs,
//! i.e. connected components under the "shares a blank node" relation.
use std::collections::BTreeMap;

use crate::snapshot::{BlankAware, Idx, TripleSet};

/// Split `triples` into its maximal isolated sub-graphs.
///
/// Each ground triple is a component on its own.
/// Components are sorted by size, then by content.
pub(crate) fn isolated_subgraphs<B: BlankAware + ?Sized>(
    terms: &B,
    triples: &TripleSet,
) -> Vec<TripleSet> {
    let mut uf = UnionFind::default();
    for t in triples {
        let mut blanks = terms.blanks_of(t);
        if let Some(first) = blanks.next() {
            uf.add(first);
            for other in blanks {
                uf.union(first, other);
            }
        }
    }

    let mut by_root = BTreeMap::<Idx, TripleSet>::new();
    let mut ret = vec![];
    for t in triples {
        match terms.blanks_of(t).next() {
            Some(b) => {
                by_root.entry(uf.find(b)).or_default().insert(*t);
            }
            None => ret.push(TripleSet::from([*t])),
        }
    }
    ret.extend(by_root.into_values());
    ret.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    ret
}

#[derive(Debug, Default)]
struct UnionFind {
    parent: BTreeMap<Idx, Idx>,
}

impl UnionFind {
    fn add(&mut self, n: Idx) {
        self.parent.entry(n).or_insert(n);
    }

    fn find(&mut self, n: Idx) -> Idx {
        let mut root = n;
        while let Some(&p) = self.parent.get(&root) {
            if p == root {
                break;
            }
            root = p;
        }
        // path compression
        let mut cur = n;
        while cur != root {
            let next = self.parent.insert(cur, root).unwrap_or(root);
            cur = next;
        }
        root
    }

    fn union(&mut self, a: Idx, b: Idx) {
        self.add(b);
        let (ra, rb) = (self.find(a), self.find(b));
        if ra != rb {
            let (lo, hi) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent.insert(hi, lo);
        }
    }
}
