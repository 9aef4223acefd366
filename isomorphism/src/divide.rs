//! Splitting the unmapped part of a problem into isolated sub-graphs,
//! matched pairwise by recursive calls.
use log::{debug, trace};

use crate::mapping::Mapping;
use crate::matcher::{Matcher, Problem};
use crate::msg::isolated_subgraphs;
use crate::snapshot::{BlankAware, TripleSet};

impl<'a> Matcher<'a> {
    /// Complete `base` by matching isolated sub-graphs,
    /// then hand over to [`brute_force`](Matcher::brute_force) if some nodes remain unmapped.
    pub(crate) fn divide_and_conquer(
        &self,
        pb: &Problem,
        base: Mapping,
        depth: usize,
    ) -> Option<Mapping> {
        let pad = depth * 2;
        let mut mapping = base;
        let (src_free, src_anchors): (TripleSet, TripleSet) = pb
            .source
            .iter()
            .partition(|t| !self.terms.blanks_of(t).any(|x| mapping.is_mapped(x)));
        let tgt_free: TripleSet = pb
            .target
            .iter()
            .filter(|t| !self.terms.blanks_of(t).any(|y| mapping.is_bound(y)))
            .copied()
            .collect();

        let src_comps = isolated_subgraphs(self.terms, &src_free);
        let tgt_comps = isolated_subgraphs(self.terms, &tgt_free);
        if src_comps.len() != tgt_comps.len() {
            self.reject(depth, "isolated sub-graph counts");
            return None;
        }
        debug!("{:pad$}{} isolated sub-graphs", "", src_comps.len());
        if src_comps.len() > 1 {
            let mut src_pending: Vec<&TripleSet> = src_comps.iter().collect();
            let mut tgt_pending: Vec<&TripleSet> = tgt_comps.iter().collect();
            loop {
                let mut progress = false;
                let mut i = 0;
                while i < src_pending.len() {
                    let comp = src_pending[i];
                    let mut successes = tgt_pending
                        .iter()
                        .enumerate()
                        .filter(|(_, cand)| cand.len() == comp.len())
                        .filter_map(|(j, cand)| Some((j, self.run(comp, cand, depth + 1)?)));
                    let (j, sub) = match (successes.next(), successes.next()) {
                        (None, _) => {
                            self.reject(depth, "isolated sub-graph without counterpart");
                            return None;
                        }
                        (Some(found), None) => found,
                        (Some(_), Some(_)) => {
                            trace!("{:pad$}ambiguous isolated sub-graph", "");
                            i += 1;
                            continue;
                        }
                    };
                    if !self.anchors_hold(pb, &src_anchors, &mapping, &sub) {
                        trace!("{:pad$}sub-graph mapping does not hold with anchors", "");
                        i += 1;
                        continue;
                    }
                    if !mapping.extend(&sub) {
                        self.reject(depth, "sub-graph mapping conflict");
                        return None;
                    }
                    src_pending.remove(i);
                    tgt_pending.remove(j);
                    progress = true;
                }
                if !progress || src_pending.is_empty() {
                    break;
                }
            }
        }

        if pb.is_complete(&mapping) {
            return if self.validate(pb, &mapping) {
                Some(mapping)
            } else {
                self.reject(depth, "divided mapping does not validate");
                None
            };
        }
        self.brute_force(pb, mapping, depth)
    }

    /// Whether the triples linking the nodes of `sub` to already mapped nodes still hold
    /// once `sub` is added to `mapping`.
    ///
    /// Anchor triples also involving other unmapped nodes
    /// can not be checked, so they make this test fail.
    fn anchors_hold(
        &self,
        pb: &Problem,
        anchors: &TripleSet,
        mapping: &Mapping,
        sub: &Mapping,
    ) -> bool {
        let extra: Vec<_> = sub.iter().collect();
        anchors
            .iter()
            .filter(|t| self.terms.blanks_of(t).any(|x| sub.is_mapped(x)))
            .all(|t| {
                mapping
                    .remap_with(self.terms, t, &extra)
                    .map(|t2| pb.target.contains(&t2))
                    .unwrap_or(false)
            })
    }
}
