//! Deterministic heuristics, committing only mappings that are forced,
//! or that can be chosen without loss of generality.
use std::collections::{BTreeMap, BTreeSet, VecDeque};

use log::{debug, trace};

use crate::classify::nodes_with_degree;
use crate::mapping::Mapping;
use crate::matcher::{Matcher, Mode, Problem};
use crate::pair::{dependent_nodes, extract_pairs, MappingPair, PairIndex, PairPosition};
use crate::snapshot::{BlankAware, ITriple, Idx};

/// Placeholder for a blank node position in a triple template.
const HOLE: Idx = Idx::MAX;

/// The result of [`Matcher::apply_rules`].
#[derive(Clone, Debug)]
pub(crate) enum Outcome {
    /// A complete and validated mapping was found.
    Equal(Mapping),
    /// The relation has been proven not to hold.
    NotEqual,
    /// No conclusion; the mapping contains only safe choices,
    /// and must be completed by the next stages.
    Undecided(Mapping),
}

impl<'a> Matcher<'a> {
    pub(crate) fn apply_rules(&self, pb: &Problem, depth: usize) -> Outcome {
        let pad = depth * 2;
        if let Some(mapping) = self.trivial_mapping(pb) {
            debug!("{:pad$}[{}] trivial mapping", "", self.mode.label());
            return Outcome::Equal(mapping);
        }

        let mut mapping = Mapping::new();
        self.map_single_use_nodes(pb, &mut mapping);
        if self.mode == Mode::Isomorphism && !self.map_unique_degrees(pb, &mut mapping) {
            self.reject(depth, "unique degree conflict");
            return Outcome::NotEqual;
        }
        loop {
            let before = mapping.len();
            if !self.map_unique_constants(pb, &mut mapping) {
                self.reject(depth, "no candidate for a blank node with ground neighbours");
                return Outcome::NotEqual;
            }
            self.map_single_use_nodes(pb, &mut mapping);
            if mapping.len() == before {
                break;
            }
        }
        trace!("{:pad$}{} nodes mapped by simple rules", "", mapping.len());

        let src_pairs = extract_pairs(self.terms, &pb.source);
        let tgt_pairs = extract_pairs(self.terms, &pb.target);
        if self.mode == Mode::Isomorphism
            && !self.map_independent_nodes(pb, &src_pairs, &tgt_pairs, &mut mapping)
        {
            self.reject(depth, "independent nodes");
            return Outcome::NotEqual;
        }

        let mut base = mapping;
        if !self.promote_canonical_pairs(pb, &mut base) {
            self.reject(depth, "canonical pair conflict");
            return Outcome::NotEqual;
        }
        let mut full = base.clone();
        self.map_dependency_pairs(pb, &src_pairs, &tgt_pairs, &mut full);

        if pb.is_complete(&full) {
            if self.validate(pb, &full) {
                debug!("{:pad$}[{}] rule-based mapping", "", self.mode.label());
                return Outcome::Equal(full);
            }
            debug!("{:pad$}speculative mapping failed, falling back", "");
        }
        debug!(
            "{:pad$}rules mapped {}/{} nodes",
            "",
            base.len(),
            pb.src_nodes.len()
        );
        Outcome::Undecided(base)
    }

    /// The identity mapping, if all source blank nodes are present in target, and it is valid.
    fn trivial_mapping(&self, pb: &Problem) -> Option<Mapping> {
        let same_nodes = match self.mode {
            Mode::Isomorphism => pb.src_nodes.keys().eq(pb.tgt_nodes.keys()),
            Mode::SubGraph => pb.src_nodes.keys().all(|x| pb.tgt_nodes.contains_key(x)),
        };
        if !same_nodes {
            return None;
        }
        let mapping = Mapping::identity(pb.src_nodes.keys().copied());
        self.validate(pb, &mapping).then_some(mapping)
    }

    /// Map nodes used in a single triple to target nodes used in a single triple.
    ///
    /// Two such target nodes in the same configuration are interchangeable,
    /// so committing to the first one loses no solution.
    /// Nodes whose triple involves another unmapped node are left for later.
    fn map_single_use_nodes(&self, pb: &Problem, mapping: &mut Mapping) {
        let mut candidates = BTreeMap::<(usize, ITriple), Vec<Idx>>::new();
        for y in nodes_with_degree(&pb.tgt_nodes, 1) {
            if mapping.is_bound(y) {
                continue;
            }
            for t in pb.tgt_triples.get(&y).into_iter().flatten() {
                for (k, template) in templates(t, y) {
                    candidates.entry((k, template)).or_default().push(y);
                }
            }
        }
        if candidates.is_empty() {
            return;
        }
        for x in nodes_with_degree(&pb.src_nodes, 1) {
            if mapping.is_mapped(x) {
                continue;
            }
            let Some(t) = pb.src_triples.get(&x).and_then(|v| v.first()) else {
                continue;
            };
            let Some(t2) = mapping.remap_with(self.terms, t, &[(x, HOLE)]) else {
                continue;
            };
            let Some((k, template)) = templates(&t2, HOLE).next() else {
                continue;
            };
            let Some(ys) = candidates.get(&(k, template)) else {
                continue;
            };
            if let Some(y) = ys.iter().find(|y| !mapping.is_bound(**y)) {
                trace!("single-use {} -> {}", x, y);
                mapping.insert(x, *y);
            }
        }
    }

    /// Map the only source node of a given degree to the only target node of that degree.
    ///
    /// Return `false` if this conflicts with the current mapping.
    fn map_unique_degrees(&self, pb: &Problem, mapping: &mut Mapping) -> bool {
        for (degree, count) in pb.src_degrees.iter() {
            if *degree <= 1 || *count != 1 || pb.tgt_degrees.get(degree) != Some(&1) {
                continue;
            }
            let x = nodes_with_degree(&pb.src_nodes, *degree).next();
            let y = nodes_with_degree(&pb.tgt_nodes, *degree).next();
            let (Some(x), Some(y)) = (x, y) else {
                return false;
            };
            trace!("unique degree {}: {} -> {}", degree, x, y);
            if !mapping.insert(x, y) {
                return false;
            }
        }
        true
    }

    /// For every triple with a single blank node,
    /// look for the target triples having the same ground terms in the same positions.
    ///
    /// Return `false` if some blank node has no candidate at all,
    /// or if a forced mapping conflicts with the current mapping.
    fn map_unique_constants(&self, pb: &Problem, mapping: &mut Mapping) -> bool {
        let mut candidates = BTreeMap::<(usize, ITriple), BTreeSet<Idx>>::new();
        for t in pb.target.iter() {
            if let Some((k, y)) = single_blank(self.terms, t) {
                let mut template = *t;
                template[k] = HOLE;
                candidates.entry((k, template)).or_default().insert(y);
            }
        }
        for t in pb.source.iter() {
            let Some((k, x)) = single_blank(self.terms, t) else {
                continue;
            };
            let mut template = *t;
            template[k] = HOLE;
            let viable: Vec<Idx> = candidates
                .get(&(k, template))
                .into_iter()
                .flatten()
                .copied()
                .filter(|y| mapping.accepts(x, *y) && pb.degree_compatible(self.mode, x, *y))
                .collect();
            match viable[..] {
                [] => {
                    trace!("no candidate for {} in {:?}", x, t);
                    return false;
                }
                [y] if !mapping.is_mapped(x) => {
                    trace!("unique constant {} -> {}", x, y);
                    mapping.insert(x, y);
                }
                _ => (),
            }
        }
        true
    }

    /// Map nodes that are not involved in any [`MappingPair`].
    ///
    /// Such nodes only share triples with ground terms,
    /// so target nodes with the same triples are interchangeable.
    /// Return `false` if the number of such nodes differ, or if some of them can not be mapped.
    fn map_independent_nodes(
        &self,
        pb: &Problem,
        src_pairs: &PairIndex,
        tgt_pairs: &PairIndex,
        mapping: &mut Mapping,
    ) -> bool {
        let src_dep = dependent_nodes(src_pairs);
        let tgt_dep = dependent_nodes(tgt_pairs);
        let src_indep: Vec<Idx> = pb
            .src_nodes
            .keys()
            .copied()
            .filter(|x| !src_dep.contains(x))
            .collect();
        let tgt_indep: Vec<Idx> = pb
            .tgt_nodes
            .keys()
            .copied()
            .filter(|y| !tgt_dep.contains(y))
            .collect();
        if src_indep.len() != tgt_indep.len() {
            trace!(
                "{} vs {} independent nodes",
                src_indep.len(),
                tgt_indep.len()
            );
            return false;
        }
        let mut candidates = BTreeMap::<Vec<ITriple>, Vec<Idx>>::new();
        for y in tgt_indep.into_iter().rev() {
            if !mapping.is_bound(y) {
                let triples = pb.tgt_triples.get(&y).map(Vec::as_slice).unwrap_or(&[]);
                candidates.entry(signature(triples, y)).or_default().push(y);
            }
        }
        for x in src_indep {
            if mapping.is_mapped(x) {
                continue;
            }
            let triples = pb.src_triples.get(&x).map(Vec::as_slice).unwrap_or(&[]);
            let found = candidates
                .get_mut(&signature(triples, x))
                .and_then(|ys| ys.pop())
                .filter(|y| pb.degree_compatible(self.mode, x, *y));
            match found {
                Some(y) => {
                    trace!("independent {} -> {}", x, y);
                    mapping.insert(x, y);
                }
                None => {
                    trace!("no candidate for independent node {}", x);
                    return false;
                }
            }
        }
        true
    }

    /// Commit the pairs whose configuration is unique in both graphs.
    ///
    /// A pair is canonical when its triple is the only one in the source
    /// with two distinct blank nodes in those positions and that ground term in the third.
    /// Return `false` if the target proves that no mapping exists.
    fn promote_canonical_pairs(&self, pb: &Problem, mapping: &mut Mapping) -> bool {
        let src_configs = pair_configurations(self.terms, &pb.source);
        let tgt_configs = pair_configurations(self.terms, &pb.target);
        for (key, pairs) in src_configs.iter() {
            let [pair] = pairs.as_slice() else {
                continue;
            };
            let (x2, y2) = match tgt_configs.get(key).map(Vec::as_slice) {
                Some([only]) => (only.x, only.y),
                None | Some([]) => {
                    trace!("no target triple for canonical pair {:?}", pair);
                    return false;
                }
                Some(_) if self.mode == Mode::Isomorphism => {
                    trace!("ambiguous target for canonical pair {:?}", pair);
                    return false;
                }
                Some(_) => continue,
            };
            if !pb.degree_compatible(self.mode, pair.x, x2)
                || !pb.degree_compatible(self.mode, pair.y, y2)
                || !mapping.accepts(pair.x, x2)
                || !mapping.accepts(pair.y, y2)
            {
                trace!("canonical pair {:?} conflicts with mapping", pair);
                return false;
            }
            trace!("canonical pair {:?} -> ({}, {})", pair, x2, y2);
            mapping.insert(pair.x, x2);
            mapping.insert(pair.y, y2);
        }
        true
    }

    /// Speculatively map each unmapped source pair
    /// to the first compatible target pair.
    ///
    /// Pairs adjacent to already mapped nodes are processed first.
    fn map_dependency_pairs(
        &self,
        pb: &Problem,
        src_pairs: &PairIndex,
        tgt_pairs: &PairIndex,
        mapping: &mut Mapping,
    ) {
        let by_node = pairs_by_node(src_pairs);
        let tgt_by_node = pairs_by_node(tgt_pairs);
        let mut tgt_by_x = BTreeMap::<(PairPosition, Idx), Vec<MappingPair>>::new();
        let mut tgt_by_y = BTreeMap::<(PairPosition, Idx), Vec<MappingPair>>::new();
        // target pairs with both nodes unbound
        let mut free = BTreeMap::<PairPosition, BTreeSet<MappingPair>>::new();
        for q in tgt_pairs.keys() {
            tgt_by_x.entry((q.position, q.x)).or_default().push(*q);
            tgt_by_y.entry((q.position, q.y)).or_default().push(*q);
            if !mapping.is_bound(q.x) && !mapping.is_bound(q.y) {
                free.entry(q.position).or_default().insert(*q);
            }
        }
        let mut pending: BTreeSet<MappingPair> = src_pairs
            .keys()
            .filter(|p| !(mapping.is_mapped(p.x) && mapping.is_mapped(p.y)))
            .copied()
            .collect();
        let mut queue: VecDeque<MappingPair> = pending
            .iter()
            .filter(|p| mapping.is_mapped(p.x) || mapping.is_mapped(p.y))
            .copied()
            .collect();
        loop {
            let pair = match queue.pop_front().or_else(|| pending.first().copied()) {
                Some(pair) => pair,
                None => break,
            };
            if !pending.remove(&pair) || (mapping.is_mapped(pair.x) && mapping.is_mapped(pair.y)) {
                continue;
            }
            let src_triples = src_pairs.get(&pair).map(Vec::as_slice).unwrap_or(&[]);
            let (indexed, unbound) = match (mapping.get(pair.x), mapping.get(pair.y)) {
                (Some(x2), _) => (tgt_by_x.get(&(pair.position, x2)), None),
                (None, Some(y2)) => (tgt_by_y.get(&(pair.position, y2)), None),
                (None, None) => (None, free.get(&pair.position)),
            };
            let found = indexed
                .into_iter()
                .flatten()
                .chain(unbound.into_iter().flatten())
                .filter(|q| mapping.accepts(pair.x, q.x) && mapping.accepts(pair.y, q.y))
                .filter(|q| {
                    pb.degree_compatible(self.mode, pair.x, q.x)
                        && pb.degree_compatible(self.mode, pair.y, q.y)
                })
                .find(|q| {
                    let extra = [(pair.x, q.x), (pair.y, q.y)];
                    let tgt_count = tgt_pairs.get(*q).map_or(0, Vec::len);
                    self.mode.count_compatible(src_triples.len(), tgt_count)
                        && src_triples.iter().all(|t| {
                            mapping
                                .remap_with(self.terms, t, &extra)
                                .map(|t2| pb.target.contains(&t2))
                                .unwrap_or(false)
                        })
                })
                .copied();
            if let Some(q) = found {
                trace!("speculative pair {:?} -> {:?}", pair, q);
                mapping.insert(pair.x, q.x);
                mapping.insert(pair.y, q.y);
                for n in [q.x, q.y] {
                    for p in tgt_by_node.get(&n).into_iter().flatten() {
                        if let Some(set) = free.get_mut(&p.position) {
                            set.remove(p);
                        }
                    }
                }
                for n in [pair.x, pair.y] {
                    for p in by_node.get(&n).into_iter().flatten() {
                        if pending.contains(p) {
                            queue.push_back(*p);
                        }
                    }
                }
            }
        }
    }
}

/// The pairs involving each node.
fn pairs_by_node(pairs: &PairIndex) -> BTreeMap<Idx, Vec<MappingPair>> {
    let mut ret = BTreeMap::<Idx, Vec<MappingPair>>::new();
    for pair in pairs.keys() {
        ret.entry(pair.x).or_default().push(*pair);
        ret.entry(pair.y).or_default().push(*pair);
    }
    ret
}

/// The triples involving `n`, with every occurrence of `n` replaced by [`HOLE`], sorted.
fn signature(triples: &[ITriple], n: Idx) -> Vec<ITriple> {
    let mut ret: Vec<ITriple> = triples
        .iter()
        .map(|t| t.map(|i| if i == n { HOLE } else { i }))
        .collect();
    ret.sort_unstable();
    ret
}

/// The only blank node of `t`, with its position,
/// if `t` has exactly one blank position.
fn single_blank<B: BlankAware + ?Sized>(terms: &B, t: &ITriple) -> Option<(usize, Idx)> {
    let mut blanks = (0..3).filter(|k| terms.is_blank(t[*k]));
    match (blanks.next(), blanks.next()) {
        (Some(k), None) => Some((k, t[k])),
        _ => None,
    }
}

/// The templates of `t` obtained by replacing one occurrence of `n` by [`HOLE`],
/// if `n` occurs once in `t`.
fn templates(t: &ITriple, n: Idx) -> impl Iterator<Item = (usize, ITriple)> {
    let positions: Vec<usize> = (0..3).filter(|k| t[*k] == n).collect();
    let t = *t;
    (positions.len() == 1)
        .then(|| {
            let k = positions[0];
            let mut template = t;
            template[k] = HOLE;
            (k, template)
        })
        .into_iter()
}

/// Group the pairs of `triples` by position and ground term.
///
/// Only triples with two distinct blank nodes are counted:
/// a triple repeating one blank node never forms a pair,
/// and does not make a configuration ambiguous.
/// Such triples still have to be matched by the resulting mapping,
/// and a canonical pair is only committed when its target configuration is unique too.
fn pair_configurations<B: BlankAware + ?Sized>(
    terms: &B,
    triples: &BTreeSet<ITriple>,
) -> BTreeMap<(PairPosition, Idx), Vec<MappingPair>> {
    let mut ret = BTreeMap::<_, Vec<_>>::new();
    for t in triples {
        if let Some(pair) = MappingPair::of_triple(terms, t) {
            let (_, _, k) = pair.position.indices();
            ret.entry((pair.position, t[k])).or_default().push(pair);
        }
    }
    ret
}
