//! The top-level matching driver.
//!
//! Matching proceeds in stages of increasing cost:
//! the ground-triple sieve and the node classification
//! reject most unequal graphs; then [rules](crate::rules) resolve the common cases;
//! then the residual problem is [divided](crate::divide) in independent components;
//! and finally remaining nodes are [brute-forced](crate::brute).
use std::collections::{BTreeMap, BTreeSet};

use log::{debug, trace};
use rdfeq_inmem::index::SimpleTermIndex;

use crate::classify::{
    classify_degrees, classify_nodes, triples_by_node, DegreeClassification, NodeClassification,
};
use crate::mapping::Mapping;
use crate::rules::Outcome;
use crate::snapshot::{BlankAware, ITriple, Idx, TripleSet};

/// The relation being checked between the source and the target graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Source and target are isomorphic.
    Isomorphism,
    /// Source is isomorphic to a subset of target.
    SubGraph,
}

impl Mode {
    /// Whether a source of size `n1` may match a target of size `n2`.
    ///
    /// Applies to triples counts, blank node counts, and degrees.
    pub fn count_compatible(self, n1: usize, n2: usize) -> bool {
        match self {
            Mode::Isomorphism => n1 == n2,
            Mode::SubGraph => n1 <= n2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mode::Isomorphism => "EQUAL",
            Mode::SubGraph => "SUBGRAPH",
        }
    }
}

/// The blank-node part of a matching problem,
/// with the classification of its blank nodes.
#[derive(Clone, Debug)]
pub(crate) struct Problem {
    pub source: TripleSet,
    pub target: TripleSet,
    pub src_nodes: NodeClassification,
    pub tgt_nodes: NodeClassification,
    pub src_degrees: DegreeClassification,
    pub tgt_degrees: DegreeClassification,
    /// The source triples involving each source blank node
    pub src_triples: BTreeMap<Idx, Vec<ITriple>>,
    /// The target triples involving each target blank node
    pub tgt_triples: BTreeMap<Idx, Vec<ITriple>>,
}

impl Problem {
    /// Classify the blank nodes of `source` and `target`,
    /// assumed to contain no ground triple.
    pub fn new<B: BlankAware + ?Sized>(terms: &B, source: TripleSet, target: TripleSet) -> Self {
        let src_nodes = classify_nodes(terms, &source);
        let tgt_nodes = classify_nodes(terms, &target);
        Problem {
            src_degrees: classify_degrees(&src_nodes),
            tgt_degrees: classify_degrees(&tgt_nodes),
            src_triples: triples_by_node(terms, &source),
            tgt_triples: triples_by_node(terms, &target),
            src_nodes,
            tgt_nodes,
            source,
            target,
        }
    }

    /// Whether `x` (in source) and `y` (in target) have compatible degrees.
    pub fn degree_compatible(&self, mode: Mode, x: Idx, y: Idx) -> bool {
        match (self.src_nodes.get(&x), self.tgt_nodes.get(&y)) {
            (Some(dx), Some(dy)) => mode.count_compatible(*dx, *dy),
            _ => false,
        }
    }

    /// Whether `mapping` maps every source blank node.
    pub fn is_complete(&self, mapping: &Mapping) -> bool {
        mapping.covers(self.src_nodes.keys())
    }
}

/// Context shared by all the stages of a matching.
///
/// It carries no mutable state,
/// so nested matchings (on sub-graphs) are independent of each other.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Matcher<'a> {
    pub terms: &'a SimpleTermIndex<Idx>,
    pub mode: Mode,
}

impl<'a> Matcher<'a> {
    pub fn new(terms: &'a SimpleTermIndex<Idx>, mode: Mode) -> Self {
        Matcher { terms, mode }
    }

    /// Match `source` against `target`.
    ///
    /// Returns a mapping of all the blank nodes of `source` if the relation holds,
    /// `None` otherwise. `depth` is the nesting level, used for logging only.
    pub fn run(&self, source: &TripleSet, target: &TripleSet, depth: usize) -> Option<Mapping> {
        let ret = self.run_inner(source, target, depth);
        debug!(
            "{:depth$}[{}{}] {} triples vs {} triples",
            "",
            if ret.is_some() { "" } else { "NOT " },
            self.mode.label(),
            source.len(),
            target.len(),
            depth = depth * 2,
        );
        ret
    }

    fn run_inner(&self, source: &TripleSet, target: &TripleSet, depth: usize) -> Option<Mapping> {
        let mode = self.mode;
        if !mode.count_compatible(source.len(), target.len()) {
            self.reject(depth, "triple counts");
            return None;
        }

        // ground sieve
        let (src_ground, src_rest): (BTreeSet<_>, BTreeSet<_>) =
            source.iter().partition(|t| self.terms.is_ground(t));
        let (tgt_ground, tgt_rest): (BTreeSet<_>, BTreeSet<_>) =
            target.iter().partition(|t| self.terms.is_ground(t));
        if let Some(t) = src_ground.iter().find(|t| !tgt_ground.contains(**t)) {
            trace!("{:depth$}ground triple {:?} not in target", "", t, depth = depth * 2);
            self.reject(depth, "ground triples");
            return None;
        }
        if mode == Mode::Isomorphism && tgt_ground.len() != src_ground.len() {
            self.reject(depth, "extra ground triples in target");
            return None;
        }
        let src_rest: TripleSet = src_rest.into_iter().copied().collect();
        let tgt_rest: TripleSet = tgt_rest.into_iter().copied().collect();
        if src_rest.is_empty() {
            return Some(Mapping::new());
        }

        let problem = Problem::new(self.terms, src_rest, tgt_rest);
        if !mode.count_compatible(problem.src_nodes.len(), problem.tgt_nodes.len()) {
            self.reject(depth, "blank node counts");
            return None;
        }
        if mode == Mode::Isomorphism && problem.src_degrees != problem.tgt_degrees {
            self.reject(depth, "degree classifications");
            return None;
        }
        debug!(
            "{:depth$}matching {} blank nodes in {} triples",
            "",
            problem.src_nodes.len(),
            problem.source.len(),
            depth = depth * 2
        );

        let base = match self.apply_rules(&problem, depth) {
            Outcome::Equal(mapping) => return Some(mapping),
            Outcome::NotEqual => return None,
            Outcome::Undecided(base) => base,
        };
        match mode {
            Mode::Isomorphism => self.divide_and_conquer(&problem, base, depth),
            Mode::SubGraph => self.brute_force(&problem, base, depth),
        }
    }

    /// Log the reason why a matching fails.
    pub fn reject(&self, depth: usize, reason: &str) {
        debug!(
            "{:depth$}[NOT {}] {}",
            "",
            self.mode.label(),
            reason,
            depth = depth * 2
        );
    }

    /// Validate a complete mapping against the whole problem.
    pub fn validate(&self, problem: &Problem, mapping: &Mapping) -> bool {
        mapping.validate(self.terms, &problem.source, &problem.target, self.mode)
    }
}
