use super::*;
use rdfeq_api::graph::{CollectibleGraph, GTripleSource, Graph};
use rdfeq_api::term::{BnodeId, IriRef, LanguageTag, SimpleTerm, Term, TermKind, XSD_STRING};
use rdfeq_inmem::graph::{FastGraph, LightGraph};
use std::collections::BTreeSet;
use std::error::Error;
use std::sync::Arc;
use test_case::test_case;

const FOAF_KNOWS: MyTerm = MyTerm::Iri("http://xmlns.com/foaf/0.1/knows");
const FOAF_MBOX: MyTerm = MyTerm::Iri("http://xmlns.com/foaf/0.1/mbox");
const FOAF_NAME: MyTerm = MyTerm::Iri("http://xmlns.com/foaf/0.1/name");
const MBOX_ALICE: MyTerm = MyTerm::Iri("mailto:alice@work.example");
const LIT_ALICE: MyTerm = MyTerm::String("alice");
const LIT_BOB: MyTerm = MyTerm::String("bob");

fn bn(id: &str) -> BnodeId<Arc<str>> {
    BnodeId::new_unchecked(Arc::from(id))
}

/// Check that `mapping` turns `g1` into `g2`, and is injective.
fn check_mapping(g1: &[[MyTerm; 3]], g2: &[[MyTerm; 3]], mapping: &BnodeMapping) {
    let image = |t: &MyTerm| -> SimpleTerm {
        match t.bnode_id() {
            Some(id) => {
                let id: BnodeId<Arc<str>> = id.map_unchecked(Arc::from);
                SimpleTerm::BlankNode(mapping[&id].clone())
            }
            None => t.as_simple(),
        }
    };
    let remapped: BTreeSet<[SimpleTerm; 3]> = g1.iter().map(|t| t.each_ref().map(image)).collect();
    let expected: BTreeSet<[SimpleTerm; 3]> = g2.iter().map(|t| t.map(|c| c.as_simple())).collect();
    assert_eq!(remapped, expected);
    let targets: BTreeSet<_> = mapping.values().collect();
    assert_eq!(targets.len(), mapping.len());
}

/// Check equality in both directions, and the validity of the mappings.
fn assert_iso(g1: &[[MyTerm; 3]], g2: &[[MyTerm; 3]]) -> Result<(), Box<dyn Error>> {
    test_setup();
    let m12 = find_isomorphism(g1, g2)?.ok_or("g1 should be isomorphic to g2")?;
    check_mapping(g1, g2, &m12);
    let m21 = find_isomorphism(g2, g1)?.ok_or("g2 should be isomorphic to g1")?;
    check_mapping(g2, g1, &m21);
    Ok(())
}

/// Check inequality in both directions.
fn assert_not_iso(g1: &[[MyTerm; 3]], g2: &[[MyTerm; 3]]) -> Result<(), Box<dyn Error>> {
    test_setup();
    assert!(!isomorphic_graphs(g1, g2)?);
    assert!(!isomorphic_graphs(g2, g1)?);
    Ok(())
}

#[test]
fn no_bnode() -> Result<(), Box<dyn Error>> {
    let make_graph = |i1: &'static str, i2: &'static str| -> Vec<[MyTerm; 3]> {
        let i1 = MyTerm::Iri(i1);
        let i2 = MyTerm::Iri(i2);
        vec![
            [i1, FOAF_NAME, LIT_ALICE],
            [i1, FOAF_MBOX, MBOX_ALICE],
            [i1, FOAF_KNOWS, i2],
            [i2, FOAF_NAME, LIT_BOB],
        ]
    };
    let g1 = make_graph("#alice", "#bob");
    assert!(isomorphic_graphs(&g1, &g1)?);
    assert!(isomorphic_graphs(&g1, &g1.clone())?);
    assert_eq!(find_isomorphism(&g1, &g1.clone())?, Some(BnodeMapping::new()));

    let g2 = make_graph("#a", "#b");
    assert_not_iso(&g1, &g2)?;

    let g3 = g1[1..].to_vec();
    assert_not_iso(&g1, &g3)?;

    let mut g4 = g1.clone();
    g4[3][0] = MyTerm::Iri("#bobby");
    assert_not_iso(&g1, &g4)?;
    Ok(())
}

#[test]
fn simple() -> Result<(), Box<dyn Error>> {
    let make_graph = |b1: &'static str, b2: &'static str| -> Vec<[MyTerm; 3]> {
        let b1 = MyTerm::Bnode(b1);
        let b2 = MyTerm::Bnode(b2);
        vec![
            [b1, FOAF_NAME, LIT_ALICE],
            [b1, FOAF_MBOX, MBOX_ALICE],
            [b1, FOAF_KNOWS, b2],
            [b2, FOAF_NAME, LIT_BOB],
        ]
    };
    let g1 = make_graph("alice", "bob");
    assert!(isomorphic_graphs(&g1, &g1)?);

    let g2 = make_graph("a", "b");
    assert_iso(&g1, &g2)?;

    let g3 = g1[1..].to_vec();
    assert_not_iso(&g1, &g3)?;

    let mut g4 = g1.clone();
    g4[3][0] = MyTerm::Bnode("bobby");
    assert_not_iso(&g1, &g4)?;
    Ok(())
}

fn make_chain(ids: &'static str) -> Vec<[MyTerm; 3]> {
    let rel = MyTerm::Iri("tag:rel");
    let nodes: Vec<_> = (0..ids.len())
        .map(|i| MyTerm::Bnode(&ids[i..i + 1]))
        .collect();
    let mut graph = Vec::with_capacity(ids.len() - 1);
    for i in 1..nodes.len() {
        graph.push([nodes[i - 1], rel, nodes[i]]);
    }
    graph
}

#[test]
fn chain() -> Result<(), Box<dyn Error>> {
    let g1 = make_chain("abcdefghij");
    assert!(isomorphic_graphs(&g1, &g1)?);
    let g2 = make_chain("EDCBAJIHGF");
    assert_iso(&g1, &g2)?;

    let g3 = make_chain("abcdefghijk");
    assert_not_iso(&g1, &g3)?;
    Ok(())
}

#[test]
fn cycle2() -> Result<(), Box<dyn Error>> {
    let g1 = make_chain("aba");
    assert!(isomorphic_graphs(&g1, &g1)?);
    let g2 = make_chain("BAB");
    assert_iso(&g1, &g2)?;
    Ok(())
}

#[test]
fn cycle_long() -> Result<(), Box<dyn Error>> {
    let g1 = make_chain("abcdefghia");
    assert!(isomorphic_graphs(&g1, &g1)?);
    let g2 = make_chain("EBCDAIGHFE");
    assert_iso(&g1, &g2)?;

    let g3 = make_chain("abcdefghija");
    assert_not_iso(&g1, &g3)?;
    Ok(())
}

#[test]
fn cycle_pathological() -> Result<(), Box<dyn Error>> {
    // Both graphs contain the same number of blank nodes and the same number of arcs.
    // All blank nodes are locally undistinguishable from each other:
    // - they have exactly 1 incoming arc and 1 outgoing arc,
    // - both linking them to blank nodes that are themselves undistinguishable.
    // Only the isolated sub-graphs tell them apart.
    let mut g1 = make_chain("abca");
    g1.append(&mut make_chain("defgd"));

    let g2 = make_chain("abcdefga");
    assert_not_iso(&g1, &g2)?;

    let mut g3 = make_chain("ABCDA");
    g3.append(&mut make_chain("EFGE"));
    assert_iso(&g1, &g3)?;
    Ok(())
}

#[test]
fn cycle_almost_pathological() -> Result<(), Box<dyn Error>> {
    // Same graphs as above, but *one* of the blank nodes is distinguished by an additional property.
    let typ = MyTerm::Iri("tag:type");
    let dist = MyTerm::Iri("tag:Distinguished");

    let mut g1 = make_chain("abca");
    g1.append(&mut make_chain("defgd"));
    g1.push([g1[0][0], typ, dist]);

    let mut g2 = make_chain("abcdefga");
    g2.push([g2[0][0], typ, dist]);
    assert_not_iso(&g1, &g2)?;

    let mut g3 = make_chain("ABCA");
    g3.append(&mut make_chain("DEFGD"));
    g3.push([MyTerm::Bnode("B"), typ, dist]);
    assert_iso(&g1, &g3)?;
    Ok(())
}

fn make_clique(ids: &'static str) -> Vec<[MyTerm; 3]> {
    let rel = MyTerm::Iri("tag:rel");
    let nodes: Vec<_> = (0..ids.len())
        .map(|i| MyTerm::Bnode(&ids[i..i + 1]))
        .collect();
    let mut graph = Vec::with_capacity(ids.len() * ids.len());
    for n1 in nodes.iter() {
        for n2 in nodes.iter() {
            graph.push([*n1, rel, *n2]);
        }
    }
    graph
}

#[test]
fn clique() -> Result<(), Box<dyn Error>> {
    let g1 = make_clique("abcde");
    assert!(isomorphic_graphs(&g1, &g1)?);

    let g2 = make_clique("ABCDE");
    assert_iso(&g1, &g2)?;

    let g3 = make_clique("abcd");
    assert_not_iso(&g1, &g3)?;
    Ok(())
}

fn make_tree(ids: &'static str) -> Vec<[MyTerm; 3]> {
    let rel = MyTerm::Iri("tag:rel");
    let nodes: Vec<_> = (0..ids.len())
        .map(|i| MyTerm::Bnode(&ids[i..i + 1]))
        .collect();
    let mut graph = Vec::with_capacity(ids.len() * ids.len());
    let mut i = 1;
    while 2 * i <= nodes.len() {
        graph.push([nodes[i - 1], rel, nodes[2 * i - 1]]);
        if 2 * i < nodes.len() {
            graph.push([nodes[i - 1], rel, nodes[2 * i]]);
        }
        i += 1;
    }
    graph
}

#[test]
fn tree() -> Result<(), Box<dyn Error>> {
    let g1 = make_tree("abcdefghij");
    assert!(isomorphic_graphs(&g1, &g1)?);

    let g2 = make_tree("ABCDEFGHIJ");
    assert_iso(&g1, &g2)?;

    let g3 = make_tree("abcdefghijk");
    assert_not_iso(&g1, &g3)?;
    Ok(())
}

#[test]
fn blank_predicate() -> Result<(), Box<dyn Error>> {
    let rel = MyTerm::Iri("tag:rel");
    let b1 = MyTerm::Bnode("b1");
    let b2 = MyTerm::Bnode("b2");
    let b3 = MyTerm::Bnode("b3");
    let b4 = MyTerm::Bnode("b4");

    let g1 = vec![[b1, rel, b2], [b2, rel, b3], [rel, b1, b4], [b4, b3, rel]];
    assert!(isomorphic_graphs(&g1, &g1)?);

    let g2 = vec![[b2, rel, b3], [b3, rel, b4], [rel, b2, b1], [b1, b4, rel]];
    assert_iso(&g1, &g2)?;

    let g3 = vec![[b1, rel, b2], [b2, rel, b3], [rel, b2, b4], [b4, b3, rel]];
    //                                                ^^
    assert_not_iso(&g1, &g3)?;
    assert_not_iso(&g2, &g3)?;

    let g4 = vec![[b1, rel, b2], [b2, rel, b3], [rel, b1, b4], [b4, b2, rel]];
    //                                                              ^^
    assert_not_iso(&g1, &g4)?;
    assert_not_iso(&g2, &g4)?;
    Ok(())
}

#[test]
fn literals_are_compared_by_value() -> Result<(), Box<dyn Error>> {
    let b = MyTerm::Bnode("b");
    let g1 = vec![[b, FOAF_NAME, MyTerm::String("42")]];
    let g2 = vec![[b, FOAF_NAME, MyTerm::Number("42")]];
    assert_not_iso(&g1, &g2)?;
    // the same literal, expressed with another term type
    let g3 = vec![[
        SimpleTerm::bnode_unchecked("x"),
        FOAF_NAME.as_simple(),
        SimpleTerm::literal_unchecked("42", XSD_STRING.as_str()),
    ]];
    assert!(isomorphic_graphs(&g1, &g3)?);
    assert!(isomorphic_graphs(&g3, &g1)?);
    Ok(())
}

//
// Scenarios
//

#[test]
fn scenario_ground_graphs() -> Result<(), Box<dyn Error>> {
    test_setup();
    let g1 = vec![[FOAF_KNOWS, FOAF_NAME, LIT_ALICE], [MBOX_ALICE, FOAF_NAME, LIT_BOB]];
    let mut g2 = g1.clone();
    g2.reverse();
    assert_eq!(find_isomorphism(&g1, &g2)?, Some(BnodeMapping::new()));
    Ok(())
}

#[test]
fn scenario_same_ground_triples_different_counts() -> Result<(), Box<dyn Error>> {
    let g1 = vec![[FOAF_KNOWS, FOAF_NAME, LIT_ALICE]];
    let g2 = vec![
        [FOAF_KNOWS, FOAF_NAME, LIT_ALICE],
        [MyTerm::Bnode("b"), FOAF_NAME, LIT_ALICE],
    ];
    assert_not_iso(&g1, &g2)?;
    Ok(())
}

#[test]
fn scenario_unique_constants() -> Result<(), Box<dyn Error>> {
    test_setup();
    let [x, y, p, q] = ["x", "y", "p", "q"].map(MyTerm::Bnode);
    let g1 = vec![[x, FOAF_KNOWS, y], [x, FOAF_NAME, LIT_ALICE], [y, FOAF_NAME, LIT_BOB]];
    let g2 = vec![[p, FOAF_KNOWS, q], [p, FOAF_NAME, LIT_ALICE], [q, FOAF_NAME, LIT_BOB]];
    let mapping = find_isomorphism(&g1, &g2)?.ok_or("graphs should be isomorphic")?;
    assert_eq!(mapping.len(), 2);
    assert_eq!(mapping[&bn("x")], BnodeId::new_unchecked("p"));
    assert_eq!(mapping[&bn("y")], BnodeId::new_unchecked("q"));
    Ok(())
}

#[test]
fn scenario_disconnected_pairs() -> Result<(), Box<dyn Error>> {
    let p = MyTerm::Iri("tag:p");
    let [a1, a2, b1, b2] = ["a1", "a2", "b1", "b2"].map(MyTerm::Bnode);
    let [c1, c2, d1, d2] = ["c1", "c2", "d1", "d2"].map(MyTerm::Bnode);
    let g1 = vec![[a1, p, a2], [b1, p, b2]];
    let g2 = vec![[c1, p, c2], [d1, p, d2]];
    assert_iso(&g1, &g2)?;
    let mapping = find_isomorphism(&g1, &g2)?.ok_or("graphs should be isomorphic")?;
    let img = |id: &str| mapping[&bn(id)].as_str().to_string();
    // each pair is mapped as a whole
    assert_eq!(&img("a1")[1..], "1");
    assert_eq!(&img("a2")[1..], "2");
    assert_eq!(img("a1")[..1], img("a2")[..1]);
    assert_eq!(img("b1")[..1], img("b2")[..1]);
    Ok(())
}

#[test]
fn scenario_fully_blank_triple() -> Result<(), Box<dyn Error>> {
    test_setup();
    let [x, y, z] = ["x", "y", "z"].map(MyTerm::Bnode);
    let g1 = vec![[x, y, z]];
    let g2 = vec![[z, y, x]];
    let err = isomorphic_graphs(&g1, &g2).unwrap_err();
    assert!(err.is_unsupported_triple_shape());
    assert!(matches!(err, MatchError::UnsupportedTripleShape(msg) if msg.contains("_:x")));
    assert!(is_subgraph_of(&g1, &g2).is_err());
    assert!(graph_diff(&g1, &g2).is_err());
    Ok(())
}

#[test]
fn scenario_backtracking() -> Result<(), Box<dyn Error>> {
    // 10 blank nodes of degree 2, no constant, no single-use node
    let g1 = make_chain("abcdefghija");
    let g2 = make_chain("FBHDAJCIEGF");
    assert_iso(&g1, &g2)?;
    // two 5-cycles
    let mut g3 = make_chain("abcdea");
    g3.append(&mut make_chain("fghijf"));
    let mut g4 = make_chain("JIHGFJ");
    g4.append(&mut make_chain("EDCBAE"));
    assert_iso(&g3, &g4)?;
    assert_not_iso(&g1, &g3)?;
    Ok(())
}

#[test]
fn scenario_backtracking_through_rules() -> Result<(), Box<dyn Error>> {
    use crate::mapping::Mapping;
    use crate::matcher::{Matcher, Mode, Problem};
    use crate::rules::Outcome;
    use crate::snapshot::Snapshot;

    test_setup();
    let g1 = make_chain("abcdefghija");
    let g2 = make_chain("FBHDAJCIEGF");
    let snap = Snapshot::new(&g1, &g2)?;
    let pb = Problem::new(&snap.terms, snap.source.clone(), snap.target.clone());
    let matcher = Matcher::new(&snap.terms, Mode::Isomorphism);
    let base = match matcher.apply_rules(&pb, 0) {
        Outcome::Equal(m) => {
            assert!(matcher.validate(&pb, &m));
            Mapping::new()
        }
        Outcome::Undecided(base) => base,
        Outcome::NotEqual => panic!("graphs are isomorphic"),
    };
    // later stages never undo what rules committed
    let m = matcher.brute_force(&pb, base.clone(), 0).ok_or("no mapping found")?;
    assert!(base.iter().all(|(x, y)| m.get(x) == Some(y)));
    let m = matcher
        .divide_and_conquer(&pb, base.clone(), 0)
        .ok_or("no mapping found")?;
    assert!(base.iter().all(|(x, y)| m.get(x) == Some(y)));
    Ok(())
}

#[test]
fn scenario_backtracking_without_solution() -> Result<(), Box<dyn Error>> {
    use crate::matcher::{Matcher, Mode, Problem};
    use crate::msg::isolated_subgraphs;
    use crate::rules::Outcome;
    use crate::snapshot::Snapshot;

    test_setup();
    // same counts, same degrees, one component each, but different orientations
    let rel = MyTerm::Iri("tag:rel");
    let [a, b, c, d, e, f] = ["a", "b", "c", "d", "e", "f"].map(MyTerm::Bnode);
    let g1 = make_chain("abcdefa");
    let g2 = vec![
        [a, rel, b],
        [c, rel, b],
        [c, rel, d],
        [e, rel, d],
        [e, rel, f],
        [a, rel, f],
    ];
    let snap = Snapshot::new(&g1, &g2)?;
    let pb = Problem::new(&snap.terms, snap.source.clone(), snap.target.clone());
    let matcher = Matcher::new(&snap.terms, Mode::Isomorphism);
    assert!(matches!(matcher.apply_rules(&pb, 0), Outcome::Undecided(_)));
    assert_eq!(isolated_subgraphs(&snap.terms, &pb.source).len(), 1);
    assert_eq!(isolated_subgraphs(&snap.terms, &pb.target).len(), 1);
    assert_not_iso(&g1, &g2)?;
    Ok(())
}

//
// Properties
//

fn sample_graphs() -> Vec<Vec<[MyTerm; 3]>> {
    let typ = MyTerm::Iri("tag:type");
    let mut with_type = make_chain("abcdefghia");
    with_type.push([MyTerm::Bnode("c"), typ, LIT_ALICE]);
    vec![
        vec![],
        make_chain("ab"),
        make_chain("abcdefghij"),
        make_chain("abcdefghia"),
        make_chain("EBCDAIGHFE"),
        with_type,
        make_clique("abc"),
        make_tree("abcdefg"),
        make_tree("gfedcba"),
        vec![[FOAF_KNOWS, FOAF_NAME, LIT_BOB]],
    ]
}

#[test]
fn symmetry() -> Result<(), Box<dyn Error>> {
    test_setup();
    let graphs = sample_graphs();
    for g1 in graphs.iter() {
        for g2 in graphs.iter() {
            assert_eq!(isomorphic_graphs(g1, g2)?, isomorphic_graphs(g2, g1)?);
        }
    }
    Ok(())
}

#[test]
fn reflexivity() -> Result<(), Box<dyn Error>> {
    test_setup();
    for g in sample_graphs() {
        let mapping = find_isomorphism(&g, &g)?.ok_or("graph should be equal to itself")?;
        assert!(mapping.iter().all(|(x, y)| x == y));
        assert_eq!(mapping.len(), g.blank_nodes()?.len());
        let copy = g.clone();
        let mapping = find_isomorphism(&g, &copy)?.ok_or("graph should be equal to its copy")?;
        check_mapping(&g, &copy, &mapping);
    }
    Ok(())
}

#[test]
fn idempotence() -> Result<(), Box<dyn Error>> {
    test_setup();
    let g1 = make_chain("abcdefghia");
    let g2 = make_chain("EBCDAIGHFE");
    let m1 = find_isomorphism(&g1, &g2)?.ok_or("graphs should be isomorphic")?;
    let m2 = find_isomorphism(&g1, &g2)?.ok_or("graphs should be isomorphic")?;
    check_mapping(&g1, &g2, &m1);
    check_mapping(&g1, &g2, &m2);
    // the algorithm is deterministic
    assert_eq!(m1, m2);
    Ok(())
}

/// A graph whose triples can not be read, but that knows its size.
#[derive(Debug)]
struct CountOnly(usize);

impl Graph for CountOnly {
    type Term = SimpleTerm;
    type Error = std::io::Error;

    fn triples(&self) -> GTripleSource<'_, Self> {
        Box::new(std::iter::once(Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "triples are not readable",
        ))))
    }

    fn triple_count(&self) -> Result<usize, Self::Error> {
        Ok(self.0)
    }
}

#[test]
fn count_short_circuit() -> Result<(), Box<dyn Error>> {
    test_setup();
    let g = make_chain("abc");
    // triples are never read when counts differ
    assert!(!isomorphic_graphs(&g, &CountOnly(3))?);
    assert!(!isomorphic_graphs(&CountOnly(1), &g)?);
    assert!(is_subgraph_of(&CountOnly(3), &g)?.is_none());
    // but they are when counts are equal
    assert!(matches!(
        isomorphic_graphs(&g, &CountOnly(2)),
        Err(MatchError::TargetGraph(_))
    ));
    assert!(matches!(
        isomorphic_graphs(&CountOnly(2), &g),
        Err(MatchError::SourceGraph(_))
    ));
    assert!(matches!(
        has_subgraph(&CountOnly(2), &g),
        Err(MatchError::SourceGraph(_))
    ));
    Ok(())
}

#[test]
fn same_graph_different_storage() -> Result<(), Box<dyn Error>> {
    test_setup();
    let g1 = make_tree("abcdefghij");
    let g2: LightGraph = LightGraph::from_triples(make_tree("ABCDEFGHIJ"))?;
    let g3: FastGraph = FastGraph::from_triples(make_tree("jihgfedcba"))?;
    assert!(isomorphic_graphs(&g1, &g2)?);
    assert!(isomorphic_graphs(&g2, &g3)?);
    assert!(g3.equals(&g1)?);
    assert!(g2.equals(&g2)?);
    Ok(())
}

//
// Sub-graphs
//

#[test]
fn sub_graph() -> Result<(), Box<dyn Error>> {
    test_setup();
    let g1 = make_chain("abc");
    let g2 = make_chain("ABCDE");
    let mapping = is_subgraph_of(&g1, &g2)?.ok_or("chain should be a sub-graph")?;
    assert_eq!(mapping.len(), 3);
    assert!(g2.has_subgraph(&g1)?.is_some());
    assert!(is_subgraph_of(&g2, &g1)?.is_none());
    assert!(g1.has_subgraph(&g2)?.is_none());

    // any graph is a sub-graph of itself
    assert!(g2.is_subgraph_of(&g2)?.is_some());
    assert!(g2.is_subgraph_of(&make_chain("VWXYZ"))?.is_some());

    // ... and the empty graph is a sub-graph of any graph
    let empty: Vec<[MyTerm; 3]> = vec![];
    assert_eq!(is_subgraph_of(&empty, &g2)?, Some(BnodeMapping::new()));
    Ok(())
}

#[test]
fn sub_graph_with_constants() -> Result<(), Box<dyn Error>> {
    test_setup();
    let [x, y, p, q, r] = ["x", "y", "p", "q", "r"].map(MyTerm::Bnode);
    let g1 = vec![[x, FOAF_KNOWS, y], [x, FOAF_NAME, LIT_ALICE]];
    let g2 = vec![
        [p, FOAF_KNOWS, q],
        [p, FOAF_NAME, LIT_ALICE],
        [q, FOAF_NAME, LIT_BOB],
        [r, FOAF_KNOWS, p],
    ];
    let mapping = g1.is_subgraph_of(&g2)?.ok_or("g1 should be a sub-graph of g2")?;
    assert_eq!(mapping[&bn("x")], BnodeId::new_unchecked("p"));
    assert_eq!(mapping[&bn("y")], BnodeId::new_unchecked("q"));

    let g3 = vec![[x, FOAF_KNOWS, y], [x, FOAF_NAME, LIT_BOB]];
    assert!(g3.is_subgraph_of(&g2)?.is_none());
    let g4 = vec![[x, FOAF_KNOWS, x]];
    assert!(g4.is_subgraph_of(&g2)?.is_none());
    Ok(())
}

#[test_case("abc", "ABCA", true ; "chain in cycle")]
#[test_case("abca", "ABCD", false ; "cycle not in chain")]
#[test_case("aba", "ABCA", false ; "2-cycle not in 3-cycle")]
#[test_case("abcd", "ABCDEA", true ; "long chain in cycle")]
fn sub_graph_chains(sub: &'static str, sup: &'static str, expected: bool) -> Result<(), Box<dyn Error>> {
    test_setup();
    let g1 = make_chain(sub);
    let g2 = make_chain(sup);
    let found = is_subgraph_of(&g1, &g2)?;
    assert_eq!(found.is_some(), expected);
    if let Some(mapping) = found {
        let targets: BTreeSet<_> = mapping.values().collect();
        assert_eq!(targets.len(), mapping.len());
    }
    Ok(())
}

//
// Diff
//

#[test]
fn diff_equal() -> Result<(), Box<dyn Error>> {
    test_setup();
    let g1 = make_tree("abcdefg");
    let g2 = make_tree("ABCDEFG");
    let diff = graph_diff(&g1, &g2)?;
    assert!(diff.are_equal());
    assert_eq!(diff.mapping().len(), 7);
    assert!(diff.added_triples().is_empty());
    assert!(diff.removed_triples().is_empty());
    assert!(diff.added_subgraphs().is_empty());
    assert!(diff.removed_subgraphs().is_empty());
    Ok(())
}

#[test]
fn diff_ground() -> Result<(), Box<dyn Error>> {
    test_setup();
    let b = MyTerm::Bnode("b");
    let g1 = vec![
        [b, FOAF_NAME, LIT_ALICE],
        [MBOX_ALICE, FOAF_NAME, LIT_ALICE],
        [MBOX_ALICE, FOAF_KNOWS, MBOX_ALICE],
    ];
    let g2 = vec![
        [MyTerm::Bnode("c"), FOAF_NAME, LIT_ALICE],
        [MBOX_ALICE, FOAF_NAME, LIT_ALICE],
        [MBOX_ALICE, FOAF_NAME, LIT_BOB],
    ];
    let diff = g1.difference(&g2)?;
    assert!(!diff.are_equal());
    assert_eq!(
        diff.removed_triples(),
        &[[MBOX_ALICE, FOAF_KNOWS, MBOX_ALICE].map(|t| t.as_simple())]
    );
    assert_eq!(
        diff.added_triples(),
        &[[MBOX_ALICE, FOAF_NAME, LIT_BOB].map(|t| t.as_simple())]
    );
    assert!(diff.added_subgraphs().is_empty());
    assert!(diff.removed_subgraphs().is_empty());
    let b = bn("b");
    assert_eq!(diff.map_bnode(&b), Some(&bn("c")));
    Ok(())
}

#[test]
fn diff_subgraphs() -> Result<(), Box<dyn Error>> {
    test_setup();
    let mut g1 = make_chain("abc");
    g1.append(&mut make_chain("defd"));
    let mut g2 = make_chain("ABC");
    g2.append(&mut make_chain("DEFGD"));
    let diff = graph_diff(&g1, &g2)?;
    assert!(!diff.are_equal());
    assert!(diff.added_triples().is_empty());
    assert!(diff.removed_triples().is_empty());
    assert_eq!(diff.removed_subgraphs().len(), 1);
    assert_eq!(diff.removed_subgraphs()[0].len(), 3);
    assert_eq!(diff.added_subgraphs().len(), 1);
    assert_eq!(diff.added_subgraphs()[0].len(), 4);
    // the matched chains contribute to the mapping
    assert_eq!(diff.mapping().len(), 3);
    Ok(())
}

#[test]
fn diff_several_matched_subgraphs() -> Result<(), Box<dyn Error>> {
    test_setup();
    let mut g1 = make_chain("ab");
    g1.append(&mut make_chain("cde"));
    g1.append(&mut make_chain("fghf"));
    let mut g2 = make_chain("FGHIF");
    g2.append(&mut make_chain("CDE"));
    g2.append(&mut make_chain("AB"));
    let diff = graph_diff(&g1, &g2)?;
    assert!(!diff.are_equal());
    assert_eq!(diff.removed_subgraphs().len(), 1);
    assert_eq!(diff.added_subgraphs().len(), 1);
    assert_eq!(diff.mapping().len(), 5);
    assert_eq!(diff.map_bnode(&bn("a")), Some(&bn("A")));
    assert_eq!(diff.map_bnode(&bn("e")), Some(&bn("E")));
    assert_eq!(diff.map_bnode(&bn("f")), None);
    Ok(())
}

//
// A custom implementation of Term
//

#[derive(Clone, Copy, Debug)]
enum MyTerm {
    Iri(&'static str),
    Bnode(&'static str),
    String(&'static str),
    Number(&'static str),
}

const XSD_INTEGER: IriRef<&str> =
    IriRef::new_unchecked_const("http://www.w3.org/2001/XMLSchema#integer");

impl Term for MyTerm {
    fn kind(&self) -> TermKind {
        match self {
            MyTerm::Iri(_) => TermKind::Iri,
            MyTerm::Bnode(_) => TermKind::BlankNode,
            MyTerm::String(_) => TermKind::Literal,
            MyTerm::Number(_) => TermKind::Literal,
        }
    }

    fn iri(&self) -> Option<IriRef<&str>> {
        if let MyTerm::Iri(iri) = *self {
            Some(IriRef::new_unchecked(iri))
        } else {
            None
        }
    }

    fn bnode_id(&self) -> Option<BnodeId<&str>> {
        if let MyTerm::Bnode(id) = *self {
            Some(BnodeId::new_unchecked(id))
        } else {
            None
        }
    }

    fn lexical_form(&self) -> Option<&str> {
        match *self {
            MyTerm::String(val) | MyTerm::Number(val) => Some(val),
            _ => None,
        }
    }

    fn datatype(&self) -> Option<IriRef<&str>> {
        match self {
            MyTerm::String(_) => Some(XSD_STRING),
            MyTerm::Number(_) => Some(XSD_INTEGER),
            _ => None,
        }
    }

    fn language_tag(&self) -> Option<LanguageTag<&str>> {
        None
    }
}

#[test]
fn my_term() {
    use rdfeq_api::term::term_eq;
    assert!(term_eq(&MyTerm::Iri("tag:1"), &SimpleTerm::iri_unchecked("tag:1")));
    assert!(term_eq(&MyTerm::Bnode("b1"), &SimpleTerm::bnode_unchecked("b1")));
    assert!(term_eq(&MyTerm::String("hello world"), "hello world"));
    assert!(term_eq(
        &MyTerm::Number("42"),
        &SimpleTerm::literal_unchecked("42", XSD_INTEGER.as_str())
    ));
    assert!(!term_eq(&MyTerm::Number("42"), &MyTerm::String("42")));
}
