use callgraph_engine::{
    GraphError, GraphSession, Namespace, NodeId, Record, TraversalMode,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn records(pairs: &[(&str, &str)]) -> Vec<Record> {
    pairs
        .iter()
        .map(|(s, t)| {
            let mut r = Record::new();
            r.insert("caller".to_string(), s.to_string());
            r.insert("callee".to_string(), t.to_string());
            r
        })
        .collect()
}

fn session(pairs: &[(&str, &str)], delay_ms: u64) -> GraphSession {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let mut session = GraphSession::with_step_delay(Duration::from_millis(delay_ms));
    session.ingest(&records(pairs), "caller", "callee");
    session
}

#[test]
fn node_count_matches_unique_ids() {
    let pairs = [("a", "b"), ("b", "c"), ("a", "c"), ("c", "a"), ("d", "d")];
    let session = session(&pairs, 0);

    let unique: HashSet<&str> = pairs.iter().flat_map(|(s, t)| [*s, *t]).collect();
    assert_eq!(session.graph().unwrap().node_count(), unique.len());
}

#[tokio::test(start_paused = true)]
async fn bfs_visits_in_hop_distance_order() {
    let session = session(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "e")], 10);

    let steps = Arc::new(Mutex::new(Vec::new()));
    let steps2 = Arc::clone(&steps);
    let run = session
        .traverse(TraversalMode::Bfs, None, move |step| {
            steps2.lock().unwrap().push(step.node.clone());
        })
        .unwrap();
    assert_eq!(run.finished().await, 5);

    let order = steps.lock().unwrap();
    let hop = |id: &str| match id {
        "a" => 0,
        "b" | "c" => 1,
        _ => 2,
    };
    for pair in order.windows(2) {
        assert!(hop(pair[0].as_str()) <= hop(pair[1].as_str()));
    }
}

#[tokio::test(start_paused = true)]
async fn bfs_and_dfs_reach_the_same_nodes() {
    let session = session(
        &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("x", "y")],
        0,
    );
    let store = session.highlight_store();

    let mut reached = Vec::new();
    for mode in [TraversalMode::Bfs, TraversalMode::Dfs] {
        let run = session.traverse(mode, None, |_| {}).unwrap();
        run.finished().await;
        let store = store.lock().unwrap();
        let set: HashSet<NodeId> = ["a", "b", "c", "d", "x", "y"]
            .into_iter()
            .map(NodeId::new)
            .filter(|id| store.node_has(Namespace::Traversal, id))
            .collect();
        reached.push(set);
    }

    assert_eq!(reached[0], reached[1]);
    assert_eq!(reached[0].len(), 4);
    assert!(!reached[0].contains(&NodeId::new("x")));
}

#[tokio::test(start_paused = true)]
async fn ingest_cancels_inflight_traversal() {
    let mut session = session(
        &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e"), ("e", "f")],
        100,
    );

    let run = session.traverse(TraversalMode::Bfs, None, |_| {}).unwrap();
    tokio::task::yield_now().await;

    // Rebuilding the graph invalidates the run's generation token; its
    // remaining steps must be silently discarded.
    session.ingest(&records(&[("p", "q")]), "caller", "callee");
    let applied = run.finished().await;
    assert!(applied < 6);

    tokio::time::sleep(Duration::from_secs(2)).await;
    let store = session.highlight_store();
    let store = store.lock().unwrap();
    // No tag from the cancelled run survives the rebuild, and no stale
    // step was applied afterwards.
    assert_eq!(store.node_tag_count(Namespace::Traversal), 0);
    assert!(!store.node_has(Namespace::Traversal, &NodeId::new("a")));
}

#[test]
fn analyzer_namespaces_are_independent() {
    let session = session(&[("a", "b"), ("a", "c"), ("a", "d")], 0);

    let hubs = session.detect_hubs(None).unwrap();
    let clustered = session.cluster_by_frequency().unwrap();
    assert_eq!(hubs.len(), 1);
    assert_eq!(clustered.len(), 1);

    // Re-running one analyzer leaves the other's tags intact.
    session.cluster_by_frequency().unwrap();
    let store = session.highlight_store();
    let store = store.lock().unwrap();
    assert!(store.node_has(Namespace::Hub, &NodeId::new("a")));
    assert!(store.node_has(Namespace::Frequency, &NodeId::new("a")));
}

#[test]
fn repeated_analyzer_calls_are_idempotent() {
    let session = session(&[("a", "b"), ("a", "c"), ("a", "d"), ("b", "c")], 0);

    assert_eq!(
        session.detect_hubs(None).unwrap(),
        session.detect_hubs(None).unwrap()
    );
    assert_eq!(
        session.cluster_by_frequency().unwrap(),
        session.cluster_by_frequency().unwrap()
    );
}

#[test]
fn shortest_path_examples() {
    let session = session(&[("a", "b"), ("b", "c"), ("c", "d"), ("x", "y")], 0);

    let path = session
        .shortest_path(&NodeId::new("a"), &NodeId::new("d"))
        .unwrap();
    assert_eq!(path.distance(), 3);
    let names: Vec<&str> = path.nodes().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d"]);

    let same = session
        .shortest_path(&NodeId::new("a"), &NodeId::new("a"))
        .unwrap();
    assert_eq!(same.distance(), 0);

    let err = session
        .shortest_path(&NodeId::new("a"), &NodeId::new("y"))
        .unwrap_err();
    assert!(matches!(err, GraphError::NoPath { .. }));
}

#[test]
fn centrality_feeds_snapshot() {
    let mut session = session(&[("x", "l1"), ("x", "l2"), ("x", "l3")], 0);
    session.compute_centrality().unwrap();

    let snapshot = session.snapshot();
    let center = snapshot.nodes.iter().find(|n| n.id.as_str() == "x").unwrap();
    assert_eq!(center.centrality, 1.0);
    assert!(snapshot
        .nodes
        .iter()
        .filter(|n| n.id.as_str() != "x")
        .all(|n| n.centrality == 0.0));
}

#[test]
fn export_import_roundtrip() {
    let mut session = session(&[("a", "b"), ("b", "c"), ("a", "b")], 0);
    // An isolated node survives the roundtrip via its tagged row.
    session.import_csv("edge,a,b\nedge,b,c\nedge,a,b\nnode,z,Zombie\n");
    let csv = callgraph_engine::io::to_csv(session.graph().unwrap());

    let mut fresh = GraphSession::new();
    let report = fresh.import_csv(&csv);
    assert_eq!(report.node_count, 4);
    assert_eq!(report.edge_count, 3);
    assert!(report.skipped.is_empty());

    let z = fresh.graph().unwrap().node(&NodeId::new("z")).unwrap();
    assert_eq!(z.label, "Zombie");
}
