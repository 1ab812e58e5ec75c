//! Animated breadth/depth-first traversal
//!
//! A traversal run is a sequence of discrete steps, one per visited node,
//! applied with a fixed inter-step delay so a renderer can animate the
//! visitation. The step order is planned synchronously against the
//! immutable graph; a spawned task then applies the tag mutations one tick
//! at a time.
//!
//! At most one run is authoritative. Every run captures a monotonically
//! increasing generation token, and a pending step only applies its
//! mutation if its token is still current. Starting a new run, or
//! rebuilding the graph, bumps the counter and silently discards the
//! remaining steps of any prior run, leaving the tag state consistent with
//! the last fully-applied step.

use crate::graph::{EdgeIdx, Graph, GraphError, GraphResult, NodeId};
use crate::highlight::{HighlightStore, Namespace};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Traversal strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalMode {
    /// FIFO frontier, visits in non-decreasing hop distance
    Bfs,
    /// Explicit-stack depth-first, neighbors in adjacency order
    Dfs,
}

/// One visited node, delivered to the `on_step` callback after its tags
/// have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct TraversalStep {
    /// Zero-based position of this step within the run
    pub order: usize,
    /// The node visited at this step
    pub node: NodeId,
    /// The edge over which the node was first discovered; `None` for the
    /// start node
    pub via: Option<EdgeIdx>,
}

/// Handle to an in-flight traversal run.
#[derive(Debug)]
pub struct TraversalRun {
    token: u64,
    handle: JoinHandle<usize>,
}

impl TraversalRun {
    /// The generation token issued to this run.
    pub fn token(&self) -> u64 {
        self.token
    }

    /// Wait for the run to finish or be superseded; returns the number of
    /// steps that were actually applied.
    pub async fn finished(self) -> usize {
        self.handle.await.unwrap_or(0)
    }
}

/// Cancellable stepwise BFS/DFS executor over a shared highlight store.
pub struct TraversalEngine {
    store: Arc<Mutex<HighlightStore>>,
    generation: Arc<AtomicU64>,
    step_delay: Duration,
}

/// Matches the animation delay of the visualization layer.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(500);

impl TraversalEngine {
    pub fn new(store: Arc<Mutex<HighlightStore>>) -> Self {
        Self::with_step_delay(store, DEFAULT_STEP_DELAY)
    }

    pub fn with_step_delay(store: Arc<Mutex<HighlightStore>>, step_delay: Duration) -> Self {
        TraversalEngine {
            store,
            generation: Arc::new(AtomicU64::new(0)),
            step_delay,
        }
    }

    /// Invalidate all outstanding runs without starting a new one. The
    /// session calls this when the graph is rebuilt.
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Start a traversal from `start`, applying one step per tick.
    ///
    /// Fails with `NodeNotFound` before any mutation if `start` is absent.
    /// Otherwise the traversal namespace is cleared, the previous run (if
    /// any) is invalidated, and a task is spawned that tags each visited
    /// node `visited` and each discovery edge `traversal-highlighted`,
    /// invoking `on_step` after every applied step. Nodes unreachable from
    /// `start` are left untagged; that is expected, not an error.
    ///
    /// Must be called within a tokio runtime.
    pub fn traverse<F>(
        &self,
        graph: &Graph,
        start: &NodeId,
        mode: TraversalMode,
        on_step: F,
    ) -> GraphResult<TraversalRun>
    where
        F: Fn(&TraversalStep) + Send + 'static,
    {
        if !graph.contains(start) {
            return Err(GraphError::NodeNotFound(start.clone()));
        }

        let steps = match mode {
            TraversalMode::Bfs => plan_bfs(graph, start),
            TraversalMode::Dfs => plan_dfs(graph, start),
        };
        debug!(?mode, start = %start, steps = steps.len(), "traversal planned");

        // Supersede any prior run before touching shared state, then clear
        // our own namespace synchronously so stale tags never outlive the
        // call that replaced them.
        let token = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.lock().unwrap().clear(Namespace::Traversal);

        let store = Arc::clone(&self.store);
        let generation = Arc::clone(&self.generation);
        let step_delay = self.step_delay;

        let handle = tokio::spawn(async move {
            let mut applied = 0;
            for step in steps {
                if applied > 0 {
                    tokio::time::sleep(step_delay).await;
                }
                {
                    // The token must be re-read under the store lock:
                    // invalidation is ordered before a rebuild's clear, so
                    // a stale step that was blocked on the lock can never
                    // tag a freshly cleared store.
                    let mut store = store.lock().unwrap();
                    if generation.load(Ordering::SeqCst) != token {
                        debug!(token, applied, "traversal superseded, discarding remaining steps");
                        return applied;
                    }
                    store.tag_node(Namespace::Traversal, step.node.clone());
                    if let Some(edge) = step.via {
                        store.tag_edge(Namespace::Traversal, edge);
                    }
                }
                on_step(&step);
                applied += 1;
            }
            applied
        });

        Ok(TraversalRun { token, handle })
    }
}

/// Plan a breadth-first visitation order. Nodes are marked visited at
/// discovery time, so each reachable node appears exactly once, in
/// non-decreasing hop distance from the start.
fn plan_bfs(graph: &Graph, start: &NodeId) -> Vec<TraversalStep> {
    let mut steps = Vec::new();
    let mut visited = FxHashSet::default();
    let mut frontier: VecDeque<(NodeId, Option<EdgeIdx>)> = VecDeque::new();

    visited.insert(start.clone());
    frontier.push_back((start.clone(), None));

    while let Some((node, via)) = frontier.pop_front() {
        for (neighbor, edge) in graph.neighbors(&node) {
            if visited.insert(neighbor.clone()) {
                frontier.push_back((neighbor.clone(), Some(*edge)));
            }
        }
        steps.push(TraversalStep {
            order: steps.len(),
            node,
            via,
        });
    }

    steps
}

/// Plan a depth-first visitation order with an explicit stack; recursion
/// would overflow on deep graphs. Neighbors are pushed in reverse so they
/// are expanded in adjacency order, and a node is marked visited when
/// popped, which makes the edge stored with the winning push the actual
/// DFS tree edge.
fn plan_dfs(graph: &Graph, start: &NodeId) -> Vec<TraversalStep> {
    let mut steps = Vec::new();
    let mut visited = FxHashSet::default();
    let mut stack: Vec<(NodeId, Option<EdgeIdx>)> = vec![(start.clone(), None)];

    while let Some((node, via)) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        for (neighbor, edge) in graph.neighbors(&node).iter().rev() {
            if !visited.contains(neighbor) {
                stack.push((neighbor.clone(), Some(*edge)));
            }
        }
        steps.push(TraversalStep {
            order: steps.len(),
            node,
            via,
        });
    }

    steps
}
