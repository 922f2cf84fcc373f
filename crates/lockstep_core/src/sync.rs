//! The orchestrating state machine.
//!
//! A [`Synchronizer`] owns both [`TreeWalker`]s and drives the comparison
//! round by round: pull one emission from each side whose advance flag is
//! set, check for completion, classify the paired nodes, then either
//! advance, auto-skip one side, or halt for arbitration.
//!
//! Arbitration is a seam, not a transport: the machine asks an injected
//! [`DecisionSource`] for exactly one [`Decision`] and never touches stdin
//! itself, so tests drive it with a scripted source.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use lockstep_ast::{NodeId, NodeKind, SourceFile, Tree};

use crate::walk::{Emission, TreeWalker};
use crate::{
    Classification, CompareConfig, DivergencePolicy, Side, SyncError, classify, snippet,
};

/// One parsed program handed to the synchronizer.
#[derive(Debug, Clone)]
pub struct CompareInput {
    /// The syntax tree, shared with the walker thread.
    pub tree: Arc<Tree>,
    /// The source the tree was built from, for excerpt rendering.
    pub source: Arc<SourceFile>,
}

impl CompareInput {
    /// Wraps a parsed tree and its source.
    pub fn new(tree: Tree, source: SourceFile) -> Self {
        Self {
            tree: Arc::new(tree),
            source: Arc::new(source),
        }
    }
}

/// The synchronizer's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    /// Comparing rounds without operator involvement.
    Running,
    /// Halted on an unresolved mismatch, waiting for a decision.
    AwaitingArbitration,
    /// Both traversals ended together. Terminal.
    Finished,
    /// One tree ended with non-skippable nodes pending on the other.
    /// Terminal.
    DivergentTermination,
}

/// Terminal result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both trees exhausted cleanly.
    Finished,
    /// One tree exhausted while the other still had pending nodes.
    DivergentTermination {
        /// The side whose traversal had nodes left.
        pending: Side,
    },
}

/// Summary returned when a run terminates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// How the run ended.
    pub outcome: Outcome,
    /// Number of comparison rounds, auto-skip re-runs included.
    pub rounds: usize,
    /// Number of times the run halted for arbitration.
    pub arbitrations: usize,
    /// Nodes emitted by the left traversal.
    pub emitted_left: usize,
    /// Nodes emitted by the right traversal.
    pub emitted_right: usize,
}

impl SyncReport {
    /// True when the run finished with no mismatch the operator had to
    /// resolve.
    pub fn is_clean(&self) -> bool {
        self.outcome == Outcome::Finished && self.arbitrations == 0
    }
}

/// An arbitration verdict: which side(s) to advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    AdvanceLeft,
    AdvanceRight,
    AdvanceBoth,
}

/// Which node of a traversal position to inspect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InspectTarget {
    /// The node awaiting comparison.
    Current,
    /// Its parent in the traversal.
    Parent,
    /// The previously consumed node.
    Previous,
}

/// Supplies one decision per arbitration halt.
///
/// Inspection (rendering nodes, reprinting menus) happens inside the
/// source; the state machine only ever sees the final decision.
pub trait DecisionSource {
    /// Returns the decision for the given halt.
    fn decide(&mut self, ctx: &ArbitrationContext<'_>) -> Result<Decision, SyncError>;
}

impl<F> DecisionSource for F
where
    F: FnMut(&ArbitrationContext<'_>) -> Result<Decision, SyncError>,
{
    fn decide(&mut self, ctx: &ArbitrationContext<'_>) -> Result<Decision, SyncError> {
        self(ctx)
    }
}

/// A pre-recorded decision sequence, for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDecisions {
    queue: VecDeque<Decision>,
}

impl ScriptedDecisions {
    /// Creates a source that yields the given decisions in order.
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            queue: decisions.into_iter().collect(),
        }
    }
}

impl DecisionSource for ScriptedDecisions {
    fn decide(&mut self, _ctx: &ArbitrationContext<'_>) -> Result<Decision, SyncError> {
        self.queue
            .pop_front()
            .ok_or(SyncError::DecisionSourceClosed)
    }
}

/// Read-only view of a halted round, handed to the decision source.
pub struct ArbitrationContext<'a> {
    classification: &'a Classification,
    round: usize,
    config: &'a CompareConfig,
    left: SideView<'a>,
    right: SideView<'a>,
}

struct SideView<'a> {
    tree: &'a Tree,
    source: &'a SourceFile,
    current: Option<Emission>,
    previous: Option<NodeId>,
}

impl ArbitrationContext<'_> {
    /// The classification that caused the halt.
    pub fn classification(&self) -> &Classification {
        self.classification
    }

    /// The round number of the halted comparison (1-based).
    pub fn round(&self) -> usize {
        self.round
    }

    /// The path label of the given side's source.
    pub fn path(&self, side: Side) -> &Path {
        self.view(side).source.path()
    }

    /// The kind of the targeted node, if it exists at this position.
    pub fn kind(&self, side: Side, target: InspectTarget) -> Option<NodeKind> {
        let view = self.view(side);
        self.target_id(side, target)
            .map(|id| view.tree.node(id).kind)
    }

    /// Renders the targeted node as a truncated position + excerpt line.
    pub fn render(&self, side: Side, target: InspectTarget) -> Option<String> {
        let view = self.view(side);
        self.target_id(side, target)
            .map(|id| snippet::render(view.tree, view.source, id, self.config))
    }

    /// Renders the targeted node without truncation.
    pub fn render_full(&self, side: Side, target: InspectTarget) -> Option<String> {
        let view = self.view(side);
        self.target_id(side, target)
            .map(|id| snippet::render_full(view.tree, view.source, id, self.config))
    }

    fn view(&self, side: Side) -> &SideView<'_> {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn target_id(&self, side: Side, target: InspectTarget) -> Option<NodeId> {
        let view = self.view(side);
        match target {
            InspectTarget::Current => view.current.map(|e| e.node),
            InspectTarget::Parent => view.current.and_then(|e| e.parent),
            InspectTarget::Previous => view.previous,
        }
    }
}

/// One side's traversal position, mutated only by the synchronizer.
struct SideState {
    input: CompareInput,
    walker: TreeWalker,
    current: Option<Emission>,
    previous: Option<NodeId>,
    emitted: usize,
    advance: bool,
    exhausted: bool,
}

impl SideState {
    fn new(input: CompareInput, side: Side) -> Self {
        let walker = TreeWalker::spawn(Arc::clone(&input.tree), side.label());
        Self {
            input,
            walker,
            current: None,
            previous: None,
            emitted: 0,
            advance: true,
            exhausted: false,
        }
    }

    /// Consumes the next emission, or marks the side exhausted on
    /// disconnect. Clears the advance flag either way.
    fn pull(&mut self) {
        self.advance = false;
        match self.walker.next_emission() {
            Some(emission) => {
                self.previous = self.current.map(|e| e.node);
                self.current = Some(emission);
                self.emitted += 1;
            }
            None => {
                self.exhausted = true;
                self.current = None;
            }
        }
    }

    fn current_node(&self) -> Option<NodeId> {
        self.current.map(|e| e.node)
    }

    fn view(&self) -> SideView<'_> {
        SideView {
            tree: &self.input.tree,
            source: &self.input.source,
            current: self.current,
            previous: self.previous,
        }
    }
}

/// Drives both walkers through lock-step comparison rounds.
pub struct Synchronizer<D> {
    left: SideState,
    right: SideState,
    config: CompareConfig,
    policy: DivergencePolicy,
    decisions: D,
    state: SyncState,
    rounds: usize,
    arbitrations: usize,
}

impl<D: DecisionSource> Synchronizer<D> {
    /// Spawns both walkers and prepares the first round.
    pub fn new(
        left: CompareInput,
        right: CompareInput,
        config: CompareConfig,
        decisions: D,
    ) -> Self {
        let policy = DivergencePolicy::new(&config);
        Self {
            left: SideState::new(left, Side::Left),
            right: SideState::new(right, Side::Right),
            config,
            policy,
            decisions,
            state: SyncState::Running,
            rounds: 0,
            arbitrations: 0,
        }
    }

    /// The current state of the machine.
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Runs rounds to a terminal state.
    ///
    /// Errors only surface from the decision source; mismatches themselves
    /// are round results, not errors.
    pub fn run(mut self) -> Result<SyncReport, SyncError> {
        loop {
            if self.left.advance {
                self.left.pull();
            }
            if self.right.advance {
                self.right.pull();
            }

            match (self.left.exhausted, self.right.exhausted) {
                (true, true) => {
                    self.state = SyncState::Finished;
                    info!(rounds = self.rounds, "both traversals finished");
                    return Ok(self.report(Outcome::Finished));
                }
                (false, false) => {}
                (left_done, _) => {
                    let live = if left_done {
                        &mut self.right
                    } else {
                        &mut self.left
                    };
                    let pending = if left_done { Side::Right } else { Side::Left };
                    // A trailing run of skippable nodes may still drain
                    // before the size mismatch is final.
                    let current = live.current_node().expect("live side has a current node");
                    let kind = live.input.tree.node(current).kind;
                    if self.policy.is_skippable(kind) {
                        debug!(%pending, %kind, "draining trailing skippable node");
                        live.advance = true;
                        continue;
                    }
                    self.state = SyncState::DivergentTermination;
                    info!(%pending, "size mismatch: one traversal finished early");
                    return Ok(self.report(Outcome::DivergentTermination { pending }));
                }
            }

            self.rounds += 1;
            let classification = classify(
                &self.left.input.tree,
                self.left.current_node().expect("left side has a current node"),
                &self.right.input.tree,
                self.right.current_node().expect("right side has a current node"),
            );
            debug!(round = self.rounds, %classification, "classified pair");

            match classification {
                Classification::Same => {
                    if self.config.display_intermediate {
                        self.log_matched_pair();
                    }
                    self.left.advance = true;
                    self.right.advance = true;
                }
                Classification::TypeMismatch { left, right } => {
                    match self.policy.resolve(left, right) {
                        Some(Side::Left) => {
                            debug!(kind = %left, "auto-skip left");
                            self.left.advance = true;
                        }
                        Some(Side::Right) => {
                            debug!(kind = %right, "auto-skip right");
                            self.right.advance = true;
                        }
                        None => self.arbitrate(&classification)?,
                    }
                }
                Classification::ValueMismatch { .. } => self.arbitrate(&classification)?,
            }
        }
    }

    fn arbitrate(&mut self, classification: &Classification) -> Result<(), SyncError> {
        self.state = SyncState::AwaitingArbitration;
        self.arbitrations += 1;
        info!(round = self.rounds, %classification, "awaiting arbitration");

        let ctx = ArbitrationContext {
            classification,
            round: self.rounds,
            config: &self.config,
            left: self.left.view(),
            right: self.right.view(),
        };
        let decision = self.decisions.decide(&ctx)?;
        debug!(?decision, "arbitration decision");

        match decision {
            Decision::AdvanceLeft => self.left.advance = true,
            Decision::AdvanceRight => self.right.advance = true,
            Decision::AdvanceBoth => {
                self.left.advance = true;
                self.right.advance = true;
            }
        }
        self.state = SyncState::Running;
        Ok(())
    }

    fn log_matched_pair(&self) {
        for (side, state) in [(Side::Left, &self.left), (Side::Right, &self.right)] {
            if let Some(id) = state.current_node() {
                info!(
                    "matched {side}: {}",
                    snippet::render(&state.input.tree, &state.input.source, id, &self.config)
                );
            }
        }
    }

    fn report(&self, outcome: Outcome) -> SyncReport {
        SyncReport {
            outcome,
            rounds: self.rounds,
            arbitrations: self.arbitrations,
            emitted_left: self.left.emitted,
            emitted_right: self.right.emitted,
        }
    }
}
