//! Maximum flow algorithm implementations
//!
//! Two algorithm families over one problem: augmenting-path search on an
//! arena-allocated residual graph (Dinic with capacity scaling), and
//! preflow discharge on a dense capacity matrix (push-relabel with
//! relabel-to-front). The [`solver`] module binds both behind a single
//! strategy enumeration.

pub mod dinic;
pub mod push_relabel;
pub mod residual;
pub mod solver;

pub use self::dinic::{max_flow, max_flow_detailed, min_cut, DinicMetrics, MaxFlowOutcome};
pub use self::push_relabel::{push_relabel_max_flow, FlowNetwork, PushRelabelMetrics};
pub use self::residual::{build_flow_network, FlowEdge, ResidualGraph};
pub use self::solver::{FlowMetrics, MaxFlowSolver};
