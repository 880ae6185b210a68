//! FLUX Core: Network Flow Computation Engine
//!
//! This crate implements maximum-flow computation over finite flow networks
//! through two independent algorithm families: Dinic's blocking-flow method
//! with capacity scaling, and Goldberg-Tarjan push-relabel with
//! relabel-to-front vertex selection.
//!
//! # Architecture
//!
//! - [`algorithm::flow::residual`]: arena-allocated residual graph with
//!   paired forward/reverse edge records and integer cross-indices.
//! - [`algorithm::flow::dinic`]: layered BFS level graphs, cursor-bounded
//!   iterative augmentation, and the bit-threshold scaling driver.
//! - [`algorithm::flow::push_relabel`]: dense-matrix flow networks with
//!   virtual-terminal normalization and the preflow discharge loop.
//! - [`algorithm::flow::solver`]: strategy-selected solver facade with
//!   per-run operation metrics.
//! - [`validation::correctness`]: conservation, capacity, and min-cut
//!   equivalence validators for cross-checking solver output.
//!
//! Every query owns its own network instance; nothing is shared across
//! concurrent invocations and no state survives a completed query.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

pub mod algorithm;
pub mod validation;

pub use algorithm::flow::{
    build_flow_network, max_flow, push_relabel_max_flow, FlowNetwork, MaxFlowSolver,
    ResidualGraph,
};
pub use algorithm::traits::{Capacity, Flow, FlowError, MaxFlowAlgorithm, NodeId};
