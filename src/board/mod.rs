//! The pitch: a fixed 12-node graph with per-node occupant sets.
//!
//! ## Key Types
//!
//! - `NodeId`: Checked node identifier (1..=12)
//! - `Board`: Occupancy tracking and movement
//! - `NodeView`: Read-only view of one node
//!
//! Nodes 1 and 12 are the goal (goalkeeper) nodes.

pub mod graph;
pub mod node;

pub use graph::{Board, NodeView};
pub use node::{NodeId, NODE_COUNT};
