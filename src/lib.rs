//! 密な隣接行列で与えられた重み付き無向グラフから, プリム法で最小全域木を構築する.
//!
//! 点の座標から `distance::pairwise_distances` で距離行列を作り, それをグラフとして扱うこともできる.

pub mod adjmatrix;
pub mod distance;
pub mod error;
pub mod graph;
pub mod kruskal;
pub mod loader;
pub mod prim;
pub mod unionfind;
pub mod verify;

pub use adjmatrix::AdjacencyMatrix;
pub use error::{Error, Result};
pub use graph::{Graph, GraphSource, SpanningTree};
