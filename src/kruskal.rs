use ordered_float::OrderedFloat;

use super::adjmatrix::AdjacencyMatrix;
use super::unionfind::UnionFind;

/// クラスカル法で最小全域森を構築し, 採用した辺を `(i, j, 重み)` の形で返す.
///
/// 連結でないグラフが与えられた場合は連結成分ごとの最小全域木を合わせたものになる.
///
/// # Time complexity
///
/// - *O*(*N*² log *N*)
#[must_use]
pub fn kruskal(adj: &AdjacencyMatrix) -> Vec<(usize, usize, f64)> {
    let mut edges = adj.edges().collect::<Vec<_>>();
    edges.sort_unstable_by_key(|&(i, j, w)| (OrderedFloat(w), i, j));
    let mut uf = UnionFind::new(adj.len());
    edges.retain(|&(i, j, _)| uf.union(i, j));
    edges
}

/// 最小全域森の辺の重みの総和を返す.
#[must_use]
pub fn kruskal_weight(adj: &AdjacencyMatrix) -> f64 {
    kruskal(adj).into_iter().map(|(_, _, w)| w).sum()
}
