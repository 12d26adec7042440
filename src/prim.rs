use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use tracing::{trace, warn};

use super::adjmatrix::AdjacencyMatrix;
use super::error::{Error, Result};

/// 候補辺. `(重み, 始点, 終点)` の辞書式順序で比較される.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate(OrderedFloat<f64>, usize, usize);

/// 未訪問の頂点へ向かう候補辺を最小のものから取り出すキュー
///
/// 訪問済みの頂点へ向かう辺は取り除かずに残しておき, 取り出したときに読み飛ばす.
struct Frontier(BinaryHeap<Reverse<Candidate>>);

impl Frontier {
    fn new() -> Self {
        Self(BinaryHeap::new())
    }

    /// 頂点`v`から未訪問の頂点へ向かう辺をすべて追加する.
    fn extend_from(&mut self, adj: &AdjacencyMatrix, v: usize, visited: &[bool]) {
        self.0.extend(
            adj.neighbors(v)
                .filter(|&(u, _)| !visited[u])
                .map(|(u, w)| Reverse(Candidate(OrderedFloat(w), v, u))),
        );
    }

    fn pop(&mut self) -> Option<Candidate> {
        self.0.pop().map(|Reverse(c)| c)
    }
}

/// 頂点`root`から木を伸ばしていき, `visited` と `out` を更新する.
///
/// 訪問済みの頂点の総数`count`が`stop_at`に達するか, 候補辺が尽きたときに停止する.
/// 返り値は停止したときの訪問済みの頂点の総数.
fn grow(
    adj: &AdjacencyMatrix,
    root: usize,
    visited: &mut [bool],
    mut count: usize,
    stop_at: usize,
    out: &mut AdjacencyMatrix,
) -> usize {
    debug_assert!(!visited[root]);
    visited[root] = true;
    count += 1;
    let mut frontier = Frontier::new();
    frontier.extend_from(adj, root, visited);
    while count < stop_at {
        let Some(Candidate(OrderedFloat(w), s, d)) = frontier.pop() else {
            break;
        };
        if visited[d] {
            continue;
        }
        visited[d] = true;
        count += 1;
        trace!(source = s, destination = d, weight = w, "tree edge");
        out.set_edge(s, d, w);
        frontier.extend_from(adj, d, visited);
    }
    count
}

/// プリム法で頂点0を含む連結成分の最小全域木を構築し, 隣接行列として返す.
///
/// 訪問済みの頂点数が孤立していない頂点の数に達するまで辺を追加する.
/// 重みが等しい辺は始点の番号が小さいもの, 次いで終点の番号が小さいものが優先される.
///
/// # Constraints
///
/// - `adj` は対称で, 成分はすべて非負
///
/// # Errors
///
/// - `adj` の頂点数が0なら `Error::InvalidInput`
/// - 頂点0から到達できない, 孤立していない頂点がある場合は `Error::QueueUnderflow`
///
/// # Time complexity
///
/// - *O*(*N*² log *N*)
pub fn prim(adj: &AdjacencyMatrix) -> Result<AdjacencyMatrix> {
    let n = adj.len();
    if n == 0 {
        return Err(Error::invalid_input("graph has no vertices"));
    }
    let expected = adj.non_isolated_count();
    let mut visited = vec![false; n].into_boxed_slice();
    let mut out = AdjacencyMatrix::zeros(n);
    let count = grow(adj, 0, &mut visited, 0, expected, &mut out);
    if count < expected {
        warn!(visited = count, expected, "candidate queue exhausted");
        return Err(Error::QueueUnderflow {
            visited: count,
            expected,
        });
    }
    Ok(out)
}

/// プリム法で最小全域森を構築し, 隣接行列として返す.
///
/// 頂点0と, 孤立していない未訪問の頂点を番号の小さい順に根として, 連結成分ごとに木を伸ばす.
/// 連結なグラフに対しては `prim` と同じ結果を返す.
///
/// # Constraints
///
/// - `adj` は対称で, 成分はすべて非負
///
/// # Time complexity
///
/// - *O*(*N*² log *N*)
#[must_use]
pub fn prim_forest(adj: &AdjacencyMatrix) -> AdjacencyMatrix {
    let n = adj.len();
    let mut visited = vec![false; n].into_boxed_slice();
    let mut out = AdjacencyMatrix::zeros(n);
    let mut count = 0;
    for root in 0..n {
        if visited[root] || (root != 0 && adj.neighbors(root).next().is_none()) {
            continue;
        }
        count = grow(adj, root, &mut visited, count, usize::MAX, &mut out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> AdjacencyMatrix {
        AdjacencyMatrix::from_rows(&[
            [0.0, 5.0, 3.0, 1.0],
            [5.0, 0.0, 4.0, 2.0],
            [3.0, 4.0, 0.0, 5.0],
            [1.0, 2.0, 5.0, 0.0],
        ])
        .unwrap()
    }

    #[test]
    fn candidate_order() {
        let a = Candidate(OrderedFloat(1.0), 2, 3);
        let b = Candidate(OrderedFloat(1.0), 1, 5);
        let c = Candidate(OrderedFloat(0.5), 9, 9);
        let mut heap = BinaryHeap::from([Reverse(a), Reverse(b), Reverse(c)]);
        assert_eq!(heap.pop(), Some(Reverse(c)));
        assert_eq!(heap.pop(), Some(Reverse(b)));
        assert_eq!(heap.pop(), Some(Reverse(a)));
    }

    #[test]
    fn small_graph() {
        let mst = prim(&small()).unwrap();
        assert_eq!(mst.edges().collect::<Vec<_>>(), [(0, 2, 3.0), (0, 3, 1.0), (1, 3, 2.0)]);
    }

    #[test]
    fn tie_break_prefers_smaller_source() {
        // 0-1, 0-2, 1-2 がすべて重み1
        let adj = AdjacencyMatrix::from_rows(&[[0.0, 1.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]])
            .unwrap();
        let mst = prim(&adj).unwrap();
        assert_eq!(mst.edges().collect::<Vec<_>>(), [(0, 1, 1.0), (0, 2, 1.0)]);
    }

    #[test]
    fn two_components() {
        let adj = AdjacencyMatrix::from_rows(&[
            [0.0, 1.0, 0.0, 0.0],
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0, 7.0],
            [0.0, 0.0, 7.0, 0.0],
        ])
        .unwrap();
        assert!(matches!(
            prim(&adj),
            Err(Error::QueueUnderflow {
                visited: 2,
                expected: 4
            })
        ));
        let forest = prim_forest(&adj);
        assert_eq!(forest.edges().collect::<Vec<_>>(), [(0, 1, 1.0), (2, 3, 7.0)]);
    }

    #[test]
    fn isolated_root() {
        let adj = AdjacencyMatrix::from_rows(&[[0.0, 0.0, 0.0], [0.0, 0.0, 2.0], [0.0, 2.0, 0.0]])
            .unwrap();
        assert!(matches!(prim(&adj), Err(Error::QueueUnderflow { .. })));
        assert_eq!(prim_forest(&adj).edges().collect::<Vec<_>>(), [(1, 2, 2.0)]);
    }

    #[test]
    fn no_edges() {
        let adj = AdjacencyMatrix::zeros(3);
        assert_eq!(prim(&adj).unwrap(), adj);
        assert_eq!(prim_forest(&adj), adj);
    }
}
