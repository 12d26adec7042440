use super::adjmatrix::AdjacencyMatrix;
use super::graph::SpanningTree;
use super::unionfind::UnionFind;

/// 全域木を検査したときに満たされていなかった条件
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum VerifyError {
    #[error("tree weight {actual} differs from expected {expected}")]
    WeightMismatch { expected: f64, actual: f64 },

    #[error("tree has {actual} vertices, graph has {expected}")]
    VertexCountMismatch { expected: usize, actual: usize },

    #[error("tree has {actual} non-zero entries, expected {expected}")]
    EdgeCountMismatch { expected: usize, actual: usize },

    #[error("tree edges contain a cycle")]
    Cycle,

    #[error("tree reaches {reached} of the {expected} vertices connected to vertex 0")]
    NotSpanning { expected: usize, reached: usize },
}

/// 全域木の大きさ, 重み, 連結性をまとめたもの
#[derive(Debug, Clone, PartialEq)]
pub struct TreeReport {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub nonzero_entries: usize,
    pub total_weight: f64,
    /// 元のグラフで頂点0を含む連結成分の頂点数
    pub component_size: usize,
    /// 木の辺に閉路が無いか
    pub acyclic: bool,
    /// 木の中で頂点0と連結な頂点数
    pub reached: usize,
}

impl TreeReport {
    /// `adj` から構築された全域木 `tree` を調べる.
    ///
    /// # Time complexity
    ///
    /// - *O*(*N*²)
    #[must_use]
    pub fn of(adj: &AdjacencyMatrix, tree: &SpanningTree) -> Self {
        let mut graph = UnionFind::new(adj.len());
        for (i, j, _) in adj.edges() {
            graph.union(i, j);
        }
        let component_size = if graph.is_empty() { 0 } else { graph.size(0) };

        let (acyclic, reached) = match tree.as_matrix() {
            None => (true, 1),
            Some(m) => {
                let mut uf = UnionFind::new(m.len());
                let acyclic = m.edges().fold(true, |ok, (i, j, _)| uf.union(i, j) && ok);
                let reached = if uf.is_empty() { 0 } else { uf.size(0) };
                (acyclic, reached)
            }
        };

        Self {
            vertex_count: tree.len(),
            edge_count: tree.edge_count(),
            nonzero_entries: tree.nonzero_entries(),
            total_weight: tree.total_weight(),
            component_size,
            acyclic,
            reached,
        }
    }

    /// 木が頂点0を含む連結成分を, 閉路を作らずに張っているか
    #[must_use]
    pub fn spans_component(&self) -> bool {
        self.acyclic && self.reached == self.component_size
    }
}

/// `tree` が `adj` の最小全域木として正しいかを検査する.
///
/// 以下の条件を順に確かめる.
///
/// - 辺の重みの総和と `expected_weight` の差が `tol` 未満
/// - 頂点数が元のグラフと等しい
/// - 0でない成分の数が「孤立していない頂点の数 - 1」の2倍
/// - 閉路が無く, 頂点0を含む連結成分をすべて張っている
///
/// # Errors
///
/// 最初に満たされなかった条件を `VerifyError` として返す.
pub fn check_mst(
    adj: &AdjacencyMatrix,
    tree: &SpanningTree,
    expected_weight: f64,
    tol: f64,
) -> Result<TreeReport, VerifyError> {
    let report = TreeReport::of(adj, tree);
    if (report.total_weight - expected_weight).abs() >= tol {
        return Err(VerifyError::WeightMismatch {
            expected: expected_weight,
            actual: report.total_weight,
        });
    }
    if report.vertex_count != adj.len() {
        return Err(VerifyError::VertexCountMismatch {
            expected: adj.len(),
            actual: report.vertex_count,
        });
    }
    let expected_entries = adj.non_isolated_count().saturating_sub(1) * 2;
    if report.nonzero_entries != expected_entries {
        return Err(VerifyError::EdgeCountMismatch {
            expected: expected_entries,
            actual: report.nonzero_entries,
        });
    }
    if !report.acyclic {
        return Err(VerifyError::Cycle);
    }
    if !report.spans_component() {
        return Err(VerifyError::NotSpanning {
            expected: report.component_size,
            reached: report.reached,
        });
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> AdjacencyMatrix {
        AdjacencyMatrix::from_rows(&[[0.0, 1.0, 3.0], [1.0, 0.0, 2.0], [3.0, 2.0, 0.0]]).unwrap()
    }

    #[test]
    fn accepts_minimum_tree() {
        let tree = SpanningTree::Matrix(
            AdjacencyMatrix::from_rows(&[[0.0, 1.0, 0.0], [1.0, 0.0, 2.0], [0.0, 2.0, 0.0]])
                .unwrap(),
        );
        let report = check_mst(&triangle(), &tree, 3.0, 1e-4).unwrap();
        assert_eq!(report.edge_count, 2);
        assert_eq!(report.component_size, 3);
        assert!(report.spans_component());
    }

    #[test]
    fn rejects_heavier_tree() {
        let tree = SpanningTree::Matrix(
            AdjacencyMatrix::from_rows(&[[0.0, 1.0, 3.0], [1.0, 0.0, 0.0], [3.0, 0.0, 0.0]])
                .unwrap(),
        );
        assert_eq!(
            check_mst(&triangle(), &tree, 3.0, 1e-4),
            Err(VerifyError::WeightMismatch {
                expected: 3.0,
                actual: 4.0
            })
        );
    }

    #[test]
    fn rejects_cycle() {
        let tree = SpanningTree::Matrix(triangle());
        let report = TreeReport::of(&triangle(), &tree);
        assert!(!report.acyclic);
        assert_eq!(
            check_mst(&triangle(), &tree, 6.0, 1e-4),
            Err(VerifyError::EdgeCountMismatch {
                expected: 4,
                actual: 6
            })
        );
    }

    #[test]
    fn singleton() {
        let adj = AdjacencyMatrix::zeros(1);
        let report = check_mst(&adj, &SpanningTree::Singleton, 0.0, 1e-4).unwrap();
        assert_eq!(report.vertex_count, 1);
        assert_eq!(report.edge_count, 0);
    }
}
