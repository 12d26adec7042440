use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::debug;

use super::adjmatrix::AdjacencyMatrix;
use super::error::{Error, Result};
use super::loader::load_adjacency_csv;
use super::prim::{prim, prim_forest};

/// `Graph` を作るときの入力. 行列そのものか, 行列が書かれたファイルへのパス.
#[derive(Clone, Debug)]
pub enum GraphSource {
    /// 検査済みの隣接行列
    Matrix(AdjacencyMatrix),
    /// 正方行列であるかをまだ検査していない行列
    Array(Array2<f64>),
    /// `,` 区切りの行列ファイル
    Path(PathBuf),
}

impl From<AdjacencyMatrix> for GraphSource {
    fn from(m: AdjacencyMatrix) -> Self {
        Self::Matrix(m)
    }
}
impl From<Array2<f64>> for GraphSource {
    fn from(a: Array2<f64>) -> Self {
        Self::Array(a)
    }
}
impl From<PathBuf> for GraphSource {
    fn from(p: PathBuf) -> Self {
        Self::Path(p)
    }
}
impl From<&Path> for GraphSource {
    fn from(p: &Path) -> Self {
        Self::Path(p.to_owned())
    }
}
impl From<&str> for GraphSource {
    fn from(p: &str) -> Self {
        Self::Path(p.into())
    }
}
impl From<String> for GraphSource {
    fn from(p: String) -> Self {
        Self::Path(p.into())
    }
}

/// 構築された最小全域木
#[derive(Clone, Debug, PartialEq)]
pub enum SpanningTree {
    /// 頂点が1つだけのグラフの全域木. 辺を持たないので行列ではなくスカラーの0として扱う.
    Singleton,
    /// 元のグラフと同じ大きさの隣接行列で表した全域木 (森)
    Matrix(AdjacencyMatrix),
}

impl SpanningTree {
    /// 行列で表されていればその行列を返す.
    #[must_use]
    pub fn as_matrix(&self) -> Option<&AdjacencyMatrix> {
        match self {
            Self::Singleton => None,
            Self::Matrix(m) => Some(m),
        }
    }

    /// 頂点数を返す.
    #[must_use]
    pub fn len(&self) -> usize {
        self.as_matrix().map_or(1, AdjacencyMatrix::len)
    }

    /// 常に`false`. `Singleton` も頂点を1つ持つ.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 下三角部分 (対角成分を含む) の値の総和, すなわち辺の重みの総和を返す.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.as_matrix().map_or(0.0, |m| {
            m.view()
                .indexed_iter()
                .filter(|&((i, j), _)| j <= i)
                .map(|(_, &w)| w)
                .sum()
        })
    }

    /// 行列中の0でない成分の数を返す. 辺1本につき2つ数えられる.
    #[must_use]
    pub fn nonzero_entries(&self) -> usize {
        self.as_matrix()
            .map_or(0, |m| m.view().iter().filter(|&&w| w != 0.0).count())
    }

    /// 辺の本数を返す.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.as_matrix().map_or(0, |m| m.edges().count())
    }
}

impl PartialEq<f64> for SpanningTree {
    fn eq(&self, other: &f64) -> bool {
        matches!(self, Self::Singleton) && *other == 0.0
    }
}

/// 隣接行列で表された無向グラフと, そこから構築した最小全域木
///
/// ```
/// use primst::{AdjacencyMatrix, Graph};
///
/// let adj = AdjacencyMatrix::from_rows(&[[0.0, 2.0, 5.0], [2.0, 0.0, 1.0], [5.0, 1.0, 0.0]]).unwrap();
/// let mut g = Graph::new(adj).unwrap();
/// let mst = g.construct_mst().unwrap();
/// assert_eq!(mst.total_weight(), 3.0);
/// ```
#[derive(Clone, Debug)]
pub struct Graph {
    adj_mat: AdjacencyMatrix,
    mst: Option<SpanningTree>,
}

impl Graph {
    /// 行列, もしくは行列ファイルへのパスからグラフを作る.
    ///
    /// 行列の対称性は検査しない.
    ///
    /// # Errors
    ///
    /// - パスが空かディレクトリを指している, 行列が正方でない, もしくは頂点が1つも無い場合は `Error::InvalidInput`
    /// - ファイルの読み込みに失敗した場合は `load_adjacency_csv` のエラーをそのまま返す
    pub fn new(source: impl Into<GraphSource>) -> Result<Self> {
        let adj_mat = match source.into() {
            GraphSource::Matrix(m) => m,
            GraphSource::Array(a) => AdjacencyMatrix::new(a)?,
            GraphSource::Path(p) => {
                if p.as_os_str().is_empty() || p.is_dir() {
                    return Err(Error::invalid_input(format!(
                        "{:?} is not a matrix file",
                        p.display()
                    )));
                }
                load_adjacency_csv(&p)?
            }
        };
        if adj_mat.is_empty() {
            return Err(Error::invalid_input("adjacency matrix has no vertices"));
        }
        Ok(Self { adj_mat, mst: None })
    }

    /// 元の隣接行列を返す.
    #[must_use]
    pub fn adj_mat(&self) -> &AdjacencyMatrix {
        &self.adj_mat
    }

    /// 構築済みの最小全域木を返す. まだ構築していなければ `None`.
    #[must_use]
    pub fn mst(&self) -> Option<&SpanningTree> {
        self.mst.as_ref()
    }

    /// 頂点数を返す.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adj_mat.len()
    }

    /// 常に`false`. 頂点の無いグラフは作れない.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adj_mat.is_empty()
    }

    /// 頂点0を根としてプリム法で最小全域木を構築し, 保存する.
    ///
    /// 頂点0を含む連結成分を張る. 完全に孤立した頂点の行と列は0のまま残る.
    /// 何度呼んでも同じ結果になる.
    ///
    /// # Errors
    ///
    /// 頂点0から到達できない, 孤立していない頂点がある場合は `Error::QueueUnderflow` を返し, 保存済みの結果は変更しない.
    pub fn construct_mst(&mut self) -> Result<&SpanningTree> {
        debug!(vertices = self.len(), "constructing minimum spanning tree");
        let tree = if self.len() == 1 {
            SpanningTree::Singleton
        } else {
            SpanningTree::Matrix(prim(&self.adj_mat)?)
        };
        Ok(self.store(tree))
    }

    /// 連結成分ごとにプリム法を適用して最小全域森を構築し, 保存する.
    ///
    /// 連結なグラフに対しては `construct_mst` と同じ結果になる.
    pub fn construct_msf(&mut self) -> &SpanningTree {
        debug!(vertices = self.len(), "constructing minimum spanning forest");
        let tree = if self.len() == 1 {
            SpanningTree::Singleton
        } else {
            SpanningTree::Matrix(prim_forest(&self.adj_mat))
        };
        self.store(tree)
    }

    fn store(&mut self, tree: SpanningTree) -> &SpanningTree {
        debug!(
            edges = tree.edge_count(),
            weight = tree.total_weight(),
            "spanning tree constructed"
        );
        self.mst.insert(tree)
    }
}
