use ndarray::{Array2, ArrayView2, Axis};

use super::error::{Error, Result};

/// 無向グラフの密な隣接行列
///
/// `[i, j]` の値が頂点`i`と頂点`j`を結ぶ辺の重みを表し, ちょうど0のときは辺が無いことを表す.
/// 正方行列であることは構築時に保証される. 対称性は検査しないが, アルゴリズムはこれを前提とする.
#[derive(Clone, Debug, PartialEq)]
pub struct AdjacencyMatrix(Array2<f64>);

impl AdjacencyMatrix {
    /// 正方行列から隣接行列を作る.
    ///
    /// # Errors
    ///
    /// `matrix` が正方行列でない場合は `Error::InvalidInput` を返す.
    pub fn new(matrix: Array2<f64>) -> Result<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(Error::invalid_input(format!(
                "adjacency matrix must be square, got {rows}x{cols}"
            )));
        }
        Ok(Self(matrix))
    }

    /// 行の配列から隣接行列を作る.
    ///
    /// # Errors
    ///
    /// 行の長さが揃っていない場合, もしくは正方行列にならない場合は `Error::InvalidInput` を返す.
    pub fn from_rows(rows: &[impl AsRef<[f64]>]) -> Result<Self> {
        let n = rows.len();
        let mut data = Vec::with_capacity(n * n);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n {
                return Err(Error::invalid_input(format!(
                    "row {i} has {} entries, expected {n}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Array2::from_shape_vec((n, n), data)
            .map_err(|e| Error::invalid_input(e.to_string()))
            .and_then(Self::new)
    }

    pub(crate) fn from_square(matrix: Array2<f64>) -> Self {
        debug_assert_eq!(matrix.nrows(), matrix.ncols());
        Self(matrix)
    }

    /// 頂点数`n`の, 辺を1本も持たない隣接行列を作る.
    #[must_use]
    pub fn zeros(n: usize) -> Self {
        Self(Array2::zeros((n, n)))
    }

    /// 頂点数を返す.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// 頂点が1つも無いかを返す.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 頂点`i`と頂点`j`を結ぶ辺の重みを返す. 辺が無ければ0.
    #[must_use]
    pub fn weight(&self, i: usize, j: usize) -> f64 {
        self.0[[i, j]]
    }

    pub(crate) fn set_edge(&mut self, i: usize, j: usize, weight: f64) {
        self.0[[i, j]] = weight;
        self.0[[j, i]] = weight;
    }

    /// 頂点`v`から出る辺について「行先と重みの組」を返すイテレータ
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0
            .row(v)
            .into_iter()
            .copied()
            .enumerate()
            .filter(|&(_, w)| w > 0.0)
    }

    /// 重みが正の辺を `(i, j, 重み)` (`i < j`) の形で返すイテレータ
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.0
            .indexed_iter()
            .filter(|&((i, j), &w)| i < j && w > 0.0)
            .map(|((i, j), &w)| (i, j, w))
    }

    /// 少なくとも1本の辺を持つ頂点の数を返す.
    ///
    /// 行がすべて0である頂点 (孤立点) は数えない.
    ///
    /// # Time complexity
    ///
    /// - *O*(*N*²)
    #[must_use]
    pub fn non_isolated_count(&self) -> usize {
        self.0
            .axis_iter(Axis(0))
            .filter(|row| row.iter().any(|&w| w != 0.0))
            .count()
    }

    /// 行列が許容誤差`tol`の範囲で対称かを判定する.
    #[must_use]
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let n = self.len();
        (0..n).all(|i| (i + 1..n).all(|j| (self.0[[i, j]] - self.0[[j, i]]).abs() <= tol))
    }

    /// 行列のビューを返す.
    #[must_use]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }

    /// 中の行列を取り出す.
    #[must_use]
    pub fn into_inner(self) -> Array2<f64> {
        self.0
    }
}

impl TryFrom<Array2<f64>> for AdjacencyMatrix {
    type Error = Error;

    fn try_from(matrix: Array2<f64>) -> Result<Self> {
        Self::new(matrix)
    }
}

impl AsRef<Array2<f64>> for AdjacencyMatrix {
    fn as_ref(&self) -> &Array2<f64> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rejects_non_square() {
        let err = AdjacencyMatrix::new(Array2::zeros((2, 3))).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        let err = AdjacencyMatrix::from_rows(&[vec![0.0, 1.0], vec![1.0]]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn neighbors_skip_zero() {
        let m = AdjacencyMatrix::new(array![[0.0, 2.0, 0.0], [2.0, 0.0, 3.0], [0.0, 3.0, 0.0]])
            .unwrap();
        assert_eq!(m.neighbors(1).collect::<Vec<_>>(), [(0, 2.0), (2, 3.0)]);
        assert_eq!(m.neighbors(0).collect::<Vec<_>>(), [(1, 2.0)]);
        assert_eq!(m.edges().collect::<Vec<_>>(), [(0, 1, 2.0), (1, 2, 3.0)]);
    }

    #[test]
    fn isolated_vertices() {
        let m = AdjacencyMatrix::from_rows(&[
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
        ])
        .unwrap();
        assert_eq!(m.len(), 3);
        assert_eq!(m.non_isolated_count(), 2);
        assert_eq!(AdjacencyMatrix::zeros(4).non_isolated_count(), 0);
    }

    #[test]
    fn symmetry() {
        let m = AdjacencyMatrix::new(array![[0.0, 1.0], [1.00001, 0.0]]).unwrap();
        assert!(m.is_symmetric(1e-4));
        assert!(!m.is_symmetric(1e-6));
    }
}
