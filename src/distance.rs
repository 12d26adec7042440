use ndarray::{Array2, ArrayView2, Zip};

use super::adjmatrix::AdjacencyMatrix;

/// 各行を1点とみなし, 全ての2点間のユークリッド距離を並べた隣接行列を返す.
///
/// 対角成分は0になる. 異なる2点が同じ座標にある場合も距離は0になり, その間に辺は無いものとして扱われる.
///
/// # Time complexity
///
/// - *O*(*N*² *D*)
///   ここで, *N*は点の数, *D*は次元
#[must_use]
pub fn pairwise_distances(coords: ArrayView2<'_, f64>) -> AdjacencyMatrix {
    let n = coords.nrows();
    let mut d = Array2::zeros((n, n));
    for i in 0..n {
        for j in i + 1..n {
            let dist = Zip::from(coords.row(i))
                .and(coords.row(j))
                .fold(0.0_f64, |acc, &a, &b| acc + (a - b) * (a - b))
                .sqrt();
            d[[i, j]] = dist;
            d[[j, i]] = dist;
        }
    }
    AdjacencyMatrix::from_square(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn euclidean() {
        let coords = array![[0.0, 0.0], [3.0, 4.0], [6.0, 8.0]];
        let d = pairwise_distances(coords.view());
        assert_eq!(d.len(), 3);
        assert_eq!(d.weight(0, 1), 5.0);
        assert_eq!(d.weight(1, 0), 5.0);
        assert_eq!(d.weight(0, 2), 10.0);
        assert_eq!(d.weight(1, 1), 0.0);
        assert!(d.is_symmetric(0.0));
    }

    #[test]
    fn empty() {
        let coords = Array2::<f64>::zeros((0, 3));
        assert!(pairwise_distances(coords.view()).is_empty());
    }
}
