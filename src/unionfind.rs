/// 素集合データ構造
///
/// 頂点の連結成分を管理する. 負の値はその成分の代表で, 絶対値が成分の大きさを表す.
#[derive(Clone, Debug)]
pub struct UnionFind {
    parent: Box<[isize]>,
    groups: usize,
}

impl UnionFind {
    /// `n`個の頂点がそれぞれ別の成分に属している状態を作る.
    ///
    /// # Time complexity
    ///
    /// - *O*(*n*)
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            parent: vec![-1; n].into_boxed_slice(),
            groups: n,
        }
    }

    /// 頂点の総数を返す.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    /// 頂点が1つも無いかを返す.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// 連結成分の数を返す.
    #[must_use]
    pub fn count(&self) -> usize {
        self.groups
    }

    /// 頂点`a`が属する成分の代表を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    pub fn find(&mut self, a: usize) -> usize {
        debug_assert!(a < self.len());
        let mut root = a;
        while self.parent[root] >= 0 {
            root = self.parent[root] as usize;
        }
        let mut a = a;
        while a != root {
            let next = self.parent[a] as usize;
            self.parent[a] = root as isize;
            a = next;
        }
        root
    }

    /// 頂点`a`, `b`の成分をマージする. 既に同じ成分だった場合は何もせず`false`を返す.
    ///
    /// # Time complexity
    ///
    /// - *O*(α(*n*))
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let (mut a, mut b) = (self.find(a), self.find(b));
        if a == b {
            return false;
        }
        // 大きい方に小さい方をぶら下げる
        if self.parent[a] > self.parent[b] {
            std::mem::swap(&mut a, &mut b);
        }
        self.parent[a] += self.parent[b];
        self.parent[b] = a as isize;
        self.groups -= 1;
        true
    }

    /// 頂点`a`が属する成分の頂点数を返す.
    pub fn size(&mut self, a: usize) -> usize {
        let root = self.find(a);
        self.parent[root].unsigned_abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge() {
        let mut uf = UnionFind::new(5);
        assert_eq!(uf.count(), 5);
        assert!(uf.union(0, 1));
        assert!(uf.union(3, 4));
        assert!(!uf.union(1, 0));
        assert!(uf.union(1, 4));
        assert_eq!(uf.count(), 2);
        assert_eq!(uf.size(3), 4);
        assert_eq!(uf.size(2), 1);
        assert_eq!(uf.find(0), uf.find(4));
        assert_ne!(uf.find(2), uf.find(0));
    }
}
