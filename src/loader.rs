use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use tracing::debug;

use super::adjmatrix::AdjacencyMatrix;
use super::error::{Error, Result};

/// 区切り文字で区切られた行列ファイルの読み込み設定
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CsvOptions {
    delimiter: u8,
    comment: Option<u8>,
}

impl CsvOptions {
    /// 区切り文字を設定する.
    #[must_use]
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// この文字で始まる行を読み飛ばす. `None` なら読み飛ばさない.
    #[must_use]
    pub fn comment(mut self, comment: Option<u8>) -> Self {
        self.comment = comment;
        self
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            comment: Some(b'#'),
        }
    }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| Error::Io {
        path: path.to_owned(),
        source,
    })
}

fn malformed(path: &Path, line: u64, reason: impl Into<String>) -> Error {
    Error::MalformedSource {
        path: path.to_owned(),
        line,
        reason: reason.into(),
    }
}

/// 行の配列を `rows x cols` の行列にまとめる. 各行の長さは揃っている必要がある.
fn assemble(path: &Path, rows: Vec<(u64, Vec<f64>)>) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, |(_, r)| r.len());
    let mut data = Vec::with_capacity(rows.len() * cols);
    for (line, row) in &rows {
        if row.len() != cols {
            return Err(malformed(
                path,
                *line,
                format!("expected {cols} fields, found {}", row.len()),
            ));
        }
        data.extend_from_slice(row);
    }
    Array2::from_shape_vec((rows.len(), cols), data).map_err(|e| malformed(path, 0, e.to_string()))
}

/// 既定の設定 (`,` 区切り) でファイルから隣接行列を読み込む.
///
/// # Errors
///
/// - ファイルを開けなければ `Error::Io`
/// - 数値として読めない値がある, 行の長さが揃っていない, 正方行列でない, もしくは空であれば `Error::MalformedSource`
pub fn load_adjacency_csv(path: impl AsRef<Path>) -> Result<AdjacencyMatrix> {
    load_adjacency_csv_with(path, &CsvOptions::default())
}

/// 設定を指定してファイルから隣接行列を読み込む.
///
/// # Errors
///
/// `load_adjacency_csv` と同じ.
pub fn load_adjacency_csv_with(
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<AdjacencyMatrix> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .comment(options.comment)
        .trim(Trim::All)
        .flexible(true)
        .from_reader(open(path)?);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| {
            let line = e.position().map_or(0, csv::Position::line);
            malformed(path, line, e.to_string())
        })?;
        let line = record.position().map_or(0, csv::Position::line);
        let row = record
            .iter()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| malformed(path, line, format!("{field:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push((line, row));
    }
    if rows.is_empty() {
        return Err(malformed(path, 0, "no rows"));
    }

    let matrix = assemble(path, rows)?;
    let (n, m) = matrix.dim();
    if n != m {
        return Err(malformed(path, 0, format!("matrix is {n}x{m}, not square")));
    }
    debug!(path = %path.display(), vertices = n, "loaded adjacency matrix");
    AdjacencyMatrix::new(matrix)
}

/// 空白区切りの座標ファイルを読み込み, 1行を1点とする行列を返す.
///
/// 空行と `#` で始まるコメントは読み飛ばす.
///
/// # Errors
///
/// - ファイルを開けない, もしくは読めなければ `Error::Io`
/// - 数値として読めない値がある, もしくは行の長さが揃っていなければ `Error::MalformedSource`
pub fn load_coordinates(path: impl AsRef<Path>) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let mut rows = Vec::new();
    for (i, line) in BufReader::new(open(path)?).lines().enumerate() {
        let line = line.map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;
        let lineno = i as u64 + 1;
        let content = line.split('#').next().unwrap_or_default().trim();
        if content.is_empty() {
            continue;
        }
        let row = content
            .split_whitespace()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map_err(|e| malformed(path, lineno, format!("{field:?}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push((lineno, row));
    }

    let coords = assemble(path, rows)?;
    debug!(path = %path.display(), points = coords.nrows(), dims = coords.ncols(), "loaded coordinates");
    Ok(coords)
}
