use std::path::PathBuf;

/// このクレートの処理が返すエラー
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// グラフの入力として使えない値が渡された
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// ファイルの内容を行列として解釈できなかった
    #[error("malformed source {}:{line}: {reason}", .path.display())]
    MalformedSource {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    /// ファイルを開けなかった, もしくは読めなかった
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 終了条件を満たす前に候補辺のキューが空になった
    #[error("candidate queue exhausted after visiting {visited} of {expected} vertices")]
    QueueUnderflow { visited: usize, expected: usize },
}

impl Error {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// `Result<T, Error>` の別名
pub type Result<T> = std::result::Result<T, Error>;
