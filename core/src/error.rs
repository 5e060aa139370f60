pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Structural problems in a boolean query. Reported per query; the
/// index is never touched when one of these comes back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("unexpected ')' at token {position}")]
    UnexpectedClose { position: usize },

    #[error("unbalanced parentheses: {open} '(' vs {close} ')'")]
    Unclosed { open: usize, close: usize },
}
