//! Error types for game loading and deck decoding.
//!
//! Most engine operations never fail: bad card fields become empty values and
//! unresolvable deck lines are dropped. The variants here describe the
//! structural problems that are recorded on a [`CardGame`](crate::CardGame)
//! and the few decoding boundaries that return a `Result`.

#[derive(Debug, thiserror::Error)]
pub enum CardGameError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unexpected end of varint data at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("varint at offset {offset} does not fit in 64 bits")]
    VarIntOverflow { offset: usize },

    #[error("enum `{0}` does not refer to a card property")]
    UnknownEnumProperty(String),

    #[error("property `{0}` is enum-typed but has no enum definition")]
    MissingEnumDef(String),

    #[error("no card data found at `{0}`")]
    MissingData(String),

    #[error("card record is missing its id field `{0}`")]
    MissingCardId(String),

    #[error("set record is missing its code field `{0}`")]
    MissingSetCode(String),
}

pub type Result<T> = std::result::Result<T, CardGameError>;
