use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("empty unit string")]
    Empty,
    #[error("unknown unit `{0}`")]
    UnknownUnit(String),
    #[error("invalid unit syntax in `{expr}`: {message}")]
    Syntax { expr: String, message: String },
    #[error("exponent out of range in `{0}`")]
    ExponentRange(String),
    #[error("invalid reference time `{0}`")]
    InvalidOrigin(String),
}

impl UnitError {
    pub(crate) fn syntax(expr: &str, message: impl Into<String>) -> Self {
        Self::Syntax {
            expr: expr.to_string(),
            message: message.into(),
        }
    }
}
