use sqlparser::parser::ParserError;
use sqlparser::tokenizer::TokenizerError;

use crate::statement::UnsupportedSegmentError;
use crate::types::TypeError;

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("parse error: {0}")]
    Parser(
        #[from]
        #[source]
        ParserError,
    ),
    #[error("type error: {0}")]
    Type(
        #[from]
        #[source]
        TypeError,
    ),
    #[error("{0}")]
    UnsupportedSegment(
        #[from]
        #[source]
        UnsupportedSegmentError,
    ),
    #[error("only SELECT statements can be bound, got: {0}")]
    UnsupportedStatement(String),
    #[error("unsupported syntax: {0}")]
    UnsupportedSyntax(String),
}

impl From<TokenizerError> for ParseError {
    fn from(e: TokenizerError) -> Self {
        ParseError::Parser(e.into())
    }
}
