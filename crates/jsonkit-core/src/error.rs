//! Errors - encode / decode / convert の失敗分類
//!
//! # 三種類のエラー
//! - **EncodingError**: 値 → JSON テキストの失敗
//! - **DecodingError**: JSON テキスト → 値の失敗
//! - **ConversionError**: convert 内部の round trip で起きた上記どちらか
//!
//! 元の原因は `#[source]` / `#[from]` で保持し、`Error::source()` で辿れます。
//! メッセージに原因を文字列として埋め込むことはしません。

use serde_json::error::Category;
use thiserror::Error;

/// EncodingError は encode の失敗
#[derive(Debug, Error)]
pub enum EncodingError {
    /// NaN / ±inf は JSON で表現できない
    #[error("could not encode: non-finite float {value} has no JSON representation")]
    NonFinite { value: f64 },

    /// serde_json 側の失敗（文字列でない map key、Serialize 実装のエラーなど）
    #[error("could not encode: serialization failed")]
    Serialize(#[source] serde_json::Error),

    /// 出力が UTF-8 として解釈できない
    #[error("could not encode: serialized output is not valid UTF-8")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),
}

/// DecodingError は decode の失敗
///
/// `line` / `column` は serde_json が報告する 1 始まりの位置です。
#[derive(Debug, Error)]
pub enum DecodingError {
    #[error("could not decode: input is not valid UTF-8")]
    InvalidUtf8(#[source] std::str::Utf8Error),

    #[error("could not decode: malformed JSON at line {line}, column {column}")]
    Syntax {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// 型の不一致・必須フィールドの欠落
    #[error("could not decode: document does not match the target type at line {line}, column {column}")]
    Mismatch {
        line: usize,
        column: usize,
        #[source]
        source: serde_json::Error,
    },

    /// strict mode でのみ発生
    #[error("could not decode: unknown field `{path}`")]
    UnknownField { path: String },
}

impl DecodingError {
    pub(crate) fn from_json(source: serde_json::Error) -> Self {
        let (line, column) = (source.line(), source.column());
        match source.classify() {
            Category::Data => DecodingError::Mismatch {
                line,
                column,
                source,
            },
            Category::Syntax | Category::Eof | Category::Io => DecodingError::Syntax {
                line,
                column,
                source,
            },
        }
    }

    /// エラー位置 (line, column)。位置情報を持たない場合は None
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            DecodingError::Syntax { line, column, .. }
            | DecodingError::Mismatch { line, column, .. }
                if *line > 0 =>
            {
                Some((*line, *column))
            }
            _ => None,
        }
    }
}

/// ConversionError は convert の失敗
///
/// どちらの段階で失敗したかは variant で区別でき、元のエラーは
/// `source()` からそのまま取り出せます。
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("could not convert: encoding step failed")]
    Encoding(#[from] EncodingError),

    #[error("could not convert: decoding step failed")]
    Decoding(#[from] DecodingError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error as _;

    fn json_error(text: &str) -> serde_json::Error {
        serde_json::from_str::<Vec<u32>>(text).unwrap_err()
    }

    #[rstest]
    #[case::unterminated("[1, 2")]
    #[case::bad_token("[1, }")]
    #[case::trailing("[1] x")]
    #[case::empty("")]
    fn malformed_input_is_syntax(#[case] text: &str) {
        let err = DecodingError::from_json(json_error(text));
        assert!(matches!(err, DecodingError::Syntax { .. }), "{err:?}");
    }

    #[test]
    fn wrong_type_is_mismatch_with_position() {
        let err = DecodingError::from_json(json_error(r#"["a"]"#));
        assert!(matches!(err, DecodingError::Mismatch { .. }));
        let (line, column) = err.position().expect("serde_json reports a position");
        assert_eq!(line, 1);
        assert!(column > 0);
    }

    #[test]
    fn unknown_field_has_no_position() {
        let err = DecodingError::UnknownField {
            path: "extra".to_string(),
        };
        assert_eq!(err.position(), None);
        assert_eq!(err.to_string(), "could not decode: unknown field `extra`");
    }

    #[test]
    fn conversion_error_keeps_cause() {
        let err = ConversionError::from(DecodingError::from_json(json_error("{")));
        let source = err.source().expect("cause is kept");
        assert!(source.downcast_ref::<DecodingError>().is_some());

        // 二段目: DecodingError → serde_json::Error
        let root = source.source().expect("serde_json cause");
        assert!(root.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn messages_do_not_embed_cause() {
        let err = EncodingError::Serialize(json_error("x"));
        assert_eq!(err.to_string(), "could not encode: serialization failed");
    }
}
