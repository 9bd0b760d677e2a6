//! DefaultJson - serde_json による Json の標準実装
//!
//! # エンコードの流れ
//! 1. 非有限の浮動小数点（NaN / ±inf）がないか確認（`NonFiniteFloats::Reject` のとき）
//! 2. serde_json でバイト列にする（Compact / Pretty）
//! 3. UTF-8 として検証して `String` にする
//!
//! # デコードの流れ
//! - `UnknownFields::Ignore`: serde_json でそのまま `T` に（エラーに位置情報が付く）
//! - `UnknownFields::Deny`: 同じストリーミング Deserializer を serde_ignored で包み、
//!   読み捨てられたキーがあれば `DecodingError::UnknownField`

use std::any::type_name;
use std::fmt;

use log::{debug, trace};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::finite::{self, FiniteError};
use super::json::Json;
use super::options::{CodecOptions, NonFiniteFloats, OutputStyle, UnknownFields};
use crate::error::{ConversionError, DecodingError, EncodingError};

/// DefaultJson は設定（`CodecOptions`）だけを持つ codec
///
/// 可変な状態を持たないので、clone しても参照で共有しても同じ振る舞いです。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DefaultJson {
    options: CodecOptions,
}

impl DefaultJson {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: CodecOptions) -> Self {
        Self { options }
    }

    /// 未知キーを拒否する codec
    pub fn strict() -> Self {
        Self::with_options(CodecOptions::strict())
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    fn check_finite<T: Serialize + ?Sized>(&self, value: &T) -> Result<(), EncodingError> {
        if self.options.non_finite == NonFiniteFloats::Null {
            return Ok(());
        }
        match finite::check(value) {
            Ok(()) => Ok(()),
            Err(FiniteError::NonFinite(value)) => Err(EncodingError::NonFinite { value }),
            // 同じ失敗は serde_json 側でも起き、そちらのエラーとして返る
            Err(FiniteError::Custom(_)) => Ok(()),
        }
    }

    fn encode_text<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodingError> {
        self.check_finite(value)?;
        let bytes = match self.options.style {
            OutputStyle::Compact => serde_json::to_vec(value),
            OutputStyle::Pretty => serde_json::to_vec_pretty(value),
        }
        .map_err(EncodingError::Serialize)?;
        String::from_utf8(bytes).map_err(EncodingError::InvalidUtf8)
    }

    fn decode_text<T: DeserializeOwned>(&self, json: &str) -> Result<T, DecodingError> {
        match self.options.unknown_fields {
            UnknownFields::Ignore => serde_json::from_str(json).map_err(DecodingError::from_json),
            UnknownFields::Deny => decode_strict(json),
        }
    }
}

/// lenient と同じストリーミング Deserializer の上で、読み捨てられたキーを記録する
///
/// 重複キー・大きな整数・エラー位置の扱いは lenient と同じで、
/// 違いは未知キーを拒否することだけです。
fn decode_strict<T: DeserializeOwned>(json: &str) -> Result<T, DecodingError> {
    let mut unknown = None;
    let mut de = serde_json::Deserializer::from_str(json);
    let decoded: T = serde_ignored::deserialize(&mut de, |path| {
        if unknown.is_none() {
            unknown = Some(path.to_string());
        }
    })
    .map_err(DecodingError::from_json)?;
    // serde_json::from_str と同じく、後ろに残った文字を拒否する
    de.end().map_err(DecodingError::from_json)?;

    match unknown {
        Some(path) => Err(DecodingError::UnknownField { path }),
        None => Ok(decoded),
    }
}

/// 失敗をログに残してからそのまま返す
fn logged<T, E: fmt::Display>(
    operation: &'static str,
    target_type: &'static str,
    result: Result<T, E>,
) -> Result<T, E> {
    if let Err(err) = &result {
        debug!(operation = operation, target_type = target_type, error:% = err; "json codec call failed");
    }
    result
}

impl Json for DefaultJson {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodingError> {
        trace!(source_type = type_name::<T>(); "encoding json");
        logged("encode", type_name::<T>(), self.encode_text(value))
    }

    fn decode<T: DeserializeOwned>(&self, json: &str) -> Result<T, DecodingError> {
        trace!(target_type = type_name::<T>(), len = json.len(); "decoding json");
        logged("decode", type_name::<T>(), self.decode_text(json))
    }

    fn convert<S: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        value: &S,
    ) -> Result<T, ConversionError> {
        trace!(source_type = type_name::<S>(), target_type = type_name::<T>(); "converting json");
        let json = self.encode(value)?;
        Ok(self.decode(&json)?)
    }
}
