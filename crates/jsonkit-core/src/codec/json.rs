//! Json trait - encode / decode / convert の抽象
//!
//! # 学習ポイント
//! - `Serialize` / `DeserializeOwned` の trait bound で「エンコード可能か」を
//!   コンパイル時に保証する（実行時のキャストは不要）
//! - デフォルト実装付きメソッド（`decode_slice`, `convert`）
//! - `&J` / `Arc<J>` への blanket impl で 1 つの codec を共有する

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ConversionError, DecodingError, EncodingError};

/// Json は JSON テキストとの相互変換を提供する
///
/// 呼び出し側は具体型ではなくこの trait に依存します。
/// strict mode の codec などに差し替えても呼び出し側は変わりません。
///
/// # 使用例
/// ```ignore
/// fn store<J: Json>(json: &J, user: &User) -> Result<String, EncodingError> {
///     json.encode(user)
/// }
///
/// let text = store(&jsonkit_core::create(), &user)?;
/// ```
///
/// # 実装の要件
/// - 副作用なし（割り当て以外）、同じ入力には同じ結果
/// - `Send + Sync`: 1 つのインスタンスを複数スレッドから同時に使える
/// - 失敗は必ず `Err` で返す（部分的に埋まった値やデフォルト値で代用しない）
pub trait Json: Send + Sync {
    /// `value` を UTF-8 の JSON テキストにする
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodingError>;

    /// JSON テキストを `T` に復元する
    ///
    /// `json` はこの codec の `encode` が作ったものである必要はありません。
    fn decode<T: DeserializeOwned>(&self, json: &str) -> Result<T, DecodingError>;

    /// UTF-8 を検証してから [`Json::decode`] する
    fn decode_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        let json = std::str::from_utf8(bytes).map_err(DecodingError::InvalidUtf8)?;
        self.decode(json)
    }

    /// `decode(encode(value))` と同じ結果を返す
    ///
    /// 形が同じに見える型どうしでも、フィールド名の対応付けと未知キーの扱いは
    /// round trip と同一です。
    fn convert<S: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        value: &S,
    ) -> Result<T, ConversionError> {
        let json = self.encode(value)?;
        Ok(self.decode(&json)?)
    }
}

impl<J: Json> Json for &J {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodingError> {
        (**self).encode(value)
    }

    fn decode<T: DeserializeOwned>(&self, json: &str) -> Result<T, DecodingError> {
        (**self).decode(json)
    }

    fn decode_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        (**self).decode_slice(bytes)
    }

    fn convert<S: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        value: &S,
    ) -> Result<T, ConversionError> {
        (**self).convert(value)
    }
}

impl<J: Json> Json for Arc<J> {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<String, EncodingError> {
        (**self).encode(value)
    }

    fn decode<T: DeserializeOwned>(&self, json: &str) -> Result<T, DecodingError> {
        (**self).decode(json)
    }

    fn decode_slice<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, DecodingError> {
        (**self).decode_slice(bytes)
    }

    fn convert<S: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        value: &S,
    ) -> Result<T, ConversionError> {
        (**self).convert(value)
    }
}
