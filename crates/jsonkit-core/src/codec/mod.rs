//! Codec - 型付きの値と JSON テキストの相互変換
//!
//! # 構成
//! - **json**: `Json` trait（encode / decode / convert）
//! - **default**: `DefaultJson`（serde_json による標準実装）
//! - **options**: `CodecOptions`（未知キー・非有限数・出力形式）
//! - finite: NaN / ±inf を検出する内部の Serializer

pub mod default;
pub mod json;
pub mod options;

mod finite;

pub use self::default::DefaultJson;
pub use self::json::Json;
pub use self::options::{CodecOptions, NonFiniteFloats, OutputStyle, UnknownFields};

/// 既定の codec を返す
///
/// 呼び出し側は `impl Json` だけに依存するので、既定の実装を差し替えても
/// 呼び出し側のコードは変わりません。
pub fn create() -> impl Json + Clone + std::fmt::Debug {
    DefaultJson::new()
}
