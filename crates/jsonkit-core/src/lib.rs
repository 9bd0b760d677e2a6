//! jsonkit-core
//!
//! 型付きの値と JSON テキストの相互変換
//!
//! # モジュール構成
//! - **codec**: `Json` trait、`DefaultJson`、`CodecOptions`、`create()`
//! - **error**: `EncodingError` / `DecodingError` / `ConversionError`
//!
//! # 使用例
//! ```
//! use jsonkit_core::Json;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, PartialEq, Serialize, Deserialize)]
//! struct User {
//!     name: String,
//!     age: u32,
//! }
//!
//! let json = jsonkit_core::create();
//! let text = json.encode(&User { name: "Yuvraj".into(), age: 30 }).unwrap();
//! let user: User = json.decode(&text).unwrap();
//! assert_eq!(user.age, 30);
//! ```

pub mod codec;
pub mod error;

pub use codec::{
    CodecOptions, DefaultJson, Json, NonFiniteFloats, OutputStyle, UnknownFields, create,
};
pub use error::{ConversionError, DecodingError, EncodingError};
