//! # shiguredo_header_value
//!
//! 依存なしの HTTP ヘッダー値パーサー
//!
//! ## 特徴
//!
//! - **依存なし**: 標準ライブラリのみ使用 (`tracing` feature は任意)
//! - **位置付きエラー**: パースエラーは入力中の文字オフセットを持つ
//! - **元テキストの保持**: パースした値はそのままの文字列で出力される
//!
//! ## 使い方
//!
//! ### 単一の値
//!
//! ```rust
//! use shiguredo_header_value::media_type::MediaType;
//!
//! let mt = MediaType::parse("text/html; charset=UTF-8").unwrap();
//! assert_eq!(mt.media_type(), "text");
//! assert_eq!(mt.subtype(), "html");
//! assert_eq!(mt.charset().map(|c| c.value()), Some("UTF-8"));
//!
//! // パースした値は入力のまま出力される
//! assert_eq!(mt.to_string(), "text/html; charset=UTF-8");
//! ```
//!
//! ### リスト
//!
//! ```rust
//! use shiguredo_header_value::media_type::MediaType;
//!
//! // q の降順で並ぶ
//! let accept = MediaType::parse_list("text/*;q=0.5, application/json").unwrap();
//! assert_eq!(accept[0].value(), "application/json");
//! assert_eq!(accept[1].value(), "text/*");
//! ```
//!
//! ### ヘッダー名から
//!
//! ```rust
//! use shiguredo_header_value::header;
//!
//! let tags = header::IF_NONE_MATCH.parse("W/\"1\", \"2\"").unwrap();
//! assert!(tags[0].is_weak());
//!
//! let e = header::CONTENT_TYPE.parse("text/").unwrap_err();
//! assert_eq!(e.name(), "Content-Type");
//! ```

pub mod boundary;
pub mod charset;
pub mod content_disposition;
pub mod converter;
pub mod cookie;
mod cursor;
pub mod encoded_text;
mod error;
pub mod etag;
mod grammar;
pub mod header;
pub mod language;
mod limits;
pub mod link;
pub mod media_type;
pub mod parameter;
pub mod predicate;
pub mod token;

pub use error::{HeaderError, ParseError};
pub use grammar::to_list_text;
pub use limits::HeaderValueLimits;
