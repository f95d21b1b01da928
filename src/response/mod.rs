//! Response normalization.
//!
//! Raw JSON goes through a transformer ([`check_for_error`],
//! [`remake_json_for_list`] or [`convert_arrayed_result`]) and is then
//! decoded with [`map_to`] or [`map_result`].
//!
//! # Example
//!
//! ```rust
//! use rest_command::response::{map_result, remake_json_for_list, RowList};
//! use serde::Deserialize;
//! use serde_json::json;
//!
//! #[derive(Deserialize)]
//! struct Book {
//!     id: i64,
//!     name: String,
//! }
//!
//! let raw = json!({"result": {"fields": ["id", "name"], "data": [[1, "a"]]}});
//! let books: RowList<Book> = map_result(raw, remake_json_for_list).unwrap();
//! assert_eq!(books.items[0].name, "a");
//! ```

mod errors;
mod mapper;
mod transform;

pub use errors::ResultError;
pub use mapper::{map_result, map_to, Envelope, IdResult, RowList, SuccessResult};
pub use transform::{check_for_error, convert_arrayed_result, remake_json_for_list, reshape_list};
