//! Wire types for the Jotter notes server.
//!
//! Field names follow the server's camelCase JSON. With the `ts` feature
//! enabled the exported types generate TypeScript bindings for the web
//! frontend.

pub mod note;
pub mod response;
pub mod user;

pub use note::{Note, NoteDraft};
pub use response::{ApiResponse, Pagination};
pub use user::User;
