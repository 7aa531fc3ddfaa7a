//! Cookie wire format and ownership.

pub mod allow_list;
pub mod codec;

pub use allow_list::CookieAllowList;
