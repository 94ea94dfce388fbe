pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{has_http_scheme, normalize_input_url, same_host};
