mod health;
mod url;

pub use health::liveness_handler;
pub use url::{redirect_handler, shorten_handler};
