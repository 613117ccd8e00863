//! HTTP request handlers.

pub mod health;
pub mod newurl;
pub mod redirect;

pub use health::health_handler;
pub use newurl::new_url_handler;
pub use redirect::redirect_handler;
