pub mod config;
pub mod error;
pub mod proxy;
pub mod server;
pub mod stream;

pub use config::ProxyConfig;
pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
