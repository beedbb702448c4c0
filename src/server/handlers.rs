mod proxy;

pub use proxy::handle_proxy;
