pub mod client;
pub mod delivery;
pub mod endpoint;
pub mod headers;
pub mod response;

pub use client::{Transport, UpstreamClient, UpstreamResponse};
pub use delivery::DeliveryMode;
pub use endpoint::ProxyEndpoint;
pub use headers::{forward_headers, outbound_headers};
pub use response::ResponseHead;
