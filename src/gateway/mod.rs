pub mod http;
pub mod memory;
pub mod traits;

pub use http::HttpGateway;
pub use memory::MemoryGateway;
pub use traits::PropertyGateway;
