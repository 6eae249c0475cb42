pub mod timeout;

pub use timeout::request_timeout_middleware;
