pub mod tcp;

pub use tcp::TcpWhoisTransport;
