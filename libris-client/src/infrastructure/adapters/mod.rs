//! Adapters implementing the service traits over concrete transports

pub mod remote_gateway;

pub use remote_gateway::RemoteCatalogGateway;
