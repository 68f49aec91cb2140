pub mod gateway;
pub mod invoker;

pub use gateway::CatalogGateway;
pub use invoker::{RemoteInvoker, commands};
