pub mod gateway;

pub use gateway::TestCatalogGateway;
