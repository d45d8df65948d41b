// Library for tests to access modules

pub mod analysis;
pub mod cmdb_repo;
pub mod config;
pub mod error;
pub mod mock_data;
pub mod models;
pub mod report;
pub mod routes;
pub mod version;
