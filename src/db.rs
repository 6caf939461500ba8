pub mod error;
pub mod models;
pub mod pool;
pub mod report_repository;
pub mod stock_repository;

pub use error::DbError;
pub use models::*;
pub use pool::StagingStore;
pub use report_repository::ReportRepository;
pub use stock_repository::StockRepository;
