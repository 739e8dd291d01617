pub mod category;
pub mod product;
pub mod report;
pub mod transaction;

pub use category::CategoryService;
pub use product::ProductService;
pub use report::ReportService;
pub use transaction::TransactionService;
