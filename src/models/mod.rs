pub mod category;
pub mod product;
pub mod report;
pub mod transaction;
