pub mod categories;
pub mod home;
pub mod product_detail;
pub mod products;
pub mod stats;
pub mod sync;
