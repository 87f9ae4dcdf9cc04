pub mod category_products;
pub mod table;
