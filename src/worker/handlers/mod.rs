pub mod add_product;
pub mod settle;
