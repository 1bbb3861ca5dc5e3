pub mod errors;
pub mod db;
pub mod contract;
pub mod idc;
pub mod idc_room;
pub mod business_unit;
pub mod business_unit_ops;
pub mod product_unit;
pub mod domain;
pub mod user_profile;
pub mod tag;
pub mod asset;
pub mod asset_tag;
pub mod server;
pub mod switch;
pub mod slb;
pub mod router;
pub mod ddos;
pub mod menus;
pub mod user_menus;

#[cfg(test)]
mod tests;
