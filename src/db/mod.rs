pub mod db;
pub mod leaddb;
pub mod propertydb;
