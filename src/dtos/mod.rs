pub mod leaddtos;
pub mod propertydtos;
pub mod uploaddtos;
