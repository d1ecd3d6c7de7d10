pub mod domain;
pub mod expand;
pub mod model;
pub mod parser;
