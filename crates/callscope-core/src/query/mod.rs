pub mod budget;
pub mod guards;
pub mod impact;
pub mod paths;
