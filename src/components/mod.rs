pub mod form;
pub mod records;
