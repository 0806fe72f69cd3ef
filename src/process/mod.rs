pub mod convert;
pub mod date_parser;
pub mod extract;
pub mod frame;
pub mod timeshift;
