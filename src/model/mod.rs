pub mod action;
pub mod enums;
