pub mod helpers;
pub mod pages;
pub mod shell;
