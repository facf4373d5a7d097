pub mod config;
pub mod password;
pub mod tools;
pub mod user;
