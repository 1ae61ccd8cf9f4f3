pub mod auth;
pub mod practice;
pub mod results;
