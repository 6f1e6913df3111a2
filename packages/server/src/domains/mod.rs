// Business domains
pub mod tv;
