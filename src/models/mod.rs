pub mod accuweather;
pub mod condition;
pub mod forecast;
pub mod webhook;
