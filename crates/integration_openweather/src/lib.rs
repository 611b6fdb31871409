//! OpenWeather integration
//!
//! Client for the OpenWeather One Call 3.0 API
//! (<https://openweathermap.org/api/one-call-3>). Requires an API key.

pub mod client;
mod condition;
mod models;

pub use client::{OpenWeatherClient, OpenWeatherConfig, OpenWeatherError};
