pub mod config;
pub mod fetch;
pub mod game;
pub mod mvi;
pub mod session;
pub mod trivia;
