//! Menu module - interactive console control

mod controller;

pub use controller::MenuController;
