//! UI module - widgets shared by the screens

pub mod components;
