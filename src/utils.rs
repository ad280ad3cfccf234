// src/utils.rs

//! Utility functions and helpers shared by the portal components

pub mod time;
