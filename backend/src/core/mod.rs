//! Core value types shared by every simulation component

pub mod time;
