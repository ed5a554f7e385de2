//! Bench and bring-up diagnostics

pub mod i2cscanner;
