pub mod align;
pub mod config;
pub mod consts;
pub mod error;
pub mod frame;
pub mod io;
pub mod resample;
