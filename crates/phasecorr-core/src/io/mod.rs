pub mod comparison;
pub mod dataset;
pub mod image_io;
