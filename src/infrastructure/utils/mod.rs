pub mod image_validation;
pub mod name_generator;
