pub mod entities;
pub mod ports;
pub mod services;
pub mod validation;
pub mod value_objects;
