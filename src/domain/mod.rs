pub mod entities;
pub mod lifecycle;
pub mod ports;
pub mod rules;
pub mod simulation;
pub mod value_objects;
