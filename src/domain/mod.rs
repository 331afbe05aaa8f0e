//! Domain types for the cars resource.

pub mod car;

pub use car::{Car, CarPatch, CarReplacement, NewCar};
