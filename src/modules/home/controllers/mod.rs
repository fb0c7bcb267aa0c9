mod home_controller;

pub use home_controller::{configure, index};
