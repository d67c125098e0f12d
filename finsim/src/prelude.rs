pub use crate::{
    core::{parameters::*, trial::*},
    math::statistics::*,
    models::{perturbation::*, sweep::*},
    utils::errors::*,
};
