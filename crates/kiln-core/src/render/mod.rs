//! Build-recipe rendering.
//!
//! Turns a [`kiln_model::BuildSpec`] into Dockerfile text through a fixed template.
//! Rendering is pure: no I/O, no clock, no randomness.
mod error;
pub use error::RenderError;

mod recipe;
pub use recipe::{
    AIRFLOW_CFG_FILE, BASE_REPOSITORY, ContextAsset, RECIPE_FILE, RECIPE_TEMPLATE_VERSION, Recipe,
    render,
};
