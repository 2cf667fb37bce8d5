mod build;
pub use build::BuildSpec;
