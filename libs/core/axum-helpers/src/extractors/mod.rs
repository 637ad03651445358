//! Extractors that reject with the error envelope instead of axum's plain-text bodies.

pub mod id_path;
pub mod json_body;

pub use id_path::IdPath;
pub use json_body::JsonBody;
