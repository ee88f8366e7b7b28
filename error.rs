#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("segment needs at least one subdivision, got {0}")]
    NoSubdivisions(usize),

    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("inner radius {inner} must be smaller than outer radius {outer}")]
    InvertedRadii { inner: f32, outer: f32 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    EmptyWindow { width: usize, height: usize },

    #[error("invalid config value: {0}")]
    Invalid(String),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
