#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("canvas must be positive and finite, got {width}x{height}")]
    InvalidCanvas { width: f32, height: f32 },
    #[error("padding {padding} leaves no drawable area on a {width}x{height} canvas")]
    PaddingTooLarge { padding: f32, width: f32, height: f32 },
    #[error("layout parameter '{name}' must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    #[error("layout parameter '{name}' must be at least 1")]
    ZeroBudget { name: &'static str },
    #[error("stroke range is inverted: min {min} > max {max}")]
    InvertedRange { min: f32, max: f32 },
    #[error("'{value}' is not a supported color")]
    InvalidColor { value: String },
    #[error("unknown theme '{0}'")]
    UnknownTheme(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
