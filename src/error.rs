use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("chart element is missing a name")]
    MissingName,

    #[error("chart element `{name}` is missing a type tag")]
    MissingKind { name: String },

    #[error("malformed table: {0}")]
    MalformedTable(String),

    #[error("invalid position for text legend: {0}")]
    InvalidLegendPosition(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error(
        "unsupported output combination: typeresult={type_result}, result_param={result_param}"
    )]
    UnsupportedOutput {
        type_result: String,
        result_param: String,
    },

    #[error("raster encoding failed: {0}")]
    Encoding(String),
}
