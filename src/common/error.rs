#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("record store error: {0}")]
    Store(#[from] std::io::Error),
    #[error("sales report error: {0}")]
    Report(#[from] csv::Error),
}
