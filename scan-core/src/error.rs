use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No image in message")]
    NoImage,
}

pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_converts_into_scan_error() {
        let err: ScanError = HandlerError::NoImage.into();
        assert_eq!(err.to_string(), "Handler error: No image in message");
    }

    #[test]
    fn test_io_error_converts_into_scan_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "best.onnx");
        let err: ScanError = io.into();
        assert!(matches!(err, ScanError::Io(_)));
        assert!(err.to_string().contains("best.onnx"));
    }
}
