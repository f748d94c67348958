use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The scoring operations require at least one prior order for the
    /// customer. The plain average query does NOT raise this; it returns 0
    /// for unknown customers instead.
    #[error("customer {0} has no order history")]
    CustomerNotFound(u64),
}
