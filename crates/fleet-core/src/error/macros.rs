//! Error macros for fleet

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::FleetError::UsageError($msg.to_string()))
    };
}

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::FleetError::invalid_value($context, $value))
    };
}
