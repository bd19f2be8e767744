//! Constants shared across the workspace.

/// Header appended to every outgoing remote-service request.
pub const VIA_HEADER_VALUE: &str = "Marketplace";

/// Length of generated product secrets.
pub const PRODUCT_SECRET_LENGTH: usize = 48;
