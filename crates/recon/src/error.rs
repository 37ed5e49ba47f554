use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (negative tare, empty radii, etc.).
    ConfigValidation(String),
    /// Missing required column in the plan CSV.
    MissingColumn { column: String },
    /// Numeric field in the plan CSV failed to parse.
    NumberParse { cart_id: String, sku: String, field: String, value: String },
    /// Weight or tolerance in the plan is negative.
    NegativeValue { cart_id: String, sku: String, field: String },
    /// The same SKU appears twice in one cart's plan.
    DuplicateSku { cart_id: String, sku: String },
    /// The scan batch itself could not be parsed as a JSON array.
    ScanParse(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => {
                write!(f, "plan CSV: missing column '{column}'")
            }
            Self::NumberParse { cart_id, sku, field, value } => {
                write!(f, "cart '{cart_id}', sku '{sku}': cannot parse {field} '{value}'")
            }
            Self::NegativeValue { cart_id, sku, field } => {
                write!(f, "cart '{cart_id}', sku '{sku}': {field} must not be negative")
            }
            Self::DuplicateSku { cart_id, sku } => {
                write!(f, "cart '{cart_id}': duplicate sku '{sku}' in plan")
            }
            Self::ScanParse(msg) => write!(f, "scan batch parse error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
