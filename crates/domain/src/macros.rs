//! Macro for implementing Display and FromStr for wire-token enums
//!
//! Status reasons cross the bridge boundary as lowercase snake_case tokens.
//! This macro provides one implementation of both Display and FromStr so
//! every token enum serializes and parses the same way.
//!
//! # Example
//!
//! ```rust
//! use osabridge_domain::impl_wire_token_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum SyncState {
//!     Idle,
//!     Running,
//! }
//!
//! impl_wire_token_conversions!(SyncState {
//!     Idle => "idle",
//!     Running => "running",
//! });
//! ```

/// Implements Display and FromStr traits for wire-token enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their wire tokens
/// - FromStr trait: parses case-insensitive tokens to enum variants
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their tokens
#[macro_export]
macro_rules! impl_wire_token_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(Self::$variant => write!(f, $str),)+
                }
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    other => Err(format!(
                        "unknown {} token: {other}",
                        stringify!($enum_name)
                    )),
                }
            }
        }
    };
}
