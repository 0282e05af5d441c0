//! # Identity Newtypes
//!
//! Domain-primitive newtypes for identifiers and identity documents.
//! Each identifier is a distinct type: a [`DriverId`] cannot be passed where
//! a [`BookingId`] is expected.
//!
//! ## Validation
//!
//! Backend-issued identifiers ([`UserId`], [`DriverId`], [`BookingId`]) are
//! opaque strings; they only need to be non-empty. Document numbers
//! ([`Email`], [`PhoneNumber`], [`DlNumber`], [`PanNumber`],
//! [`AadharNumber`], [`Pincode`]) validate with the same rules as the form
//! validators in [`crate::validation`] and store a canonical form.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::validation;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a backend-issued identifier.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyIdentifier`] for an empty string.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let s = value.into();
                if s.trim().is_empty() {
                    return Err(ValidationError::EmptyIdentifier { kind: $kind });
                }
                Ok(Self(s))
            }

            /// Access the identifier string.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }
    };
}

opaque_id!(
    /// Backend identifier of a user account.
    UserId,
    "user"
);
opaque_id!(
    /// Backend identifier of a driver profile.
    DriverId,
    "driver"
);
opaque_id!(
    /// Backend identifier of a booking.
    BookingId,
    "booking"
);

/// Email address, shaped like `local@domain.tld`.
///
/// Stored exactly as entered: the backend matches guest registrations to
/// accounts by exact email comparison, so no case folding happens here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create an email, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] with the validator's reason.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        let result = validation::email(&s);
        match result.reason {
            Some(reason) => Err(ValidationError::InvalidEmail {
                value: s,
                reason: reason.to_string(),
            }),
            None => Ok(Self(s)),
        }
    }

    /// Access the address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Indian mobile number in canonical 10-digit form.
///
/// Accepts `"9876543210"`, `"98765 43210"`, `"(987) 654-3210"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a phone number, stripping spaces, dashes and parentheses.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPhone`] if the digits are not a
    /// 10-digit number starting with 6-9.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if !validation::phone_number(&raw).is_valid() {
            return Err(ValidationError::InvalidPhone(raw));
        }
        Ok(Self(validation::strip_phone(&raw)))
    }

    /// The 10 digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formatted as `+91 98765 43210`.
    pub fn international(&self) -> String {
        format!("+91 {} {}", &self.0[..5], &self.0[5..])
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Driving licence number in canonical form (upper-case, no separators).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DlNumber(String);

impl DlNumber {
    /// Create a DL number. Accepts lower case and optional separators.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidDlNumber`] if the layout is wrong.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        validation::canonical_dl(&raw)
            .map(Self)
            .ok_or(ValidationError::InvalidDlNumber(raw))
    }

    /// Canonical 15-character form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Two-letter state code.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }

    /// Formatted as `MH01-20230001234`.
    pub fn formatted(&self) -> String {
        format!("{}-{}", &self.0[..4], &self.0[4..])
    }
}

impl std::fmt::Display for DlNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

/// Permanent Account Number, upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanNumber(String);

impl PanNumber {
    /// Create a PAN. Input is upper-cased before matching.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPan`] if it is not `AAAAA9999A`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let upper = raw.trim().to_uppercase();
        if !validation::is_pan(&upper) {
            return Err(ValidationError::InvalidPan(raw));
        }
        Ok(Self(upper))
    }

    /// Access the PAN.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PanNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Aadhar number, stored as 12 digits.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AadharNumber(String);

impl AadharNumber {
    /// Create an Aadhar number, stripping spaces and dashes.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAadhar`] if not 12 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if !validation::aadhar_number(&raw).is_valid() {
            return Err(ValidationError::InvalidAadhar(raw));
        }
        Ok(Self(validation::strip_aadhar(&raw)))
    }

    /// Access the 12 digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Formatted as `XXXX XXXX XXXX`.
    pub fn formatted(&self) -> String {
        format!("{} {} {}", &self.0[..4], &self.0[4..8], &self.0[8..])
    }

    /// Only the last four digits visible, as printed on receipts.
    pub fn masked(&self) -> String {
        format!("XXXX XXXX {}", &self.0[8..])
    }
}

// Aadhar numbers are personal data; keep them out of logs.
impl std::fmt::Debug for AadharNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AadharNumber").field(&self.masked()).finish()
    }
}

/// Postal pincode, 6 digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pincode(String);

impl Pincode {
    /// Create a pincode.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPincode`] if not 6 digits.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if !validation::pincode(&raw).is_valid() {
            return Err(ValidationError::InvalidPincode(raw));
        }
        Ok(Self(raw.trim().to_string()))
    }

    /// Access the pincode.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Pincode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
