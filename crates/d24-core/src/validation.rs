//! # Field Validators
//!
//! Pure functions that classify a single raw form value as valid or invalid
//! with a fixed, human-readable reason. They never mutate anything; callers
//! decide whether to surface the first failing reason or all of them.
//!
//! | Field | Rule |
//! |-------|------|
//! | email | non-empty, `local@domain.tld`, no whitespace |
//! | phone | 10 digits after stripping spaces/dashes/parentheses, first digit 6-9 |
//! | first/last name | trimmed length >= 2, letters only |
//! | name, city | trimmed length >= 2, letters and spaces only |
//! | DL number | `AA NN NNNN NNNNNNN`, separators optional, case-insensitive |
//! | PAN | `AAAAA9999A`, case-insensitive |
//! | Aadhar | 12 digits after stripping spaces/dashes |
//! | addresses | trimmed length >= 10 |
//! | state | trimmed length >= 2 |
//! | pincode | exactly 6 digits |
//! | experience, salary | whole number >= 0, within `u32` / `u64` |

use serde::Serialize;

/// Outcome of running one validator against one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    /// Whether the value was accepted.
    pub valid: bool,
    /// Why the value was rejected. Always `None` when `valid` is true.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
}

impl ValidationResult {
    /// An accepting result.
    pub const fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    /// A rejecting result with the given reason.
    pub const fn fail(reason: &'static str) -> Self {
        Self {
            valid: false,
            reason: Some(reason),
        }
    }

    /// Whether the value was accepted.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Every form field that has a validator.
///
/// [`Field::key`] is the camelCase name the backend and the form layer use,
/// so per-field errors can be keyed by it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    /// Given name (split-name flows).
    FirstName,
    /// Family name (split-name flows).
    LastName,
    /// Combined display name (driver profile form).
    Name,
    /// Email address.
    Email,
    /// Indian mobile number.
    PhoneNumber,
    /// Driving licence number.
    DlNumber,
    /// Vehicle registration certificate number.
    RcNumber,
    /// Permanent Account Number.
    PanNumber,
    /// Aadhar number.
    AadharNumber,
    /// Permanent residential address.
    PermanentAddress,
    /// Address the driver operates from.
    OperatingAddress,
    /// City.
    City,
    /// State.
    State,
    /// Postal pincode.
    Pincode,
    /// Years of driving experience.
    Experience,
    /// Expected monthly salary.
    SalaryExpectation,
}

impl Field {
    /// The camelCase key used on the wire and for per-field error maps.
    pub fn key(&self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Name => "name",
            Self::Email => "email",
            Self::PhoneNumber => "phoneNumber",
            Self::DlNumber => "dlNumber",
            Self::RcNumber => "rcNumber",
            Self::PanNumber => "panNumber",
            Self::AadharNumber => "aadharNumber",
            Self::PermanentAddress => "permanentAddress",
            Self::OperatingAddress => "operatingAddress",
            Self::City => "city",
            Self::State => "state",
            Self::Pincode => "pincode",
            Self::Experience => "experience",
            Self::SalaryExpectation => "salaryExpectation",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::FirstName => "First name",
            Self::LastName => "Last name",
            Self::Name => "Full name",
            Self::Email => "Email address",
            Self::PhoneNumber => "Phone number",
            Self::DlNumber => "DL number",
            Self::RcNumber => "RC number",
            Self::PanNumber => "PAN number",
            Self::AadharNumber => "Aadhar number",
            Self::PermanentAddress => "Permanent address",
            Self::OperatingAddress => "Operating address",
            Self::City => "City",
            Self::State => "State",
            Self::Pincode => "Pincode",
            Self::Experience => "Experience",
            Self::SalaryExpectation => "Salary expectation",
        }
    }

    fn required_reason(&self) -> &'static str {
        match self {
            Self::FirstName => "First name is required",
            Self::LastName => "Last name is required",
            Self::Name => "Full name is required",
            Self::Email => "Email is required",
            Self::PhoneNumber => "Phone number is required",
            Self::DlNumber => "DL number is required",
            Self::RcNumber => "RC number is required",
            Self::PanNumber => "PAN number is required",
            Self::AadharNumber => "Aadhar number is required",
            Self::PermanentAddress => "Permanent address is required",
            Self::OperatingAddress => "Operating address is required",
            Self::City => "City is required",
            Self::State => "State is required",
            Self::Pincode => "Pincode is required",
            Self::Experience => "Experience is required",
            Self::SalaryExpectation => "Salary expectation is required",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A single failed validator, keyed by the field it guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldFailure {
    /// The field that failed.
    pub field: Field,
    /// The reason reported by the validator.
    pub reason: &'static str,
}

/// Run the required-form validator for `field` against `value`.
pub fn validate(field: Field, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::fail(field.required_reason());
    }
    match field {
        Field::FirstName => first_name(value),
        Field::LastName => last_name(value),
        Field::Name => full_name(value),
        Field::Email => email(value),
        Field::PhoneNumber => phone_number(value),
        Field::DlNumber => dl_number(value),
        Field::RcNumber => ValidationResult::ok(),
        Field::PanNumber => pan_number(value),
        Field::AadharNumber => aadhar_number(value),
        Field::PermanentAddress | Field::OperatingAddress => address(field, value),
        Field::City => city(value),
        Field::State => state(value),
        Field::Pincode => pincode(value),
        Field::Experience => experience(value),
        Field::SalaryExpectation => salary_expectation(value),
    }
}

/// Run the optional-form validator: an empty value is accepted, anything
/// else must pass the required-form rule.
pub fn validate_optional(field: Field, value: &str) -> ValidationResult {
    if value.trim().is_empty() {
        ValidationResult::ok()
    } else {
        validate(field, value)
    }
}

/// Convert a result into a [`FieldFailure`] if it rejected.
pub fn failure(field: Field, result: ValidationResult) -> Option<FieldFailure> {
    match result.reason {
        Some(reason) if !result.valid => Some(FieldFailure { field, reason }),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Individual rules
// ---------------------------------------------------------------------------

/// Email: non-empty, no whitespace, one `@`, and a dot inside the domain.
pub fn email(value: &str) -> ValidationResult {
    const BAD: &str = "Please enter a valid email address";
    if value.is_empty() {
        return ValidationResult::fail("Email is required");
    }
    if value.chars().any(char::is_whitespace) {
        return ValidationResult::fail(BAD);
    }
    let Some((local, domain)) = value.split_once('@') else {
        return ValidationResult::fail(BAD);
    };
    if local.is_empty() || domain.contains('@') {
        return ValidationResult::fail(BAD);
    }
    // A dot with at least one character on each side.
    let dotted = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !dotted {
        return ValidationResult::fail(BAD);
    }
    ValidationResult::ok()
}

/// Strip the separators a user may type inside a phone number.
pub fn strip_phone(value: &str) -> String {
    value
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '-' || *c == '(' || *c == ')'))
        .collect()
}

/// Indian mobile number: 10 digits, first digit 6-9.
pub fn phone_number(value: &str) -> ValidationResult {
    let digits = strip_phone(value);
    let well_formed = digits.len() == 10
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(digits.as_bytes()[0], b'6'..=b'9');
    if well_formed {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(
            "Please enter a valid 10-digit Indian mobile number (starting with 6-9)",
        )
    }
}

fn name_part(value: &str, too_short: &'static str, bad_chars: &'static str) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.chars().count() < 2 {
        return ValidationResult::fail(too_short);
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return ValidationResult::fail(bad_chars);
    }
    ValidationResult::ok()
}

fn letters_and_spaces(
    value: &str,
    too_short: &'static str,
    bad_chars: &'static str,
) -> ValidationResult {
    if value.trim().chars().count() < 2 {
        return ValidationResult::fail(too_short);
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        return ValidationResult::fail(bad_chars);
    }
    ValidationResult::ok()
}

/// Given name: at least 2 letters.
pub fn first_name(value: &str) -> ValidationResult {
    name_part(
        value,
        "First name must be at least 2 characters long",
        "First name should only contain letters",
    )
}

/// Family name: at least 2 letters.
pub fn last_name(value: &str) -> ValidationResult {
    name_part(
        value,
        "Last name must be at least 2 characters long",
        "Last name should only contain letters",
    )
}

/// Combined name: at least 2 characters, letters and spaces.
pub fn full_name(value: &str) -> ValidationResult {
    letters_and_spaces(
        value,
        "Name must be at least 2 characters long",
        "Name should only contain letters and spaces",
    )
}

/// City: at least 2 characters, letters and spaces.
pub fn city(value: &str) -> ValidationResult {
    letters_and_spaces(
        value,
        "City name must be at least 2 characters long",
        "City name should only contain letters and spaces",
    )
}

/// State: at least 2 characters.
pub fn state(value: &str) -> ValidationResult {
    if value.trim().chars().count() < 2 {
        ValidationResult::fail("State name must be at least 2 characters long")
    } else {
        ValidationResult::ok()
    }
}

/// Permanent or operating address: at least 10 characters.
pub fn address(field: Field, value: &str) -> ValidationResult {
    if value.trim().chars().count() >= 10 {
        return ValidationResult::ok();
    }
    match field {
        Field::OperatingAddress => {
            ValidationResult::fail("Operating address must be at least 10 characters long")
        }
        _ => ValidationResult::fail("Permanent address must be at least 10 characters long"),
    }
}

/// Parse a DL number into its canonical, separator-free upper-case form.
///
/// Layout: state code (2 letters), RTO code (2 digits), year (4 digits),
/// serial (7 digits). One space or dash may separate consecutive groups.
pub fn canonical_dl(value: &str) -> Option<String> {
    let upper = value.to_uppercase();
    let mut chars = upper.chars().peekable();
    let mut canonical = String::with_capacity(15);

    let groups: [(usize, fn(&char) -> bool); 4] = [
        (2, char::is_ascii_uppercase),
        (2, char::is_ascii_digit),
        (4, char::is_ascii_digit),
        (7, char::is_ascii_digit),
    ];

    for (index, (len, accepts)) in groups.iter().enumerate() {
        if index > 0 {
            if let Some(c) = chars.peek() {
                if *c == '-' || c.is_whitespace() {
                    chars.next();
                }
            }
        }
        for _ in 0..*len {
            match chars.next() {
                Some(c) if accepts(&c) => canonical.push(c),
                _ => return None,
            }
        }
    }

    if chars.next().is_some() {
        return None;
    }
    Some(canonical)
}

/// Driving licence number.
pub fn dl_number(value: &str) -> ValidationResult {
    if canonical_dl(value).is_some() {
        ValidationResult::ok()
    } else {
        ValidationResult::fail(
            "Please enter a valid DL number (e.g., MH01-20230001234 or MH0120230001234)",
        )
    }
}

/// Whether an already upper-cased string is a PAN.
pub fn is_pan(upper: &str) -> bool {
    let bytes = upper.as_bytes();
    bytes.len() == 10
        && bytes[..5].iter().all(u8::is_ascii_uppercase)
        && bytes[5..9].iter().all(u8::is_ascii_digit)
        && bytes[9].is_ascii_uppercase()
}

/// Permanent Account Number, case-insensitive.
pub fn pan_number(value: &str) -> ValidationResult {
    if is_pan(&value.to_uppercase()) {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("Please enter a valid PAN number (e.g., ABCDE1234F)")
    }
}

/// Strip spaces and dashes from an Aadhar number.
pub fn strip_aadhar(value: &str) -> String {
    value
        .chars()
        .filter(|c| !(c.is_whitespace() || *c == '-'))
        .collect()
}

/// Aadhar: 12 digits once spaces and dashes are removed.
pub fn aadhar_number(value: &str) -> ValidationResult {
    let digits = strip_aadhar(value);
    if digits.len() == 12 && digits.chars().all(|c| c.is_ascii_digit()) {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("Please enter a valid 12-digit Aadhar number")
    }
}

/// Pincode: exactly 6 digits.
pub fn pincode(value: &str) -> ValidationResult {
    let trimmed = value.trim();
    if trimmed.len() == 6 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        ValidationResult::ok()
    } else {
        ValidationResult::fail("Please enter a valid 6-digit pincode")
    }
}

fn non_negative(
    value: &str,
    max: u64,
    not_a_number: &'static str,
    negative: &'static str,
    too_large: &'static str,
) -> ValidationResult {
    match value.trim().parse::<i128>() {
        Ok(n) if n < 0 => ValidationResult::fail(negative),
        Ok(n) if n > i128::from(max) => ValidationResult::fail(too_large),
        Ok(_) => ValidationResult::ok(),
        Err(_) => ValidationResult::fail(not_a_number),
    }
}

/// Years of experience: whole number, zero or more, fits in a `u32`.
pub fn experience(value: &str) -> ValidationResult {
    non_negative(
        value,
        u64::from(u32::MAX),
        "Experience must be a whole number of years",
        "Experience cannot be negative",
        "Experience is too large",
    )
}

/// Monthly salary expectation: whole number, zero or more, fits in a `u64`.
pub fn salary_expectation(value: &str) -> ValidationResult {
    non_negative(
        value,
        u64::MAX,
        "Salary expectation must be a whole number",
        "Salary expectation cannot be negative",
        "Salary expectation is too large",
    )
}
