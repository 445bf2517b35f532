//! Enrollment data model and request field validation.
//!
//! An inbound [`EnrollmentRequest`] carries raw text. [`EnrollmentRequest::validate`]
//! checks every field independently and either yields a [`ValidatedEnrollment`]
//! built from strongly typed fields or the full set of [`FieldViolations`].
//! Domain services only accept the validated form.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum length of a student or course name, in characters.
pub const NAME_MIN: usize = 2;
/// Maximum length of a student or course name, in characters.
pub const NAME_MAX: usize = 100;
/// Maximum length of an email address, in characters.
pub const EMAIL_MAX: usize = 100;

/// Request field subject to validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnrollmentField {
    /// Student name.
    Name,
    /// Student email address.
    Email,
    /// Course name.
    Course,
}

impl EnrollmentField {
    /// Field name as exposed to API clients.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Course => "course",
        }
    }
}

impl fmt::Display for EnrollmentField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field constraint violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldViolation {
    /// Value is empty or whitespace only.
    Blank { field: EnrollmentField },
    /// Value length falls outside `[min, max]`.
    Length {
        field: EnrollmentField,
        min: usize,
        max: usize,
    },
    /// Value exceeds `max` characters.
    TooLong { field: EnrollmentField, max: usize },
    /// Value is not a syntactically valid email address.
    InvalidEmail,
}

impl FieldViolation {
    /// Field the violation applies to.
    #[must_use]
    pub fn field(&self) -> EnrollmentField {
        match self {
            Self::Blank { field } | Self::Length { field, .. } | Self::TooLong { field, .. } => {
                *field
            }
            Self::InvalidEmail => EnrollmentField::Email,
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blank { field } => write!(f, "{field} is required"),
            Self::Length { field, min, max } => {
                write!(f, "{field} must be between {min} and {max} characters")
            }
            Self::TooLong { field, max } => write!(f, "{field} must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid address"),
        }
    }
}

impl std::error::Error for FieldViolation {}

/// Every violation found in one request, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldViolations(Vec<FieldViolation>);

impl FieldViolations {
    fn record<T>(&mut self, result: Result<T, FieldViolation>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(violation) => {
                self.0.push(violation);
                None
            }
        }
    }

    /// Whether no violation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the recorded violations in field order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldViolation> {
        self.0.iter()
    }

    /// Violation recorded for `field`, if any.
    #[must_use]
    pub fn get(&self, field: EnrollmentField) -> Option<&FieldViolation> {
        self.0.iter().find(|violation| violation.field() == field)
    }

    /// Map of field name to violation message, as reported to clients.
    #[must_use]
    pub fn to_messages(&self) -> BTreeMap<&'static str, String> {
        self.0
            .iter()
            .map(|violation| (violation.field().as_str(), violation.to_string()))
            .collect()
    }
}

impl fmt::Display for FieldViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldViolations {}

fn check_bounded_text(
    field: EnrollmentField,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), FieldViolation> {
    if value.trim().is_empty() {
        return Err(FieldViolation::Blank { field });
    }
    let length = value.chars().count();
    if length < min || length > max {
        return Err(FieldViolation::Length { field, min, max });
    }
    Ok(())
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Length is enforced separately; this only checks the address grammar.
        let pattern = concat!(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@",
            r"[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?",
            r"(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Student name, 2 to 100 characters and not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StudentName(String);

impl StudentName {
    /// Validate and construct a student name.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldViolation> {
        let value = value.into();
        check_bounded_text(EnrollmentField::Name, &value, NAME_MIN, NAME_MAX)?;
        Ok(Self(value))
    }
}

/// Email address, at most 100 characters, compared by exact match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    ///
    /// # Examples
    /// ```
    /// use enrollment::domain::EmailAddress;
    ///
    /// assert!(EmailAddress::new("a@b.co").is_ok());
    /// assert!(EmailAddress::new("a@").is_err());
    /// ```
    pub fn new(value: impl Into<String>) -> Result<Self, FieldViolation> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(FieldViolation::Blank {
                field: EnrollmentField::Email,
            });
        }
        if !email_regex().is_match(&value) {
            return Err(FieldViolation::InvalidEmail);
        }
        if value.chars().count() > EMAIL_MAX {
            return Err(FieldViolation::TooLong {
                field: EnrollmentField::Email,
                max: EMAIL_MAX,
            });
        }
        Ok(Self(value))
    }
}

/// Course name, 2 to 100 characters and not blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseName(String);

impl CourseName {
    /// Validate and construct a course name.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldViolation> {
        let value = value.into();
        check_bounded_text(EnrollmentField::Course, &value, NAME_MIN, NAME_MAX)?;
        Ok(Self(value))
    }
}

macro_rules! impl_text_field {
    ($($ty:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $ty {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }

            impl From<$ty> for String {
                fn from(value: $ty) -> Self {
                    value.0
                }
            }

            impl TryFrom<String> for $ty {
                type Error = FieldViolation;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    Self::new(value)
                }
            }
        )*
    };
}

impl_text_field!(StudentName, EmailAddress, CourseName);

/// Raw enrollment submission as received from a client.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EnrollmentRequest {
    /// Student name.
    pub name: String,
    /// Student email address.
    pub email: String,
    /// Course name.
    pub course: String,
}

impl EnrollmentRequest {
    /// Check every field and return the validated request or all violations.
    ///
    /// # Examples
    /// ```
    /// use enrollment::domain::{EnrollmentField, EnrollmentRequest};
    ///
    /// let request = EnrollmentRequest {
    ///     name: "A".into(),
    ///     email: "abc".into(),
    ///     course: "Data Science".into(),
    /// };
    /// let violations = request.validate().expect_err("two fields are invalid");
    /// assert!(violations.get(EnrollmentField::Name).is_some());
    /// assert!(violations.get(EnrollmentField::Email).is_some());
    /// assert!(violations.get(EnrollmentField::Course).is_none());
    /// ```
    pub fn validate(self) -> Result<ValidatedEnrollment, FieldViolations> {
        let Self {
            name,
            email,
            course,
        } = self;
        let mut violations = FieldViolations::default();
        let name = violations.record(StudentName::new(name));
        let email = violations.record(EmailAddress::new(email));
        let course = violations.record(CourseName::new(course));

        match (name, email, course) {
            (Some(name), Some(email), Some(course)) => Ok(ValidatedEnrollment {
                name,
                email,
                course,
            }),
            _ => Err(violations),
        }
    }
}

/// Enrollment request whose fields passed structural validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEnrollment {
    /// Student name.
    pub name: StudentName,
    /// Student email address.
    pub email: EmailAddress,
    /// Course name.
    pub course: CourseName,
}

/// Gateway-generated enrollment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentId(i64);

impl EnrollmentId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EnrollmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Enrollment ready to be inserted; the gateway assigns the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEnrollment {
    /// Student name.
    pub name: StudentName,
    /// Student email address, unique across enrollments.
    pub email: EmailAddress,
    /// Course name.
    pub course: CourseName,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
}

impl NewEnrollment {
    /// Attach a creation instant to a validated request.
    #[must_use]
    pub fn from_validated(request: ValidatedEnrollment, created_at: DateTime<Utc>) -> Self {
        let ValidatedEnrollment {
            name,
            email,
            course,
        } = request;
        Self {
            name,
            email,
            course,
            created_at,
        }
    }

    /// Combine with the identifier assigned by the gateway.
    #[must_use]
    pub fn with_id(self, id: EnrollmentId) -> Enrollment {
        let Self {
            name,
            email,
            course,
            created_at,
        } = self;
        Enrollment {
            id,
            name,
            email,
            course,
            created_at,
        }
    }
}

/// Persisted student enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrollment {
    /// Identifier assigned on insert.
    pub id: EnrollmentId,
    /// Student name.
    pub name: StudentName,
    /// Student email address.
    pub email: EmailAddress,
    /// Course name.
    pub course: CourseName,
    /// Creation instant, immutable.
    pub created_at: DateTime<Utc>,
}
