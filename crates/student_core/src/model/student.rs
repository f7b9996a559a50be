//! Student domain model.
//!
//! # Responsibility
//! - Define the canonical record stored in the JSON collection.
//! - Map field names used by the front ends to typed fields and values.
//!
//! # Invariants
//! - `id` is assigned by the repository and never chosen by callers.
//! - `marks` must be finite; JSON has no encoding for NaN or infinity.
//! - Field values reaching the repository are already coerced to the
//!   field's semantic type.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable integer identifier of one student record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub i64);

impl StudentId {
    /// Id assigned to the first record of an empty collection.
    pub const FIRST: StudentId = StudentId(1);

    /// Returns the id that follows this one, or `None` past `i64::MAX`.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl Display for StudentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for StudentId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// One persisted student record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: i64,
    pub marks: f64,
}

/// Input for creating a record or fully overwriting an existing one.
///
/// Unknown keys are ignored on decode, so a client supplied `id` never
/// reaches the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub age: i64,
    pub marks: f64,
}

impl NewStudent {
    pub fn new(name: impl Into<String>, age: i64, marks: f64) -> Self {
        Self {
            name: name.into(),
            age,
            marks,
        }
    }

    /// Checks invariants required before persistence.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_marks(self.marks)
    }

    /// Materializes this input as a record with the given id.
    pub fn into_student(self, id: StudentId) -> Student {
        Student {
            id,
            name: self.name,
            age: self.age,
            marks: self.marks,
        }
    }
}

impl Student {
    /// Checks invariants required before persistence.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        validate_marks(self.marks)
    }

    /// Overwrites one field with an already-coerced value.
    pub fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Name(name) => self.name = name,
            FieldValue::Age(age) => self.age = age,
            FieldValue::Marks(marks) => self.marks = marks,
        }
    }

    /// Overwrites name, age and marks, keeping the id.
    pub fn overwrite(&mut self, input: NewStudent) {
        self.name = input.name;
        self.age = input.age;
        self.marks = input.marks;
    }
}

impl Display for Student {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{id: {}, name: {:?}, age: {}, marks: {}}}",
            self.id, self.name, self.age, self.marks
        )
    }
}

/// Data fields a caller may update or sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    Name,
    Age,
    Marks,
}

impl StudentField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Age => "age",
            Self::Marks => "marks",
        }
    }

    /// Parses raw text into this field's semantic type.
    ///
    /// Front ends call this; the repository only ever sees typed values.
    pub fn coerce(self, raw: &str) -> Result<FieldValue, FieldValueError> {
        match self {
            Self::Name => Ok(FieldValue::Name(raw.to_string())),
            Self::Age => raw
                .trim()
                .parse::<i64>()
                .map(FieldValue::Age)
                .map_err(|_| FieldValueError::new(self, raw)),
            Self::Marks => raw
                .trim()
                .parse::<f64>()
                .map(FieldValue::Marks)
                .map_err(|_| FieldValueError::new(self, raw)),
        }
    }

    /// Ascending natural order of two records by this field.
    ///
    /// `marks` uses IEEE total ordering so the comparison never panics.
    pub fn compare(self, left: &Student, right: &Student) -> Ordering {
        match self {
            Self::Name => left.name.cmp(&right.name),
            Self::Age => left.age.cmp(&right.age),
            Self::Marks => left.marks.total_cmp(&right.marks),
        }
    }
}

impl Display for StudentField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StudentField {
    type Err = InvalidField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "name" => Ok(Self::Name),
            "age" => Ok(Self::Age),
            "marks" => Ok(Self::Marks),
            other => Err(InvalidField(other.to_string())),
        }
    }
}

/// A field value already coerced to the field's semantic type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Name(String),
    Age(i64),
    Marks(f64),
}

/// Caller asked for a field that is not one of `name|age|marks`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidField(pub String);

impl Display for InvalidField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid field `{}`; expected name|age|marks",
            self.0
        )
    }
}

impl Error for InvalidField {}

/// Raw text could not be coerced to the field's type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldValueError {
    pub field: StudentField,
    pub raw: String,
}

impl FieldValueError {
    fn new(field: StudentField, raw: &str) -> Self {
        Self {
            field,
            raw: raw.to_string(),
        }
    }
}

impl Display for FieldValueError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let expected = match self.field {
            StudentField::Name => "text",
            StudentField::Age => "an integer",
            StudentField::Marks => "a number",
        };
        write!(
            f,
            "invalid value `{}` for `{}`; expected {expected}",
            self.raw, self.field
        )
    }
}

impl Error for FieldValueError {}

/// Model-level validation failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentValidationError {
    NonFiniteMarks(f64),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteMarks(value) => {
                write!(f, "marks must be a finite number, got `{value}`")
            }
        }
    }
}

impl Error for StudentValidationError {}

fn validate_marks(marks: f64) -> Result<(), StudentValidationError> {
    if marks.is_finite() {
        Ok(())
    } else {
        Err(StudentValidationError::NonFiniteMarks(marks))
    }
}
