use chrono::NaiveDate;
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::debug;

use crate::entities::User;
use crate::errors::DomainError;
use crate::validation::{self, INVALID_BIRTH_DATE_MESSAGE};

/// User attributes a partial update may touch, keyed by their wire names.
///
/// `id` has no entry: identifiers never change after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Email,
    FirstName,
    LastName,
    BirthDate,
    Address,
    PhoneNumber,
}

impl UserField {
    pub const ALL: [UserField; 6] = [
        UserField::Email,
        UserField::FirstName,
        UserField::LastName,
        UserField::BirthDate,
        UserField::Address,
        UserField::PhoneNumber,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            UserField::Email => "email",
            UserField::FirstName => "firstName",
            UserField::LastName => "lastName",
            UserField::BirthDate => "birthDate",
            UserField::Address => "address",
            UserField::PhoneNumber => "phoneNumber",
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, UserField::Address | UserField::PhoneNumber)
    }
}

/// Applies a `field name -> raw value` mapping to a user, one entry at a time.
///
/// Entries are handled in the mapping's order. The first failing entry
/// aborts the call; entries before it have already been written to the
/// user and stay there.
pub struct FieldUpdater {
    minimum_age: u32,
    today: NaiveDate,
    taken_emails: HashSet<String>,
}

impl FieldUpdater {
    pub fn new(minimum_age: u32, today: NaiveDate) -> Self {
        Self {
            minimum_age,
            today,
            taken_emails: HashSet::new(),
        }
    }

    /// Emails held by other users; writing one of them fails the entry.
    pub fn with_taken_emails(mut self, taken_emails: HashSet<String>) -> Self {
        self.taken_emails = taken_emails;
        self
    }

    pub fn apply(&self, user: &mut User, fields: &Map<String, Value>) -> Result<(), DomainError> {
        for (name, value) in fields {
            match UserField::from_name(name) {
                Some(field) => self.apply_field(user, field, value)?,
                None => debug!("Ignoring unknown field '{}' for user {}", name, user.id),
            }
        }
        Ok(())
    }

    fn apply_field(&self, user: &mut User, field: UserField, value: &Value) -> Result<(), DomainError> {
        if field.is_required() && stringify(value).map_or(true, |text| text.is_empty()) {
            return Err(DomainError::Validation(format!(
                "{} must not be empty!",
                field.name()
            )));
        }

        match field {
            UserField::Email => user.email = self.email(field, value)?,
            UserField::FirstName => user.first_name = required_text(field, value)?,
            UserField::LastName => user.last_name = required_text(field, value)?,
            UserField::BirthDate => user.birth_date = self.birth_date(value)?,
            UserField::Address => user.address = optional_text(field, value)?,
            UserField::PhoneNumber => user.phone_number = optional_text(field, value)?,
        }
        Ok(())
    }

    fn email(&self, field: UserField, value: &Value) -> Result<String, DomainError> {
        let email = required_text(field, value)?;
        if self.taken_emails.contains(&email) {
            return Err(DomainError::Registration("Can't change email address".to_string()));
        }
        Ok(email)
    }

    fn birth_date(&self, value: &Value) -> Result<NaiveDate, DomainError> {
        value
            .as_str()
            .and_then(validation::parse_date)
            .filter(|date| {
                validation::is_in_past(*date, self.today)
                    && validation::is_old_enough(Some(*date), self.minimum_age, self.today)
            })
            .ok_or_else(|| DomainError::Validation(INVALID_BIRTH_DATE_MESSAGE.to_string()))
    }
}

/// Textual form of a raw value, `None` for null.
fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Strings pass through, numbers and booleans are coerced to text.
fn optional_text(field: UserField, value: &Value) -> Result<Option<String>, DomainError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Array(_) | Value::Object(_) => Err(DomainError::Validation(format!(
            "{} has an unsupported value",
            field.name()
        ))),
    }
}

fn required_text(field: UserField, value: &Value) -> Result<String, DomainError> {
    optional_text(field, value)?
        .ok_or_else(|| DomainError::Validation(format!("{} must not be empty!", field.name())))
}
