//! Request and response shapes for the `/users` routes, plus the field
//! constraints a request must meet before it reaches the user service.

use chrono::NaiveDate;
use domain::validation::{self, DATE_FORMAT_MESSAGE, DATE_RANGE_MESSAGE, PAST_DATE_MESSAGE};
use domain::{DomainError, User, UserDetails};
use serde::{Deserialize, Serialize};

const NOT_BLANK: &str = "can't be blank.";
const NOT_WELL_EMAIL: &str = "was formed not well.";

/// Body of `POST /users/registration` and `PUT /users/:id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRegistrationRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl UserRegistrationRequest {
    /// Check every field constraint and map the request onto `UserDetails`.
    ///
    /// All violations are reported together, joined with `"; "`.
    pub fn validate(self, minimum_age: u32, today: NaiveDate) -> Result<UserDetails, DomainError> {
        let mut violations = Vec::new();

        if !validation::is_well_formed_email(&self.email) {
            violations.push(format!("email {}", NOT_WELL_EMAIL));
        }
        if !validation::is_not_blank(&self.first_name) {
            violations.push(format!("firstName {}", NOT_BLANK));
        }
        if !validation::is_not_blank(&self.last_name) {
            violations.push(format!("lastName {}", NOT_BLANK));
        }

        let birth_date = validation::parse_date(&self.birth_date);
        match birth_date {
            None => violations.push(DATE_FORMAT_MESSAGE.to_string()),
            Some(date) => {
                if !validation::is_in_past(date, today) {
                    violations.push(PAST_DATE_MESSAGE.to_string());
                }
                if !validation::is_old_enough(Some(date), minimum_age, today) {
                    violations.push(validation::age_message(minimum_age));
                }
            }
        }

        match birth_date {
            Some(birth_date) if violations.is_empty() => Ok(UserDetails {
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                birth_date,
                address: self.address,
                phone_number: self.phone_number,
            }),
            _ => Err(DomainError::Validation(violations.join("; "))),
        }
    }
}

/// Public projection of a stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            birth_date: user.birth_date,
            address: user.address,
            phone_number: user.phone_number,
        }
    }
}

/// Query string of `GET /users/searchByBirthDateRange`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDateRangeQuery {
    pub from_date: Option<String>,
    pub to_date: Option<String>,
}

impl BirthDateRangeQuery {
    pub fn range(&self) -> Result<(NaiveDate, NaiveDate), DomainError> {
        let from = parse_bound(self.from_date.as_deref())?;
        let to = parse_bound(self.to_date.as_deref())?;

        match (from, to) {
            (Some(from), Some(to)) if from < to => Ok((from, to)),
            _ => Err(DomainError::Validation(DATE_RANGE_MESSAGE.to_string())),
        }
    }
}

fn parse_bound(raw: Option<&str>) -> Result<Option<NaiveDate>, DomainError> {
    match raw {
        None => Ok(None),
        Some(text) => validation::parse_date(text)
            .map(Some)
            .ok_or_else(|| DomainError::Validation(DATE_FORMAT_MESSAGE.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 10, 19).unwrap()
    }

    fn request() -> UserRegistrationRequest {
        UserRegistrationRequest {
            email: "some.email@ukr.net".to_string(),
            first_name: "Eric".to_string(),
            last_name: "Brown".to_string(),
            birth_date: "2002-03-14".to_string(),
            address: Some("Lisova, 12".to_string()),
            phone_number: None,
        }
    }

    #[test]
    fn test_valid_request_maps_to_details() {
        let details = request().validate(18, today()).unwrap();
        assert_eq!(details.birth_date, NaiveDate::from_ymd_opt(2002, 3, 14).unwrap());
        assert_eq!(details.address.as_deref(), Some("Lisova, 12"));
    }

    #[test]
    fn test_reports_every_violation() {
        let request = UserRegistrationRequest {
            email: "sam.ukr.net".to_string(),
            first_name: " ".to_string(),
            ..request()
        };

        let err = request.validate(18, today()).unwrap_err();
        assert_eq!(
            err,
            DomainError::Validation("email was formed not well.; firstName can't be blank.".to_string())
        );
    }

    #[test]
    fn test_rejects_young_and_future_birth_dates() {
        let young = UserRegistrationRequest {
            birth_date: "2010-07-24".to_string(),
            ..request()
        };
        assert_eq!(
            young.validate(18, today()).unwrap_err().to_string(),
            "birthDate must be at least 18 years ago"
        );

        let future = UserRegistrationRequest {
            birth_date: "2030-01-01".to_string(),
            ..request()
        };
        assert_eq!(
            future.validate(0, today()).unwrap_err().to_string(),
            format!("{}; {}", PAST_DATE_MESSAGE, validation::age_message(0))
        );
    }

    #[test]
    fn test_rejects_malformed_birth_date() {
        let request = UserRegistrationRequest {
            birth_date: "14.03.2002".to_string(),
            ..request()
        };
        assert_eq!(
            request.validate(18, today()).unwrap_err().to_string(),
            DATE_FORMAT_MESSAGE
        );
    }

    #[test]
    fn test_missing_fields_deserialize_as_blank() {
        let request: UserRegistrationRequest =
            serde_json::from_str(r#"{"email": "a@ukr.net"}"#).unwrap();
        assert!(request.first_name.is_empty());
        assert!(request.validate(18, today()).is_err());
    }

    #[test]
    fn test_range_query() {
        let query = BirthDateRangeQuery {
            from_date: Some("1995-01-01".to_string()),
            to_date: Some("2006-02-20".to_string()),
        };
        assert_eq!(
            query.range().unwrap(),
            (
                NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2006, 2, 20).unwrap()
            )
        );

        let reversed = BirthDateRangeQuery {
            from_date: query.to_date.clone(),
            to_date: query.from_date.clone(),
        };
        assert_eq!(reversed.range().unwrap_err().to_string(), DATE_RANGE_MESSAGE);

        let missing = BirthDateRangeQuery {
            from_date: None,
            ..query.clone()
        };
        assert_eq!(missing.range().unwrap_err().to_string(), DATE_RANGE_MESSAGE);

        let equal = BirthDateRangeQuery {
            to_date: query.from_date.clone(),
            ..query.clone()
        };
        assert_eq!(equal.range().unwrap_err().to_string(), DATE_RANGE_MESSAGE);

        let malformed = BirthDateRangeQuery {
            from_date: Some("01/01/1995".to_string()),
            ..query
        };
        assert_eq!(malformed.range().unwrap_err().to_string(), DATE_FORMAT_MESSAGE);
    }
}
