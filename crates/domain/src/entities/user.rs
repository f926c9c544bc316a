use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Core User entity - a registered user as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// Every user attribute except the identifier.
///
/// Used both to register a user and to replace all of an existing user's
/// fields at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

impl User {
    pub fn with_id(id: i32, details: UserDetails) -> Self {
        Self {
            id,
            email: details.email,
            first_name: details.first_name,
            last_name: details.last_name,
            birth_date: details.birth_date,
            address: details.address,
            phone_number: details.phone_number,
        }
    }

    /// Overwrite every field but `id` with `details`.
    pub fn replace_details(&mut self, details: UserDetails) {
        self.email = details.email;
        self.first_name = details.first_name;
        self.last_name = details.last_name;
        self.birth_date = details.birth_date;
        self.address = details.address;
        self.phone_number = details.phone_number;
    }

    /// Birth date strictly between `from` and `to`; both bounds excluded.
    pub fn born_between(&self, from: NaiveDate, to: NaiveDate) -> bool {
        self.birth_date > from && self.birth_date < to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> UserDetails {
        UserDetails {
            email: "some.email@ukr.net".to_string(),
            first_name: "Eric".to_string(),
            last_name: "Brown".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2002, 3, 14).unwrap(),
            address: Some("Lisova, 12".to_string()),
            phone_number: None,
        }
    }

    #[test]
    fn test_replace_details_keeps_id() {
        let mut user = User::with_id(7, details());
        let mut replacement = details();
        replacement.last_name = "Brown-Smith".to_string();
        replacement.address = None;

        user.replace_details(replacement);

        assert_eq!(user.id, 7);
        assert_eq!(user.last_name, "Brown-Smith");
        assert_eq!(user.address, None);
    }

    #[test]
    fn test_born_between_excludes_bounds() {
        let user = User::with_id(1, details());
        let birth = user.birth_date;
        let later = NaiveDate::from_ymd_opt(2006, 2, 20).unwrap();
        let earlier = NaiveDate::from_ymd_opt(1995, 1, 1).unwrap();

        assert!(user.born_between(earlier, later));
        assert!(!user.born_between(birth, later));
        assert!(!user.born_between(earlier, birth));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(User::with_id(1, details())).unwrap();
        assert_eq!(json["firstName"], "Eric");
        assert_eq!(json["birthDate"], "2002-03-14");
        assert!(json["phoneNumber"].is_null());
    }
}
