//! User domain entity and related types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{PROFILE_ADMIN, PROFILE_OWNER, PROFILE_USER};

/// Database identifier of a user
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    pub fn new(id: i32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::str::FromStr for UserId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i32>().map(Self)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User profiles, ordered by privilege
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Profile {
    #[default]
    User,
    Admin,
    Owner,
}

impl Profile {
    /// Privilege rank; higher outranks lower
    pub fn rank(&self) -> u8 {
        match self {
            Profile::User => 0,
            Profile::Admin => 1,
            Profile::Owner => 2,
        }
    }

    /// Check if this profile outranks `other`
    pub fn outranks(&self, other: &Profile) -> bool {
        self.rank() > other.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::User => PROFILE_USER,
            Profile::Admin => PROFILE_ADMIN,
            Profile::Owner => PROFILE_OWNER,
        }
    }
}

impl From<&str> for Profile {
    fn from(s: &str) -> Self {
        match s {
            PROFILE_OWNER => Profile::Owner,
            PROFILE_ADMIN => Profile::Admin,
            _ => Profile::User,
        }
    }
}

impl From<Profile> for String {
    fn from(profile: Profile) -> Self {
        profile.as_str().to_string()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub cpf: String,
    pub age: String,
    pub activation_status: bool,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.activation_status
    }

    /// Check if this user may change the activation status of `target`.
    ///
    /// Nobody manages themselves, and the requester must outrank the target.
    pub fn can_manage(&self, target: &User) -> bool {
        self.id != target.id && self.profile.outranks(&target.profile)
    }
}

/// Validated data for a new user
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub cpf: String,
    pub age: String,
    pub profile: Profile,
}

/// Full replacement of a user's editable fields
#[derive(Debug, Clone, PartialEq)]
pub struct UserChanges {
    pub name: String,
    pub cpf: String,
    pub age: String,
}

/// How a single user is looked up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(UserId),
    Cpf(String),
}

impl fmt::Display for UserLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserLookup::Id(id) => write!(f, "{{'id': {}}}", id),
            UserLookup::Cpf(cpf) => write!(f, "{{'cpf': '{}'}}", cpf),
        }
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Unique user identifier
    #[schema(value_type = i32, example = 1)]
    pub id: UserId,
    #[schema(example = "Maria Silva")]
    pub name: String,
    /// National ID, 11 digits
    #[schema(example = "52998224725")]
    pub cpf: String,
    #[schema(example = "31")]
    pub age: String,
    pub activation_status: bool,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            cpf: user.cpf,
            age: user.age,
            activation_status: user.activation_status,
            profile: user.profile,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32, profile: Profile) -> User {
        let now = Utc::now();
        User {
            id: UserId::new(id),
            name: format!("user {}", id),
            cpf: "52998224725".to_string(),
            age: "30".to_string(),
            activation_status: true,
            profile,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_profile_ranks() {
        assert!(Profile::Owner.outranks(&Profile::Admin));
        assert!(Profile::Admin.outranks(&Profile::User));
        assert!(!Profile::Admin.outranks(&Profile::Admin));
        assert!(!Profile::User.outranks(&Profile::Owner));
    }

    #[test]
    fn test_profile_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Profile::Admin).unwrap(), "\"ADMIN\"");
        let parsed: Profile = serde_json::from_str("\"OWNER\"").unwrap();
        assert_eq!(parsed, Profile::Owner);
        assert_eq!(Profile::from("garbage"), Profile::User);
    }

    #[test]
    fn test_can_manage_requires_higher_rank() {
        let owner = user(1, Profile::Owner);
        let admin = user(2, Profile::Admin);
        let other_admin = user(3, Profile::Admin);
        let plain = user(4, Profile::User);

        assert!(owner.can_manage(&admin));
        assert!(admin.can_manage(&plain));
        assert!(!admin.can_manage(&other_admin));
        assert!(!plain.can_manage(&admin));
        assert!(!owner.can_manage(&owner));
    }

    #[test]
    fn test_user_id_parses_and_serializes_as_number() {
        let id: UserId = " 42 ".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        assert!("abc".parse::<UserId>().is_err());
    }

    #[test]
    fn test_lookup_display() {
        assert_eq!(UserLookup::Id(UserId::new(7)).to_string(), "{'id': 7}");
        assert_eq!(
            UserLookup::Cpf("52998224725".to_string()).to_string(),
            "{'cpf': '52998224725'}"
        );
    }
}
