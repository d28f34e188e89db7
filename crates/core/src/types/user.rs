//! Dashboard users.

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Width of the zero-padded display code derived from the numeric user id.
pub const USER_NUMBER_WIDTH: usize = 7;

/// Postal address as tracked by the dashboard.
///
/// The external source also carries a house number and postal code; the
/// dashboard does not track them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: String,
    pub street: String,
}

/// A dashboard user.
///
/// `id` is assigned by the external API on creation and immutable
/// thereafter; only the offline fallback path synthesizes one locally.
/// `role`, `department`, and the boolean flags have no external
/// representation and are kept alive through the local profile overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<Address>,
    /// Group label shown in the user grid.
    pub role: String,
    pub department: String,
    pub admin: bool,
    pub representative: bool,
    /// Display code: the numeric id left-padded with zeros.
    pub user_number: String,
}

impl User {
    /// Derive the zero-padded display code for an id.
    #[must_use]
    pub fn user_number_for(id: UserId) -> String {
        format!("{:0width$}", id.as_i32(), width = USER_NUMBER_WIDTH)
    }
}

/// Input for creating a user.
///
/// The id and display code are assigned later - by the external API on the
/// remote path, synthesized on the fallback path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: Option<Address>,
    pub role: String,
    pub department: String,
    pub admin: bool,
    pub representative: bool,
}

impl NewUser {
    /// Materialize the user under an assigned id.
    #[must_use]
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            address: self.address,
            role: self.role,
            department: self.department,
            admin: self.admin,
            representative: self.representative,
            user_number: User::user_number_for(id),
        }
    }
}

/// Partial update for a user. Unset fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<Address>,
    pub role: Option<String>,
    pub department: Option<String>,
    pub admin: Option<bool>,
    pub representative: Option<bool>,
}

impl UserPatch {
    /// Shallow-merge the set fields onto `user`.
    pub fn apply(&self, user: &mut User) {
        if let Some(username) = &self.username {
            user.username = username.clone();
        }
        if let Some(email) = &self.email {
            user.email = email.clone();
        }
        if let Some(first_name) = &self.first_name {
            user.first_name = first_name.clone();
        }
        if let Some(last_name) = &self.last_name {
            user.last_name = last_name.clone();
        }
        if let Some(phone) = &self.phone {
            user.phone = phone.clone();
        }
        if let Some(address) = &self.address {
            user.address = Some(address.clone());
        }
        if let Some(role) = &self.role {
            user.role = role.clone();
        }
        if let Some(department) = &self.department {
            user.department = department.clone();
        }
        if let Some(admin) = self.admin {
            user.admin = admin;
        }
        if let Some(representative) = self.representative {
            user.representative = representative;
        }
    }
}
