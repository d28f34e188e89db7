//! User type conversion functions.

use storekeep_core::{Address, NewUser, User, UserId, UserPatch};

use crate::store_api::types::{ApiAddress, ApiName, ApiUser, ApiUserInput};

/// Group label applied to users the external source has no role for.
pub const DEFAULT_ROLE: &str = "GENERAL MANAGER";

/// Department label applied to users the external source has no department
/// for.
pub const DEFAULT_DEPARTMENT: &str = "Management";

/// Convert an API user record into the domain shape.
///
/// The compound name is split into first/last, the address keeps only city
/// and street, and the fields the external source lacks get defaults. The
/// profile overlay is merged on top of those defaults by the user service.
#[must_use]
pub fn convert_user(user: ApiUser) -> User {
    let id = UserId::new(user.id);
    let name = user.name.unwrap_or_default();
    User {
        id,
        username: user.username,
        email: user.email,
        first_name: name.firstname,
        last_name: name.lastname,
        phone: user.phone,
        address: user.address.map(|address| Address {
            city: address.city,
            street: address.street,
        }),
        role: DEFAULT_ROLE.to_string(),
        department: DEFAULT_DEPARTMENT.to_string(),
        admin: false,
        representative: false,
        user_number: User::user_number_for(id),
    }
}

/// Build the outbound payload for creating a user.
///
/// Lossy by design: role, department, and the boolean flags cannot be
/// represented externally. They are persisted in the local profile overlay
/// instead of being silently dropped.
#[must_use]
pub fn user_to_input(user: &NewUser) -> ApiUserInput {
    ApiUserInput {
        username: Some(user.username.clone()),
        email: Some(user.email.clone()),
        phone: Some(user.phone.clone()),
        name: Some(ApiName {
            firstname: user.first_name.clone(),
            lastname: user.last_name.clone(),
        }),
        address: user.address.as_ref().map(to_api_address),
    }
}

/// Build the outbound payload for a partial user update.
///
/// Only fields present in the patch are serialized. The compound name is
/// included when either half changes, the absent half filled with an empty
/// string.
#[must_use]
pub fn patch_to_input(patch: &UserPatch) -> ApiUserInput {
    let name = if patch.first_name.is_some() || patch.last_name.is_some() {
        Some(ApiName {
            firstname: patch.first_name.clone().unwrap_or_default(),
            lastname: patch.last_name.clone().unwrap_or_default(),
        })
    } else {
        None
    };
    ApiUserInput {
        username: patch.username.clone(),
        email: patch.email.clone(),
        phone: patch.phone.clone(),
        name,
        address: patch.address.as_ref().map(to_api_address),
    }
}

/// Reconstruct the full wire address, filling the untracked fields with
/// empty values.
fn to_api_address(address: &Address) -> ApiAddress {
    ApiAddress {
        city: address.city.clone(),
        street: address.street.clone(),
        number: 0,
        zipcode: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn external_user() -> ApiUser {
        ApiUser {
            id: 12,
            email: "jlark@example.com".to_string(),
            username: "jlark".to_string(),
            name: Some(ApiName {
                firstname: "June".to_string(),
                lastname: "Lark".to_string(),
            }),
            phone: "555-0102".to_string(),
            address: Some(ApiAddress {
                city: "Riverton".to_string(),
                street: "4 Quay Rd".to_string(),
                number: 18,
                zipcode: "70421".to_string(),
            }),
        }
    }

    #[test]
    fn test_convert_user_splits_name_and_applies_defaults() {
        let user = convert_user(external_user());

        assert_eq!(user.id, UserId::new(12));
        assert_eq!(user.first_name, "June");
        assert_eq!(user.last_name, "Lark");
        assert_eq!(user.user_number, "0000012");
        assert_eq!(user.role, DEFAULT_ROLE);
        assert_eq!(user.department, DEFAULT_DEPARTMENT);
        assert!(!user.admin);
        assert!(!user.representative);

        // House number and zipcode are dropped.
        let address = user.address.expect("address should map");
        assert_eq!(address.city, "Riverton");
        assert_eq!(address.street, "4 Quay Rd");
    }

    #[test]
    fn test_round_trip_preserves_wire_fields_and_loses_local_ones() {
        let new = NewUser {
            username: "jlark".to_string(),
            email: "jlark@example.com".to_string(),
            first_name: "June".to_string(),
            last_name: "Lark".to_string(),
            phone: "555-0102".to_string(),
            address: Some(Address {
                city: "Riverton".to_string(),
                street: "4 Quay Rd".to_string(),
            }),
            role: "CLERK".to_string(),
            department: "Operations".to_string(),
            admin: true,
            representative: true,
        };

        // Simulate the API echoing back what was sent, plus an id.
        let input = user_to_input(&new);
        let echoed = ApiUser {
            id: 31,
            email: input.email.clone().unwrap_or_default(),
            username: input.username.clone().unwrap_or_default(),
            name: input.name.clone(),
            phone: input.phone.clone().unwrap_or_default(),
            address: input.address.clone(),
        };
        let round = convert_user(echoed);

        assert_eq!(round.username, new.username);
        assert_eq!(round.email, new.email);
        assert_eq!(round.phone, new.phone);
        assert_eq!(round.first_name, new.first_name);
        assert_eq!(round.last_name, new.last_name);
        assert_eq!(round.address, new.address);

        // The locally-only fields do not survive the wire.
        assert_eq!(round.role, DEFAULT_ROLE);
        assert_eq!(round.department, DEFAULT_DEPARTMENT);
        assert!(!round.admin);
        assert!(!round.representative);
    }

    #[test]
    fn test_patch_without_name_fields_omits_name() {
        let input = patch_to_input(&UserPatch {
            phone: Some("555-0199".to_string()),
            ..UserPatch::default()
        });
        assert!(input.name.is_none());
        assert!(input.username.is_none());
        assert_eq!(input.phone.as_deref(), Some("555-0199"));
    }

    #[test]
    fn test_patch_with_half_a_name_fills_the_other_half() {
        let input = patch_to_input(&UserPatch {
            first_name: Some("June".to_string()),
            ..UserPatch::default()
        });
        let name = input.name.expect("name should be present");
        assert_eq!(name.firstname, "June");
        assert_eq!(name.lastname, "");
    }

    #[test]
    fn test_outbound_address_fills_untracked_fields() {
        let input = user_to_input(&NewUser {
            username: "x".to_string(),
            email: "x@example.com".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            phone: String::new(),
            address: Some(Address {
                city: "Riverton".to_string(),
                street: "4 Quay Rd".to_string(),
            }),
            role: DEFAULT_ROLE.to_string(),
            department: DEFAULT_DEPARTMENT.to_string(),
            admin: false,
            representative: false,
        });
        let address = input.address.expect("address should map");
        assert_eq!(address.number, 0);
        assert_eq!(address.zipcode, "");
    }
}
