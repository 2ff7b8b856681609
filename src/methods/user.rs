use regex::Regex;

use crate::helper_model::RentalError;
use crate::model::{User, UserRole};

/// The one address that signs in with the admin role.
pub const ADMIN_EMAIL: &str = "admin@example.com";

pub fn is_valid_email(email: &str) -> bool {
    // RFC 5321 limit
    if email.len() > 254 {
        return false;
    }
    lazy_static::lazy_static! {
        static ref EMAIL_REGEX: Regex = Regex::new(
            r"(?i)^[a-z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+(?:\.[a-z0-9-](?:[a-z0-9-]{0,61}[a-z0-9])+)+$"
        ).expect("Invalid regex");
    }
    EMAIL_REGEX.is_match(email)
}

/// Stable id for an email: the first 8 bytes of its blake3 digest, hex encoded.
pub fn user_id_for_email(email: &str) -> String {
    let digest = blake3::hash(email.trim().to_lowercase().as_bytes());
    hex::encode(&digest.as_bytes()[..8])
}

fn role_for_email(email: &str) -> UserRole {
    if email.trim().eq_ignore_ascii_case(ADMIN_EMAIL) {
        UserRole::Admin
    } else {
        UserRole::User
    }
}

fn display_name(email: &str) -> String {
    email.split('@').next().unwrap_or_default().to_string()
}

/// Mock sign-in: any password is accepted. The display name is the local part
/// of the email address.
pub fn sign_in(email: &str) -> Result<User, RentalError> {
    let email = email.trim();
    if !is_valid_email(email) {
        return Err(RentalError::InvalidInput(format!("'{}' is not a valid email", email)));
    }
    Ok(User {
        id: user_id_for_email(email),
        name: display_name(email),
        email: email.to_string(),
        role: role_for_email(email),
    })
}

/// Mock registration. New accounts never get the admin role.
pub fn register(name: &str, email: &str) -> Result<User, RentalError> {
    let email = email.trim();
    let name = name.trim();
    if name.is_empty() {
        return Err(RentalError::InvalidInput(String::from("name must not be empty")));
    }
    if !is_valid_email(email) {
        return Err(RentalError::InvalidInput(format!("'{}' is not a valid email", email)));
    }
    Ok(User {
        id: user_id_for_email(email),
        name: name.to_string(),
        email: email.to_string(),
        role: UserRole::User,
    })
}

/// Rebuild the caller from an `auth` header of the form `<email>$<user id>`.
/// The id must be the one issued for that email.
pub fn user_from_auth(auth: &str) -> Option<User> {
    let (email, user_id) = auth.split_once('$')?;
    let user = sign_in(email).ok()?;
    if user.id != user_id.trim() {
        return None;
    }
    Some(user)
}

pub fn auth_header_for(user: &User) -> String {
    format!("{}${}", user.email, user.id)
}
