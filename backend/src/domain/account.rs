//! Customer account primitives: registration input, credentials, and the
//! stored account record.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use serde::Serialize;
use zeroize::Zeroizing;

use super::validation::required_text;
use super::{FieldViolation, Rule, UserId};

/// Minimum length for both logins and passwords.
pub const CREDENTIAL_MIN_CHARS: usize = 6;
const LOGIN_MAX_CHARS: usize = 64;
const PASSWORD_MAX_CHARS: usize = 128;
const NAME_MAX_CHARS: usize = 64;
const PHONE_MAX_CHARS: usize = 32;

/// Account login, unique across the station.
///
/// ## Invariants
/// - Trimmed and lower-cased, so `Driver01` and `driver01` collide.
/// - Between 6 and 64 characters.
///
/// # Examples
/// ```
/// use service_station::domain::Login;
///
/// let login = Login::new("  Driver01 ").expect("valid login");
/// assert_eq!(login.as_ref(), "driver01");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Login(String);

impl Login {
    /// Validate and normalise a raw login.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        let normalised = raw.trim().to_lowercase();
        let length = normalised.chars().count();
        if length == 0 {
            return Err(FieldViolation::new(
                "login",
                Rule::Empty,
                "login must not be empty",
            ));
        }
        if length < CREDENTIAL_MIN_CHARS {
            return Err(FieldViolation::new(
                "login",
                Rule::TooShort,
                format!("login must be at least {CREDENTIAL_MIN_CHARS} characters"),
            ));
        }
        if length > LOGIN_MAX_CHARS {
            return Err(FieldViolation::new(
                "login",
                Rule::TooLong,
                format!("login must be at most {LOGIN_MAX_CHARS} characters"),
            ));
        }
        Ok(Self(normalised))
    }

    /// Rehydrate a login already validated by storage.
    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cleartext password held only for the duration of a request.
///
/// The buffer is zeroed on drop and the value never appears in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a raw password. Whitespace is significant and kept.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        let length = raw.chars().count();
        if length == 0 {
            return Err(FieldViolation::new(
                "password",
                Rule::Empty,
                "password must not be empty",
            ));
        }
        if length < CREDENTIAL_MIN_CHARS {
            return Err(FieldViolation::new(
                "password",
                Rule::TooShort,
                format!("password must be at least {CREDENTIAL_MIN_CHARS} characters"),
            ));
        }
        if length > PASSWORD_MAX_CHARS {
            return Err(FieldViolation::new(
                "password",
                Rule::TooLong,
                format!("password must be at most {PASSWORD_MAX_CHARS} characters"),
            ));
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the cleartext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Stored one-way digest of a password, in PHC string format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest produced by a password hasher or read from storage.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

impl AsRef<str> for PasswordDigest {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Given name or family name of a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name for `field` (`name` or `lastName`).
    pub fn new(field: &'static str, raw: &str) -> Result<Self, FieldViolation> {
        required_text(field, raw, NAME_MAX_CHARS).map(Self)
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Contact phone number. Free text; may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Trim and bound a phone number.
    pub fn new(raw: &str) -> Result<Self, FieldViolation> {
        let trimmed = raw.trim();
        if trimmed.chars().count() > PHONE_MAX_CHARS {
            return Err(FieldViolation::new(
                "phone",
                Rule::TooLong,
                format!("phone must be at most {PHONE_MAX_CHARS} characters"),
            ));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub(crate) fn from_stored(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Phone {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated registration form.
#[derive(Debug, Clone)]
pub struct Registration {
    pub login: Login,
    pub password: Password,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: Phone,
}

/// Raw registration fields as supplied by a client.
#[derive(Debug, Clone, Copy)]
pub struct RegistrationParts<'a> {
    pub login: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone: &'a str,
}

impl Registration {
    /// Validate every field in order: login, password, names, phone.
    ///
    /// # Examples
    /// ```
    /// use service_station::domain::{Registration, RegistrationParts, Rule};
    ///
    /// let err = Registration::try_from_parts(RegistrationParts {
    ///     login: "abc",
    ///     password: "x",
    ///     first_name: "Ann",
    ///     last_name: "Lee",
    ///     phone: "",
    /// })
    /// .expect_err("short login");
    /// assert_eq!(err.field(), "login");
    /// assert_eq!(err.rule(), Rule::TooShort);
    /// ```
    pub fn try_from_parts(parts: RegistrationParts<'_>) -> Result<Self, FieldViolation> {
        Ok(Self {
            login: Login::new(parts.login)?,
            password: Password::new(parts.password)?,
            first_name: PersonName::new("name", parts.first_name)?,
            last_name: PersonName::new("lastName", parts.last_name)?,
            phone: Phone::new(parts.phone)?,
        })
    }
}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `login` is trimmed, lower-cased, and non-empty.
/// - `password` is at least six characters.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    login: String,
    password: Password,
}

impl LoginCredentials {
    /// Construct credentials from raw login and password inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, FieldViolation> {
        let normalised = login.trim().to_lowercase();
        if normalised.is_empty() {
            return Err(FieldViolation::new(
                "login",
                Rule::Empty,
                "login must not be empty",
            ));
        }
        Ok(Self {
            login: normalised,
            password: Password::new(password)?,
        })
    }

    /// Normalised login suitable for lookups.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Account data handed to storage on registration.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub login: Login,
    pub password_digest: PasswordDigest,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: Phone,
}

/// Stored customer account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: UserId,
    pub login: Login,
    pub password_digest: PasswordDigest,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub phone: Phone,
    pub has_profile_image: bool,
}

/// Public projection of an account, without credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub login: Login,
    pub name: PersonName,
    pub last_name: PersonName,
    pub phone: Phone,
    pub has_profile_image: bool,
}

impl From<Account> for Profile {
    fn from(value: Account) -> Self {
        Self {
            login: value.login,
            name: value.first_name,
            last_name: value.last_name,
            phone: value.phone,
            has_profile_image: value.has_profile_image,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn parts<'a>(login: &'a str, password: &'a str) -> RegistrationParts<'a> {
        RegistrationParts {
            login,
            password,
            first_name: "Ann",
            last_name: "Lee",
            phone: "+1 555 0100",
        }
    }

    #[rstest]
    #[case("", "secret1", "login", Rule::Empty)]
    #[case("abcde", "secret1", "login", Rule::TooShort)]
    #[case("driver01", "", "password", Rule::Empty)]
    #[case("driver01", "12345", "password", Rule::TooShort)]
    #[case("abc", "1", "login", Rule::TooShort)]
    fn registration_rejects_first_violation(
        #[case] login: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] rule: Rule,
    ) {
        let err = Registration::try_from_parts(parts(login, password)).expect_err("invalid");
        assert_eq!(err.field(), field);
        assert_eq!(err.rule(), rule);
    }

    #[rstest]
    fn registration_rejects_blank_last_name() {
        let mut raw = parts("driver01", "secret1");
        raw.last_name = "  ";
        let err = Registration::try_from_parts(raw).expect_err("blank last name");
        assert_eq!(err.field(), "lastName");
        assert_eq!(err.rule(), Rule::Empty);
    }

    #[rstest]
    fn registration_normalises_login() {
        let reg = Registration::try_from_parts(parts(" Driver01 ", "secret1")).expect("valid");
        assert_eq!(reg.login.as_ref(), "driver01");
        assert_eq!(reg.password.expose(), "secret1");
    }

    #[rstest]
    #[case("", "secret1", "login")]
    #[case("   ", "secret1", "login")]
    #[case("driver01", "short", "password")]
    fn credentials_reject(#[case] login: &str, #[case] password: &str, #[case] field: &str) {
        let err = LoginCredentials::try_from_parts(login, password).expect_err("invalid");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn credentials_lowercase_login() {
        let creds = LoginCredentials::try_from_parts("DRIVER01", "secret1").expect("valid");
        assert_eq!(creds.login(), "driver01");
    }

    #[rstest]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter22").expect("valid");
        assert!(!format!("{password:?}").contains("hunter22"));
    }
}
