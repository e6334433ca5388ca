//! Unit tests for session request validation.

use crate::session::domain::{
    LoginCredentials, PasswordChange, ProfileUpdate, Registration, Role, SessionDomainError,
};
use rstest::rstest;

#[rstest]
#[case("", "secret", SessionDomainError::MissingField("email"))]
#[case("ada@example.com", "  ", SessionDomainError::MissingField("password"))]
fn login_rejects_blank_fields(
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: SessionDomainError,
) {
    let result = LoginCredentials::new(email, password).validate();
    assert_eq!(result, Err(expected));
}

#[rstest]
#[case("", "ada@example.com", "pw", SessionDomainError::MissingField("username"))]
#[case("ada", "", "pw", SessionDomainError::MissingField("email"))]
#[case(
    "ada",
    "ada.example.com",
    "pw",
    SessionDomainError::InvalidEmail("ada.example.com".to_owned())
)]
#[case("ada", "ada@example.com", "", SessionDomainError::MissingField("password"))]
fn registration_validation(
    #[case] username: &str,
    #[case] email: &str,
    #[case] password: &str,
    #[case] expected: SessionDomainError,
) {
    let result = Registration::new(username, email, password).validate();
    assert_eq!(result, Err(expected));
}

#[rstest]
fn registration_accepts_complete_fields() {
    let registration = Registration::new("ada", "ada@example.com", "pw");
    assert_eq!(registration.validate(), Ok(()));
}

#[rstest]
fn empty_profile_update_is_rejected() {
    assert_eq!(
        ProfileUpdate::default().validate(),
        Err(SessionDomainError::EmptyProfileUpdate)
    );
}

#[rstest]
#[case("old", "new", "other", Err(SessionDomainError::PasswordMismatch))]
#[case("old", "", "", Err(SessionDomainError::MissingField("new password")))]
#[case("", "new", "new", Err(SessionDomainError::MissingField("current password")))]
#[case("old", "new", "new", Ok(()))]
fn password_change_validation(
    #[case] current: &str,
    #[case] new: &str,
    #[case] confirmation: &str,
    #[case] expected: Result<(), SessionDomainError>,
) {
    assert_eq!(
        PasswordChange::new(current, new, confirmation).validate(),
        expected
    );
}

#[rstest]
fn secrets_are_redacted_in_debug_output() {
    let credentials = LoginCredentials::new("ada@example.com", "hunter2");
    let change = PasswordChange::new("hunter2", "hunter3", "hunter3");
    assert!(!format!("{credentials:?}").contains("hunter2"));
    assert!(!format!("{change:?}").contains("hunter"));
}

#[rstest]
#[case("admin", Role::Admin)]
#[case("team_member", Role::TeamMember)]
#[case("auditor", Role::Other("auditor".to_owned()))]
fn role_round_trips_wire_name(#[case] wire: &str, #[case] expected: Role) {
    let role = Role::from_wire(wire);
    assert_eq!(role, expected);
    assert_eq!(role.as_str(), wire);
}
