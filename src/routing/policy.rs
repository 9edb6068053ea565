use crate::identity::{Role, Session};
use crate::routing::route::Route;

/// What the router should do with a navigation request. `Allow` renders the
/// screen; the other three name a redirect target class, resolved to a
/// concrete route by the guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    ToLogin,
    ToDefault,
    ToForbidden,
}

/// Pure projection of (session, requested path) onto a decision. Evaluated
/// top to bottom, first match wins:
///   - public screens bounce signed-in sessions to their landing;
///   - anonymous sessions only ever see public screens;
///   - admin screens admit admins and forbid users;
///   - technicians render their own surface and bounce home from anywhere
///     else, never to the forbidden screen.
/// Unknown paths count as generic protected screens. Set checks are per set;
/// neither route set implies the other.
pub fn decide(session: &Session, path: &str) -> Decision {
    let route = Route::parse(path);
    let public = route.map(|r| r.is_public()).unwrap_or(false);
    if public {
        return if session.is_authenticated() { Decision::ToDefault } else { Decision::Allow };
    }
    if !session.is_authenticated() {
        return Decision::ToLogin;
    }
    let admin_only = route.map(|r| r.is_admin_only()).unwrap_or(false);
    let technician_only = route.map(|r| r.is_technician_only()).unwrap_or(false);
    match session.role() {
        Some(Role::Admin) if admin_only => Decision::Allow,
        Some(Role::Technician) if technician_only => Decision::Allow,
        Some(Role::Technician) => Decision::ToDefault,
        _ if admin_only => Decision::ToForbidden,
        _ => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::UserProfile;

    fn session(role: Role) -> Session {
        let user = UserProfile {
            id: 1,
            login: "x".into(),
            role,
            organization_id: 1,
            organization_name: "Org".into(),
            is_active: true,
        };
        Session::authenticated(user, "tok".into())
    }

    #[test]
    fn anonymous_reaches_login_only() {
        let anon = Session::anonymous();
        assert_eq!(decide(&anon, "/login"), Decision::Allow);
        assert_eq!(decide(&anon, "/techvisit/home"), Decision::ToLogin);
        assert_eq!(decide(&anon, "/admin/users"), Decision::ToLogin);
        assert_eq!(decide(&anon, "/no/such/path"), Decision::ToLogin);
    }

    #[test]
    fn signed_in_bounces_off_login() {
        assert_eq!(decide(&session(Role::Admin), "/login"), Decision::ToDefault);
        assert_eq!(decide(&session(Role::Technician), "/login"), Decision::ToDefault);
    }

    #[test]
    fn admin_screens_admit_admin_forbid_user() {
        assert_eq!(decide(&session(Role::Admin), "/admin/organization"), Decision::Allow);
        assert_eq!(decide(&session(Role::Admin), "/admin/users"), Decision::Allow);
        assert_eq!(decide(&session(Role::User), "/admin/organization"), Decision::ToForbidden);
        assert_eq!(decide(&session(Role::User), "/admin/users"), Decision::ToForbidden);
    }

    #[test]
    fn technician_confined_to_own_surface() {
        let tech = session(Role::Technician);
        assert_eq!(decide(&tech, "/techvisit/my-visits"), Decision::Allow);
        assert_eq!(decide(&tech, "/techvisit/customer"), Decision::ToDefault);
        assert_eq!(decide(&tech, "/admin/organization"), Decision::ToDefault);
        assert_eq!(decide(&tech, "/no/such/path"), Decision::ToDefault);
    }

    #[test]
    fn generic_protected_screens_admit_any_non_technician() {
        assert_eq!(decide(&session(Role::User), "/techvisit/home"), Decision::Allow);
        assert_eq!(decide(&session(Role::Admin), "/techvisit/customer"), Decision::Allow);
        assert_eq!(decide(&session(Role::User), "/no/such/path"), Decision::Allow);
    }
}
