//! Session and credential-store integration: rehydration from disk, the
//! user/token pairing rule, and guard reactions to out-of-band store edits.

use std::sync::Arc;

use anyhow::Result;
use tempfile::tempdir;

use techvisit::identity::{
    CredentialStore, FileCredentialStore, Role, SessionState, UserProfile,
};
use techvisit::routing::{protected, public, GuardOutcome, Route};

fn profile(role: Role) -> UserProfile {
    UserProfile {
        id: 12,
        login: "rainer".into(),
        role,
        organization_id: 3,
        organization_name: "Refrigeração Norte".into(),
        is_active: true,
    }
}

#[test]
fn login_round_trips_through_disk() -> Result<()> {
    let tmp = tempdir()?;
    let store = Arc::new(FileCredentialStore::new(tmp.path()));
    let mut state = SessionState::new(store.clone());
    assert!(!state.is_authenticated());

    let dest = state.login(profile(Role::User), "tok-abc".into());
    assert_eq!(dest, Route::Home);

    let stored = store.read();
    assert_eq!(stored.user, Some(profile(Role::User)));
    assert_eq!(stored.token.as_deref(), Some("tok-abc"));

    // a separate state over the same directory restores the same session
    let restored = SessionState::new(Arc::new(FileCredentialStore::new(tmp.path())));
    assert!(restored.is_authenticated());
    assert_eq!(restored.session().user(), Some(&profile(Role::User)));
    assert_eq!(restored.session().token(), Some("tok-abc"));
    Ok(())
}

#[test]
fn logout_clears_disk() -> Result<()> {
    let tmp = tempdir()?;
    let store = Arc::new(FileCredentialStore::new(tmp.path()));
    let mut state = SessionState::new(store.clone());
    state.login(profile(Role::Admin), "tok".into());

    assert_eq!(state.logout(), Route::Login);
    let stored = store.read();
    assert!(stored.user.is_none());
    assert!(stored.token.is_none());
    assert!(!tmp.path().join("user.json").exists());
    assert!(!tmp.path().join("token").exists());
    Ok(())
}

#[test]
fn rehydrate_is_idempotent() -> Result<()> {
    let tmp = tempdir()?;
    let store = Arc::new(FileCredentialStore::new(tmp.path()));
    store.write(&profile(Role::Technician), "tok")?;

    let mut state = SessionState::new(store);
    let once = state.session().clone();
    state.rehydrate();
    assert_eq!(state.session(), &once);
    state.rehydrate();
    assert_eq!(state.session(), &once);
    Ok(())
}

#[test]
fn lone_slot_stays_anonymous() -> Result<()> {
    let tmp = tempdir()?;
    let store = Arc::new(FileCredentialStore::new(tmp.path()));
    store.write(&profile(Role::User), "tok")?;

    // token without a profile
    std::fs::remove_file(tmp.path().join("user.json"))?;
    let state = SessionState::new(store.clone());
    assert!(!state.is_authenticated(), "lone token must not sign anyone in");

    // profile without a token
    store.write(&profile(Role::User), "tok")?;
    std::fs::remove_file(tmp.path().join("token"))?;
    let state = SessionState::new(store);
    assert!(!state.is_authenticated(), "lone profile must not sign anyone in");
    Ok(())
}

#[test]
fn malformed_user_json_fails_closed() -> Result<()> {
    let tmp = tempdir()?;
    let store = Arc::new(FileCredentialStore::new(tmp.path()));
    store.write(&profile(Role::Admin), "tok")?;
    std::fs::write(tmp.path().join("user.json"), "{\"id\": oops")?;

    let mut state = SessionState::new(store);
    assert!(!state.is_authenticated());
    assert_eq!(
        protected(&mut state, "/techvisit/home"),
        GuardOutcome::Redirect(Route::Login)
    );
    Ok(())
}

#[test]
fn cross_process_logout_is_detected() -> Result<()> {
    let tmp = tempdir()?;
    let mut state = SessionState::new(Arc::new(FileCredentialStore::new(tmp.path())));
    state.login(profile(Role::Admin), "tok".into());
    assert_eq!(protected(&mut state, "/techvisit/home"), GuardOutcome::Render);

    // another handle over the same directory signs out
    FileCredentialStore::new(tmp.path()).clear();
    assert_eq!(
        protected(&mut state, "/techvisit/home"),
        GuardOutcome::Redirect(Route::Login),
        "guard must notice the cleared store on the next navigation"
    );
    Ok(())
}

#[test]
fn cross_process_login_is_detected() -> Result<()> {
    let tmp = tempdir()?;
    let mut state = SessionState::new(Arc::new(FileCredentialStore::new(tmp.path())));
    assert_eq!(public(&mut state, "/login"), GuardOutcome::Render);

    FileCredentialStore::new(tmp.path()).write(&profile(Role::Technician), "tok")?;
    assert_eq!(
        public(&mut state, "/login"),
        GuardOutcome::Redirect(Route::MyVisits),
        "guard must pick up credentials written behind its back"
    );
    Ok(())
}
