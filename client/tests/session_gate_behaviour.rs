//! Behaviour tests for session-gated navigation.
//!
//! These scenarios confirm that the guard gates every navigation intent on
//! the current session snapshot: signing in unlocks the shell, and signing
//! out re-gates the very next navigation attempt.

use std::sync::Arc;

use mockall::mock;
use rstest::rstest;
use rstest_bdd_macros::{given, then, when};

use client::domain::{
    AuthFlow, Destination, IdentityError, IdentityProvider, NavigationDecision, NavigationGuard,
    ProviderSelector, Session, SessionStore,
};

mock! {
    Provider {}

    #[async_trait::async_trait]
    impl IdentityProvider for Provider {
        async fn sign_in(&self, selector: ProviderSelector) -> Result<Session, IdentityError>;
        async fn sign_out(&self) -> Result<(), IdentityError>;
    }
}

#[derive(Clone)]
struct World {
    guard: NavigationGuard,
    flow: AuthFlow,
}

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime builds")
        .block_on(future)
}

fn shell_destinations() -> Vec<Destination> {
    vec![
        Destination::Home,
        Destination::NewHelpRequest,
        Destination::HelpRequestDetail {
            id: "abc123".to_owned(),
        },
        Destination::NewQuestion,
        Destination::NewContent,
        Destination::NewProject,
        Destination::NewEvent,
    ]
}

#[given("a signed-out session store behind the guard")]
fn world() -> World {
    let mut provider = MockProvider::new();
    provider.expect_sign_in().returning(|_| {
        Session::try_from_parts("tok-nav", "user-nav", None)
            .map_err(|err| IdentityError::rejected(err.to_string()))
    });
    provider.expect_sign_out().returning(|| Ok(()));

    let sessions = Arc::new(SessionStore::new());
    let guard = NavigationGuard::new(Arc::clone(&sessions));
    let flow = AuthFlow::new(Arc::new(provider), sessions);
    World { guard, flow }
}

#[when("the user signs in with GitHub")]
fn the_user_signs_in(world: World) -> World {
    block_on(world.flow.sign_in(ProviderSelector::GitHub)).expect("sign-in succeeds");
    world
}

#[when("the user signs out")]
fn the_user_signs_out(world: World) -> World {
    block_on(world.flow.sign_out()).expect("sign-out succeeds");
    world
}

#[then("every shell destination redirects to sign-in")]
fn navigation_is_gated(world: World) {
    for destination in shell_destinations() {
        assert_eq!(
            world.guard.resolve(&destination),
            NavigationDecision::Redirect(Destination::SignIn),
            "signed-out intent to {} must be cancelled",
            destination.path(),
        );
    }
    assert_eq!(
        world.guard.resolve(&Destination::SignIn),
        NavigationDecision::Allow,
        "the sign-in screen itself stays reachable",
    );
}

#[then("the shell is reachable and sign-in redirects home")]
fn navigation_is_unlocked(world: World) {
    for destination in shell_destinations() {
        assert_eq!(
            world.guard.resolve(&destination),
            NavigationDecision::Allow,
            "authenticated intent to {} must proceed",
            destination.path(),
        );
    }
    assert_eq!(
        world.guard.resolve(&Destination::SignIn),
        NavigationDecision::Redirect(Destination::Home),
    );
}

#[rstest]
fn unauthenticated_navigation_is_gated() {
    navigation_is_gated(world());
}

#[rstest]
fn signing_in_unlocks_the_shell() {
    navigation_is_unlocked(the_user_signs_in(world()));
}

#[rstest]
fn signing_out_regates_the_next_navigation() {
    navigation_is_gated(the_user_signs_out(the_user_signs_in(world())));
}
