//! Integration tests for `DieselUserRepository` against embedded PostgreSQL.
//!
//! These check the parts of the `UserRepository` contract that only the
//! database can enforce: the `users_email_key` constraint and the single
//! active session token per account.
//!
//! Steps stay synchronous and share one Tokio runtime per test context so
//! database calls run deterministically.
use std::sync::{Arc, Mutex};

use daily_diet::domain::ports::{UserPersistenceError, UserRepository};
use daily_diet::domain::{Email, Password, SessionToken, User, UserAccount, UserId};
use daily_diet::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig, run_migrations};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{handle_cluster_setup_failure, provision_database, shared_cluster};

// -----------------------------------------------------------------------------
// Fixtures
// -----------------------------------------------------------------------------

#[fixture]
fn ada() -> UserAccount {
    account("11111111-1111-1111-1111-111111111111", "Ada Lovelace", "ada@example.com")
}

fn account(id: &str, name: &str, email: &str) -> UserAccount {
    let user = User::try_from_strings(id, name, email).expect("valid user");
    UserAccount::new(user, Password::new("analytical-engine").expect("non-empty password"))
}

// -----------------------------------------------------------------------------
// Test Context
// -----------------------------------------------------------------------------

struct TestContext {
    runtime: Runtime,
    repository: DieselUserRepository,
    last_insert_error: Option<UserPersistenceError>,
    superseded_token: Option<SessionToken>,
    current_token: Option<SessionToken>,
    _database: TemporaryDatabase,
}

type SharedContext = Arc<Mutex<TestContext>>;

/// Extracts values from the locked context, executes an async operation,
/// and hands the result back to the context.
fn with_context_async<F, R, U>(
    world: &SharedContext,
    extract: impl FnOnce(&TestContext) -> F,
    operation: impl FnOnce(DieselUserRepository, F) -> R,
    update: U,
) where
    R: std::future::Future,
    U: FnOnce(&mut TestContext, R::Output),
{
    let (repo, handle, extracted) = {
        let ctx = world.lock().expect("context lock");
        (
            ctx.repository.clone(),
            ctx.runtime.handle().clone(),
            extract(&ctx),
        )
    };
    let result = handle.block_on(operation(repo, extracted));
    let mut ctx = world.lock().expect("context lock");
    update(&mut ctx, result);
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let temp_db = provision_database(cluster)?;
    let database_url = temp_db.url().to_string();

    let pool = runtime
        .block_on(async {
            run_migrations(&database_url)
                .await
                .map_err(|err| err.to_string())?;
            DbPool::new(PoolConfig::new(&database_url).with_max_size(2))
                .await
                .map_err(|err| err.to_string())
        })?;

    Ok(TestContext {
        runtime,
        repository: DieselUserRepository::new(pool),
        last_insert_error: None,
        superseded_token: None,
        current_token: None,
        _database: temp_db,
    })
}

#[fixture]
fn diesel_world() -> Option<SharedContext> {
    match setup_test_context() {
        Ok(ctx) => Some(Arc::new(Mutex::new(ctx))),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

// -----------------------------------------------------------------------------
// BDD Step Definitions
// -----------------------------------------------------------------------------

#[given("a Diesel-backed user repository")]
fn a_diesel_backed_user_repository(_world: SharedContext) {}

#[given("a registered account")]
fn a_registered_account(world: SharedContext, account: UserAccount) {
    with_context_async(
        &world,
        |_| account,
        |repo, account| async move { repo.insert(&account).await },
        |_, result| result.expect("first insert succeeds"),
    );
}

#[when("another account registers with the same email")]
fn another_account_registers_with_the_same_email(world: SharedContext, email: Email) {
    let duplicate = account(
        "22222222-2222-2222-2222-222222222222",
        "Ada Byron",
        email.as_ref(),
    );
    with_context_async(
        &world,
        |_| duplicate,
        |repo, duplicate| async move { repo.insert(&duplicate).await },
        |ctx, result| ctx.last_insert_error = result.err(),
    );
}

#[when("the account logs in twice")]
fn the_account_logs_in_twice(world: SharedContext, id: UserId) {
    let first = SessionToken::generate();
    let second = SessionToken::generate();
    with_context_async(
        &world,
        |_| (id, first, second),
        |repo, (id, first, second)| async move {
            assert!(repo.replace_session_token(&id, &first).await.expect("first login"));
            assert!(repo.replace_session_token(&id, &second).await.expect("second login"));
            (first, second)
        },
        |ctx, (first, second)| {
            ctx.superseded_token = Some(first);
            ctx.current_token = Some(second);
        },
    );
}

#[then("persistence fails with a duplicate email error")]
fn persistence_fails_with_a_duplicate_email_error(world: SharedContext) {
    let ctx = world.lock().expect("context lock");
    assert!(
        matches!(ctx.last_insert_error, Some(UserPersistenceError::DuplicateEmail)),
        "expected DuplicateEmail, got: {:?}",
        ctx.last_insert_error
    );
}

#[then("only the latest session token resolves to the account")]
fn only_the_latest_session_token_resolves(world: SharedContext, expected: User) {
    let mut resolved = None;
    with_context_async(
        &world,
        |ctx| {
            (
                ctx.superseded_token.expect("first login ran"),
                ctx.current_token.expect("second login ran"),
            )
        },
        |repo, (stale, fresh)| async move {
            (
                repo.find_by_session_token(&stale).await,
                repo.find_by_session_token(&fresh).await,
            )
        },
        |_, lookups| resolved = Some(lookups),
    );

    let (stale, fresh) = resolved.expect("lookups ran");
    assert_eq!(stale.expect("stale lookup succeeds"), None);
    assert_eq!(fresh.expect("fresh lookup succeeds"), Some(expected));
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
fn diesel_insert_then_find_by_email(diesel_world: Option<SharedContext>, ada: UserAccount) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_insert_then_find_by_email skipped");
        return;
    };

    a_diesel_backed_user_repository(world.clone());
    a_registered_account(world.clone(), ada.clone());

    let email = ada.user().email().clone();
    with_context_async(
        &world,
        |_| email,
        |repo, email| async move {
            let exists = repo.email_exists(&email).await.expect("exists query");
            let found = repo
                .find_account_by_email(&email)
                .await
                .expect("find query");
            (exists, found)
        },
        |_, (exists, found)| {
            assert!(exists);
            let found = found.expect("account stored");
            assert_eq!(found.user(), ada.user());
            assert!(found.password_matches(ada.password()));
        },
    );
}

#[rstest]
fn diesel_duplicate_email_maps_to_duplicate_email(
    diesel_world: Option<SharedContext>,
    ada: UserAccount,
) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_duplicate_email_maps_to_duplicate_email skipped");
        return;
    };

    a_diesel_backed_user_repository(world.clone());
    a_registered_account(world.clone(), ada.clone());
    another_account_registers_with_the_same_email(world.clone(), ada.user().email().clone());
    persistence_fails_with_a_duplicate_email_error(world);
}

#[rstest]
fn diesel_superseded_session_token_no_longer_resolves(
    diesel_world: Option<SharedContext>,
    ada: UserAccount,
) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_superseded_session_token_no_longer_resolves skipped");
        return;
    };

    a_diesel_backed_user_repository(world.clone());
    a_registered_account(world.clone(), ada.clone());
    the_account_logs_in_twice(world.clone(), *ada.user().id());
    only_the_latest_session_token_resolves(world, ada.user().clone());
}

#[rstest]
fn diesel_replace_session_token_for_unknown_user_returns_false(
    diesel_world: Option<SharedContext>,
) {
    let Some(world) = diesel_world else {
        eprintln!(
            "SKIP-TEST-CLUSTER: diesel_replace_session_token_for_unknown_user_returns_false skipped"
        );
        return;
    };

    with_context_async(
        &world,
        |_| (UserId::random(), SessionToken::generate()),
        |repo, (id, token)| async move { repo.replace_session_token(&id, &token).await },
        |_, replaced| assert!(!replaced.expect("update query succeeds")),
    );
}
