//! Authentication test helpers
//!
//! Tokens are signed with [`TEST_JWT_SECRET`](super::TEST_JWT_SECRET), so
//! they verify against [`TestApp`](super::TestApp). Without a database the
//! auth middleware trusts the claims, which lets chat tests act as any
//! virtual number.

use chrono::Utc;
use rand::Rng;
use sqlx::PgPool;
use uuid::Uuid;

use vnchat::backend::auth::sessions::create_token;
use vnchat::backend::auth::users::{create_user, NewUser, Role, User};

use super::app::TEST_JWT_SECRET;

/// Test user credentials
pub struct TestUser {
    pub user: User,
    pub password: String,
    pub token: String,
}

/// A user that exists only in memory
pub fn detached_user(virtual_number: &str, role: Role) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: format!("User {virtual_number}"),
        email: format!("{virtual_number}@example.com"),
        password_hash: String::new(),
        phone: "5550000000".to_string(),
        virtual_number: virtual_number.to_string(),
        role: role.as_str().to_string(),
        kyc_verified: false,
        created_at: now,
        updated_at: now,
    }
}

/// Token for a detached user with the given virtual number
pub fn token_for(virtual_number: &str) -> String {
    create_token(TEST_JWT_SECRET, &detached_user(virtual_number, Role::User))
        .expect("Failed to create test token")
}

pub fn admin_token() -> String {
    create_token(TEST_JWT_SECRET, &detached_user("99999999999", Role::Admin))
        .expect("Failed to create test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Create a test user in the database with a unique email and number
pub async fn create_test_user(pool: &PgPool, password: &str) -> TestUser {
    let suffix = Uuid::new_v4().simple().to_string();
    let password_hash = bcrypt::hash(password, 4).expect("Failed to hash password");
    let virtual_number = vnchat::backend::auth::virtual_number::generate_virtual_number();

    let user = create_user(
        pool,
        &NewUser {
            name: "Test User".to_string(),
            email: format!("test_{suffix}@example.com"),
            password_hash,
            phone: format!("{:010}", rand::thread_rng().gen_range(0..10_000_000_000u64)),
            virtual_number,
        },
    )
    .await
    .expect("Failed to create test user");

    let token = create_token(TEST_JWT_SECRET, &user).expect("Failed to create test token");

    TestUser {
        user,
        password: password.to_string(),
        token,
    }
}
