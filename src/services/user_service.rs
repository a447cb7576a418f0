use tracing::info;

use crate::db::repositories::user_repository::UserRepository;
use crate::db::DbPool;
use crate::error::{AppError, AppResult};
use crate::models::user::{UserAccount, UserInsert, UserRegistration};
use crate::utils::password;

/// Account registration and credential verification. Thin by design;
/// everything interesting lives in the password hashing.
pub struct UserService {
    db: DbPool,
}

impl UserService {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn register(&self, registration: &UserRegistration) -> AppResult<i64> {
        if registration.username.trim().is_empty() || registration.password.is_empty() {
            return Err(AppError::validation(
                "아이디와 비밀번호를 모두 입력해주세요",
            ));
        }

        let conn = self.db.get_connection()?;

        if UserRepository::find_id_by_username(&conn, &registration.username)?.is_some() {
            return Err(AppError::conflict("이미 존재하는 아이디입니다"));
        }

        let insert = UserInsert {
            username: registration.username.clone(),
            password_hash: password::hash_password(&registration.password)?,
            name: registration.name.clone(),
            birthdate: registration.birthdate.clone(),
            gender: registration.gender.clone(),
            region_si_do: registration.region_si_do.clone(),
            region_gu: registration.region_gu.clone(),
        };

        let user_id = UserRepository::insert(&conn, &insert)?;
        info!(target: "app::user", user_id, username = %registration.username, "registered user");

        Ok(user_id)
    }

    /// Verify credentials. Unknown username and wrong password produce
    /// the same error so the response doesn't leak which one failed.
    pub fn verify(&self, username: &str, password_input: &str) -> AppResult<UserAccount> {
        let conn = self.db.get_connection()?;

        let account = UserRepository::find_by_username(&conn, username)?
            .ok_or_else(invalid_credentials)?;

        if !password::verify_password(password_input, &account.password_hash)? {
            return Err(invalid_credentials());
        }

        Ok(account)
    }
}

fn invalid_credentials() -> AppError {
    AppError::validation("아이디 또는 비밀번호가 일치하지 않습니다")
}
