use rusqlite::{named_params, Connection, OptionalExtension, Row};

use crate::error::AppResult;
use crate::models::user::{UserAccount, UserInsert};

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub region_si_do: Option<String>,
    pub region_gu: Option<String>,
}

impl UserRow {
    pub fn into_record(self) -> UserAccount {
        UserAccount {
            id: self.id,
            username: self.username,
            password_hash: self.password,
            name: self.name,
            birthdate: self.birthdate,
            gender: self.gender,
            region_si_do: self.region_si_do,
            region_gu: self.region_gu,
        }
    }
}

impl TryFrom<&Row<'_>> for UserRow {
    type Error = rusqlite::Error;

    fn try_from(row: &Row<'_>) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.get("id")?,
            username: row.get("username")?,
            password: row.get("password")?,
            name: row.get("name")?,
            birthdate: row.get("birthdate")?,
            gender: row.get("gender")?,
            region_si_do: row.get("region_si_do")?,
            region_gu: row.get("region_gu")?,
        })
    }
}

pub struct UserRepository;

impl UserRepository {
    pub fn insert(conn: &Connection, insert: &UserInsert) -> AppResult<i64> {
        conn.execute(
            r#"
                INSERT INTO users (
                    username,
                    password,
                    name,
                    birthdate,
                    gender,
                    region_si_do,
                    region_gu
                ) VALUES (
                    :username,
                    :password,
                    :name,
                    :birthdate,
                    :gender,
                    :region_si_do,
                    :region_gu
                )
            "#,
            named_params! {
                ":username": &insert.username,
                ":password": &insert.password_hash,
                ":name": &insert.name,
                ":birthdate": &insert.birthdate,
                ":gender": &insert.gender,
                ":region_si_do": &insert.region_si_do,
                ":region_gu": &insert.region_gu,
            },
        )?;

        Ok(conn.last_insert_rowid())
    }

    pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<UserAccount>> {
        let mut stmt = conn.prepare(
            r#"
                SELECT
                    id,
                    username,
                    password,
                    name,
                    birthdate,
                    gender,
                    region_si_do,
                    region_gu
                FROM users
                WHERE username = :username
            "#,
        )?;

        let row = stmt
            .query_row(named_params! {":username": username}, |row| {
                UserRow::try_from(row)
            })
            .optional()?;

        Ok(row.map(UserRow::into_record))
    }

    pub fn find_id_by_username(conn: &Connection, username: &str) -> AppResult<Option<i64>> {
        let mut stmt = conn.prepare("SELECT id FROM users WHERE username = :username")?;

        let id = stmt
            .query_row(named_params! {":username": username}, |row| row.get(0))
            .optional()?;

        Ok(id)
    }
}
