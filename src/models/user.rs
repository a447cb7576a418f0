use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub region_si_do: Option<String>,
    pub region_gu: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub region_si_do: Option<String>,
    #[serde(default)]
    pub region_gu: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UserInsert {
    pub username: String,
    pub password_hash: String,
    pub name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub region_si_do: Option<String>,
    pub region_gu: Option<String>,
}
