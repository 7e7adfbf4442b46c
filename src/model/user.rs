use crate::framework::Resource;
use serde::{Deserialize, Serialize};

/// A catalog account (`GET user/{id}/`, `GET me/`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    /// Creates a user as the backend would echo it back.
    pub fn new(id: u64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            email: None,
            role: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Resource for User {
    type Id = u64;
    type Summary = User;
    type Create = SignUp;
    type Update = UserUpdate;

    const PATH: &'static str = "user";
}

/// Body of `POST login/`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Answer of `POST login/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Body of `POST signup/`. The backend checks that both passwords match.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password1: String,
    pub password2: String,
}

impl std::fmt::Debug for SignUp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignUp")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}
