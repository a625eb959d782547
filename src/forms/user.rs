use crate::models::User as UserModel;
use serde_derive::{Deserialize, Serialize};

/// Envelope returned by the auth provider's "who am I" endpoint.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserForm {
    pub user: User,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub email_confirmed: bool,
}

impl TryInto<UserModel> for UserForm {
    type Error = String;

    fn try_into(self) -> Result<UserModel, Self::Error> {
        if self.user.id.trim().is_empty() {
            return Err("auth server returned a user without id".to_string());
        }

        Ok(UserModel {
            id: self.user.id,
            first_name: self.user.first_name,
            last_name: self.user.last_name,
            email: self.user.email,
            email_confirmed: self.user.email_confirmed,
        })
    }
}
