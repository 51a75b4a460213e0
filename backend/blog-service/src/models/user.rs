use crate::pb::{UpdateUserRequest, UserInfo};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Account and public profile
///
/// `user_account` is the unique login name; `password_hash` is a PHC string
/// and never leaves this process.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub user_name: String,
    pub user_account: String,
    pub password_hash: String,
    pub email: String,
    pub description: String,
    pub avatar: String,
    pub ig: String,
    pub fb: String,
    pub tw: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(user_name: String, user_account: String, password_hash: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_name,
            user_account,
            password_hash,
            email,
            description: String::new(),
            avatar: String::new(),
            ig: String::new(),
            fb: String::new(),
            tw: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_proto(&self) -> UserInfo {
        UserInfo {
            user_id: self.id.to_string(),
            user_name: self.user_name.clone(),
            user_account: self.user_account.clone(),
            description: self.description.clone(),
            avatar: self.avatar.clone(),
            ig: self.ig.clone(),
            fb: self.fb.clone(),
            tw: self.tw.clone(),
            email: self.email.clone(),
        }
    }
}

/// Optional fields for profile updates; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfileUpdate {
    pub user_name: Option<String>,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub ig: Option<String>,
    pub fb: Option<String>,
    pub tw: Option<String>,
    pub email: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl From<UpdateUserRequest> for UserProfileUpdate {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            user_name: non_empty(req.user_name),
            description: non_empty(req.description),
            avatar: non_empty(req.avatar),
            ig: non_empty(req.ig),
            fb: non_empty(req.fb),
            tw: non_empty(req.tw),
            email: non_empty(req.email),
        }
    }
}

impl UserProfileUpdate {
    pub fn apply(self, user: &mut User) {
        let fields = [
            (self.user_name, &mut user.user_name),
            (self.description, &mut user.description),
            (self.avatar, &mut user.avatar),
            (self.ig, &mut user.ig),
            (self.fb, &mut user.fb),
            (self.tw, &mut user.tw),
            (self.email, &mut user.email),
        ];

        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        user.updated_at = Utc::now();
    }
}
