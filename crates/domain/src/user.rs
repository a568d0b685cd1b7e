use crate::preferences::UserPreferences;
use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// The recipient profile a due `Reminder` is resolved against. The contact
/// fields gate which delivery channels can actually be attempted: email
/// needs an address, push needs a registered device token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: ID,
    pub email: Option<String>,
    pub push_token: Option<String>,
    pub preferences: UserPreferences,
}

impl User {
    pub fn new() -> Self {
        Self {
            id: Default::default(),
            email: None,
            push_token: None,
            preferences: Default::default(),
        }
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

impl Entity for User {
    fn id(&self) -> ID {
        self.id.clone()
    }
}
