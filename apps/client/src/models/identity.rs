use serde::{Deserialize, Serialize};

/// The authenticated identity, as handed back by the external auth provider.
/// Exists only after a successful sign-in; cleared on sign-out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
}
