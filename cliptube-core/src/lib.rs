pub mod identifiers;
pub mod request;

pub mod token {
    use std::{fmt::Display, str::FromStr};

    use serde::{Deserialize, Serialize};

    /// A 128-bit random token used to namespace the scratch files of one
    /// request. Collision probability across concurrent requests is
    /// negligible.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct SessionToken(uuid::Uuid);

    impl SessionToken {
        pub fn generate() -> Self {
            SessionToken(uuid::Uuid::new_v4())
        }
    }

    impl FromStr for SessionToken {
        type Err = uuid::Error;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            Ok(SessionToken(uuid::Uuid::from_str(s)?))
        }
    }

    impl Display for SessionToken {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

}
