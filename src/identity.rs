//! Usernames presented in the Basic-auth username field.
//!
//! DirectAdmin lets an admin or reseller act as one of its users by
//! sending `owner|user` as the username. The stack always holds the
//! owner and at most one acting identity.

const SEPARATOR: char = '|';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityStack {
    primary: String,
    acting: Option<String>,
}

impl IdentityStack {
    /// Split a `|`-joined username string; the first segment is the owner.
    ///
    /// Segments past the second are kept verbatim in the acting slot so
    /// the joined form is unchanged.
    pub fn parse(usernames: &str) -> Self {
        match usernames.split_once(SEPARATOR) {
            Some((primary, acting)) => Self {
                primary: primary.to_string(),
                acting: Some(acting.to_string()),
            },
            None => Self {
                primary: usernames.to_string(),
                acting: None,
            },
        }
    }

    pub fn primary(&self) -> &str {
        &self.primary
    }

    pub fn acting(&self) -> Option<&str> {
        self.acting.as_deref()
    }

    pub fn len(&self) -> usize {
        if self.acting.is_some() {
            2
        } else {
            1
        }
    }

    // Never empty: the primary identity cannot be removed.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn login_as(&mut self, username: impl Into<String>) {
        self.acting = Some(username.into());
    }

    pub fn logout(&mut self) {
        self.acting = None;
    }

    /// The Basic-auth username field
    pub fn joined(&self) -> String {
        match &self.acting {
            Some(acting) => format!("{}{}{}", self.primary, SEPARATOR, acting),
            None => self.primary.clone(),
        }
    }
}
