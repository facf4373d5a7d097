use crate::error::Result;
use rpassword::prompt_password;
use serde::Deserialize;
use std::fmt;

pub const MASK: &str = "********";

/// A password that never shows up in Debug output or log lines.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Secret {
        Secret(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// The password twice, newline terminated, as smbpasswd -s reads it.
    pub fn confirmation_input(&self) -> String {
        format!("{0}\n{0}\n", self.0)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", MASK)
    }
}

pub fn get_password() -> Result<Secret> {
    Ok(Secret(prompt_password("Enter samba password: ")?))
}

/// Replace every occurrence of each non-empty secret in `text`.
pub fn redact(text: &str, secrets: &[Secret]) -> String {
    let mut out = text.to_owned();
    for secret in secrets {
        if !secret.0.is_empty() {
            out = out.replace(&secret.0, MASK);
        }
    }
    out
}
