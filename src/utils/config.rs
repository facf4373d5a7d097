use crate::error::{Result, SmbUserError};
use crate::utils::password::{redact, Secret};
use crate::utils::tools::find_tool;
use log::debug;
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    Present,
    Absent,
}

impl Default for State {
    fn default() -> Self {
        State::Present
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::Present => write!(f, "present"),
            State::Absent => write!(f, "absent"),
        }
    }
}

impl std::str::FromStr for State {
    type Err = SmbUserError;

    fn from_str(s: &str) -> Result<State> {
        match s {
            "present" => Ok(State::Present),
            "absent" => Ok(State::Absent),
            other => Err(SmbUserError::config(format!(
                "state must be one of present, absent; got {}",
                other
            ))),
        }
    }
}

/// Desired state of one samba account.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Params {
    pub name: String,
    #[serde(default)]
    pub password: Option<Secret>,
    #[serde(default)]
    pub state: State,
}

impl Params {
    pub fn from_args_file<P: AsRef<Path>>(path: P) -> Result<Params> {
        let file = File::open(path)?;
        let params: Params = serde_json::from_reader(BufReader::new(file))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(SmbUserError::config("name must not be empty"));
        }
        if self.name.starts_with('-') {
            return Err(SmbUserError::config(format!(
                "name {} must not start with '-'",
                self.name
            )));
        }
        if self.name.contains(|c: char| c == ':' || c == '\n' || c == '\r') {
            return Err(SmbUserError::config(
                "name must not contain ':' or line breaks",
            ));
        }
        if let Some(password) = &self.password {
            if password.expose().contains(|c: char| c == '\n' || c == '\r') {
                return Err(SmbUserError::config("password must not contain line breaks"));
            }
        }
        Ok(())
    }
}

/// Everything a reconciliation needs besides the desired state.
#[derive(Debug, Clone)]
pub struct Context {
    pub pdbedit: String,
    pub smbpasswd: String,
    pub no_log: Vec<Secret>,
}

impl Context {
    /// Locate both tools. Fails before anything runs if either is missing.
    pub fn discover(
        pdbedit: Option<&str>,
        smbpasswd: Option<&str>,
        params: &Params,
    ) -> Result<Context> {
        let smbpasswd = find_tool("smbpasswd", smbpasswd)?;
        let pdbedit = find_tool("pdbedit", pdbedit)?;
        debug!(
            "Using pdbedit at {} and smbpasswd at {}",
            pdbedit.display(),
            smbpasswd.display()
        );
        Ok(Context {
            pdbedit: pdbedit.display().to_string(),
            smbpasswd: smbpasswd.display().to_string(),
            no_log: params.password.iter().cloned().collect(),
        })
    }

    pub fn redact(&self, text: &str) -> String {
        redact(text, &self.no_log)
    }
}
