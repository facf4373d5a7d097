use crate::error::{Result, SmbUserError};
use crate::utils::config::{Context, Params, State};
use crate::utils::tools::Runner;
use crate::utils::user::{add_user, change_password, delete_user, get_user};
pub use crate::utils::user::Outcome;
use log::{error, info, warn};
use serde::Serialize;

/// What gets printed on stdout for the caller.
#[derive(Debug, Serialize, PartialEq)]
pub struct ModuleResult {
    pub changed: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub failed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
}

impl ModuleResult {
    pub fn from_outcome(outcome: Outcome) -> ModuleResult {
        ModuleResult {
            changed: outcome.changed(),
            failed: false,
            msg: None,
        }
    }

    pub fn failure(msg: String) -> ModuleResult {
        ModuleResult {
            changed: false,
            failed: true,
            msg: Some(msg),
        }
    }
}

/// Look the account up once, then create, update, delete or leave it.
pub fn run<R: Runner>(ctx: &Context, params: &Params, runner: &R) -> Result<Outcome> {
    let user = get_user(ctx, runner, &params.name)?;

    match (params.state, user) {
        (State::Absent, None) => {
            info!("Samba user {} is already absent", params.name);
            Ok(Outcome::Unchanged)
        }
        (State::Absent, Some(_)) => delete_user(ctx, runner, &params.name),
        (State::Present, None) => match &params.password {
            Some(password) => add_user(ctx, runner, &params.name, password),
            None => Err(SmbUserError::MissingPassword(params.name.clone())),
        },
        (State::Present, Some(user)) => match &params.password {
            Some(password) => change_password(ctx, runner, &user, password),
            None => {
                warn!(
                    "Samba user {} exists and no password was given, leaving it alone",
                    params.name
                );
                Ok(Outcome::Unchanged)
            }
        },
    }
}

/// Locate the tools, reconcile, and turn any failure into a redacted message.
pub fn execute<R: Runner>(
    pdbedit: Option<&str>,
    smbpasswd: Option<&str>,
    params: &Params,
    runner: &R,
) -> ModuleResult {
    let ctx = match Context::discover(pdbedit, smbpasswd, params) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("{}", e);
            return ModuleResult::failure(e.to_string());
        }
    };

    info!("Ensuring samba user {} is {}", params.name, params.state);
    match run(&ctx, params, runner) {
        Ok(outcome) => ModuleResult::from_outcome(outcome),
        Err(e) => {
            let msg = ctx.redact(&e.to_string());
            if let SmbUserError::CommandFailed { command, .. } = &e {
                error!("{} failed: {}", ctx.redact(command), msg.trim_end());
            } else {
                error!("{}", msg);
            }
            ModuleResult::failure(msg)
        }
    }
}
