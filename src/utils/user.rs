use crate::error::{Result, SmbUserError};
use crate::utils::config::Context;
use crate::utils::password::Secret;
use crate::utils::tools::{check, Runner};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl Outcome {
    pub fn changed(self) -> bool {
        self == Outcome::Changed
    }
}

/// One line of `pdbedit -L -w` output, reduced to what we compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SambaUser {
    pub name: String,
    /// Opaque hash or marker, only ever compared for equality
    pub password: String,
}

impl SambaUser {
    pub fn parse(line: &str) -> Option<SambaUser> {
        let comps: Vec<&str> = line.split(':').collect();
        if comps.len() < 4 {
            return None;
        }
        Some(SambaUser {
            name: comps[0].to_owned(),
            password: comps[3].to_owned(),
        })
    }
}

/// First record in `listing` whose name field equals `name`.
pub fn find_user(listing: &str, name: &str) -> Option<SambaUser> {
    listing
        .lines()
        .filter_map(SambaUser::parse)
        .find(|user| user.name == name)
}

pub fn get_user<R: Runner>(ctx: &Context, runner: &R, name: &str) -> Result<Option<SambaUser>> {
    let argv = [ctx.pdbedit.as_str(), "-L", "-w"];
    let listing = check(&argv, runner.run(&argv, None)?)?;
    let user = find_user(&listing.out, name);
    debug!(
        "User {} is {}",
        name,
        if user.is_some() { "present" } else { "absent" }
    );
    Ok(user)
}

/// smbpasswd -a both creates accounts and resets passwords of existing ones.
fn set_password<R: Runner>(ctx: &Context, runner: &R, name: &str, password: &Secret) -> Result<()> {
    let argv = [ctx.smbpasswd.as_str(), "-a", "-s", name];
    check(&argv, runner.run(&argv, Some(&password.confirmation_input()))?)?;
    Ok(())
}

pub fn add_user<R: Runner>(
    ctx: &Context,
    runner: &R,
    name: &str,
    password: &Secret,
) -> Result<Outcome> {
    set_password(ctx, runner, name, password)?;
    info!("Added samba user {}", name);
    Ok(Outcome::Changed)
}

/// Sets the password unconditionally and reports a change only if the
/// stored hash moved. A tool that re-salts on every call reports changed
/// on every run.
pub fn change_password<R: Runner>(
    ctx: &Context,
    runner: &R,
    user: &SambaUser,
    password: &Secret,
) -> Result<Outcome> {
    set_password(ctx, runner, &user.name, password)?;

    let updated = get_user(ctx, runner, &user.name)?
        .ok_or_else(|| SmbUserError::UserVanished(user.name.clone()))?;

    if updated.password == user.password {
        debug!("Password of samba user {} is unchanged", user.name);
        Ok(Outcome::Unchanged)
    } else {
        info!("Changed password of samba user {}", user.name);
        Ok(Outcome::Changed)
    }
}

pub fn delete_user<R: Runner>(ctx: &Context, runner: &R, name: &str) -> Result<Outcome> {
    let argv = [ctx.pdbedit.as_str(), "-x", name];
    check(&argv, runner.run(&argv, None)?)?;
    info!("Deleted samba user {}", name);
    Ok(Outcome::Changed)
}
