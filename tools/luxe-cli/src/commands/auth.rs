//! Login, signup and logout.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context as _, Result};
use dialoguer::{Confirm, Password};
use luxe_auth::{AccessToken, AuthError, AuthResponse, FormErrors, LoginForm, SignupForm};

use super::{LoginArgs, LogoutArgs, SignupArgs};
use crate::context::Context;

/// Store an access token.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    if let Some(email) = args.email {
        let password = match args.password {
            Some(password) => password,
            None => Password::new().with_prompt("Password").interact()?,
        };
        check_form(ctx, LoginForm::new(email, password).validate())?;
    }

    if let Some(path) = args.response {
        return apply_response_file(ctx, &path, "Logged in successfully!");
    }

    let token = match args.token {
        Some(token) => token,
        None => Password::new().with_prompt("Access token").interact()?,
    };
    if token.trim().is_empty() {
        bail!("Access token must not be empty");
    }

    let mut storefront = ctx.storefront()?;
    storefront.login(AccessToken::new(token.trim())?)?;
    ctx.output.success("Logged in successfully!");
    Ok(())
}

/// Check the signup form, then apply the endpoint's reply.
pub async fn signup(args: SignupArgs, ctx: &Context) -> Result<()> {
    let password = Password::new().with_prompt("Password").interact()?;
    let confirm_password = Password::new().with_prompt("Confirm password").interact()?;

    let form = SignupForm {
        first_name: args.first_name,
        last_name: args.last_name,
        email: args.email,
        password,
        confirm_password,
    };
    check_form(ctx, form.validate())?;

    apply_response_file(ctx, &args.response, "Account created successfully!")
}

/// Clear the token, cart and wishlist.
pub async fn logout(args: LogoutArgs, ctx: &Context) -> Result<()> {
    let mut storefront = ctx.storefront()?;

    if !storefront.is_authenticated() {
        ctx.output.info("Not logged in");
    }

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt("Log out? This also empties your cart and wishlist")
            .default(true)
            .interact()?;
        if !confirmed {
            return Ok(());
        }
    }

    storefront.logout()?;
    ctx.output.success("Logged out successfully!");
    Ok(())
}

fn check_form(ctx: &Context, result: Result<(), FormErrors>) -> Result<()> {
    let Err(errors) = result else {
        return Ok(());
    };

    if ctx.output.is_json() {
        ctx.output.json(&errors);
    } else {
        for (field, message) in errors.iter() {
            ctx.output.kv(field, message);
        }
    }
    Err(AuthError::InvalidForm(errors).into())
}

fn apply_response_file(ctx: &Context, path: &Path, fallback: &str) -> Result<()> {
    let path = ctx.resolve_path(path);
    let body = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let response = AuthResponse::from_json(&body)
        .with_context(|| format!("Failed to parse auth response in {}", path.display()))?;

    let mut storefront = ctx.storefront()?;
    storefront.apply_auth_response(true, &response)?;
    ctx.output
        .success(response.message.as_deref().unwrap_or(fallback));
    Ok(())
}
