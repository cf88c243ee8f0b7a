use crate::client::PixelaClient;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::commands::non_empty;
use crate::request::ApiRequest;
use clap::{Args, Subcommand, ValueEnum};
use reqwest::Method;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a new user
    #[command(long_about = "Register a new Pixela user.\n\n\
        No token header is sent; the token given here becomes the user's token.\n\n\
        Example:\n\
        pi users create --username c-know --token thisissecret \\\n\
          --agree-terms-of-service yes --not-minor yes")]
    Create(CreateUserArgs),
    /// Update a user's token
    #[command(long_about = "Replace the authentication token of a user.\n\n\
        Example:\n\
        pi users update --username c-know --new-token newsecret")]
    Update(UpdateUserArgs),
    /// Delete a user
    Delete(DeleteUserArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    /// A token string used to authenticate as the user to be created
    #[arg(short, long)]
    pub token: String,
    /// User name to be created
    #[arg(short, long)]
    pub username: String,
    /// Whether you agree to the terms of service
    #[arg(short, long, value_enum)]
    pub agree_terms_of_service: YesNo,
    /// Whether you are not a minor, or are a minor with parental consent
    #[arg(short = 'm', long, value_enum)]
    pub not_minor: YesNo,
    /// Pixela supporter thanks code
    #[arg(long)]
    pub thanks_code: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateUserArgs {
    /// User name to be updated
    #[arg(short, long)]
    pub username: Option<String>,
    /// A new authentication token
    #[arg(short = 't', long)]
    pub new_token: String,
    /// Pixela supporter thanks code
    #[arg(long)]
    pub thanks_code: Option<String>,
}

#[derive(Args, Debug)]
pub struct DeleteUserArgs {
    /// User name to be deleted
    #[arg(short, long)]
    pub username: Option<String>,
    /// Pixela supporter thanks code
    #[arg(long)]
    pub thanks_code: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateUserParams<'a> {
    token: &'a str,
    username: &'a str,
    agree_terms_of_service: YesNo,
    not_minor: YesNo,
    #[serde(skip_serializing_if = "Option::is_none")]
    thanks_code: Option<&'a str>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdateUserParams<'a> {
    new_token: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thanks_code: Option<&'a str>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct DeleteUserParams<'a> {
    thanks_code: &'a str,
}

pub fn create_request(args: &CreateUserArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let params = CreateUserParams {
        token: &args.token,
        username: &args.username,
        agree_terms_of_service: args.agree_terms_of_service,
        not_minor: args.not_minor,
        thanks_code: non_empty(&args.thanks_code),
    };
    ApiRequest::unauthenticated(config, Method::POST, "v1/users", Some(&params))
}

pub fn update_request(args: &UpdateUserArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = UpdateUserParams {
        new_token: &args.new_token,
        thanks_code: non_empty(&args.thanks_code),
    };
    ApiRequest::authenticated(
        config,
        Method::PUT,
        &format!("v1/users/{username}"),
        Some(&params),
    )
}

pub fn delete_request(args: &DeleteUserArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params =
        non_empty(&args.thanks_code).map(|thanks_code| DeleteUserParams { thanks_code });
    ApiRequest::authenticated(
        config,
        Method::DELETE,
        &format!("v1/users/{username}"),
        params.as_ref(),
    )
}

pub async fn handle(cmd: UserCommand, client: &PixelaClient) -> Result<()> {
    let config = client.config();
    let req = match cmd {
        UserCommand::Create(args) => create_request(&args, config)?,
        UserCommand::Update(args) => update_request(&args, config)?,
        UserCommand::Delete(args) => delete_request(&args, config)?,
    };
    client.execute(&req).await
}
