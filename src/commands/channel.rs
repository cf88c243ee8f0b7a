use crate::client::PixelaClient;
use crate::commands::non_empty;
use crate::config::ResolvedConfig;
use crate::error::{CliError, Result};
use crate::request::{ApiRequest, NoBody};
use clap::{Args, Subcommand};
use reqwest::Method;
use serde::Serialize;
use serde_json::value::RawValue;

#[derive(Subcommand, Debug)]
pub enum ChannelCommand {
    /// Create a notification channel
    #[command(long_about = "Create a channel that notifications are delivered to.\n\n\
        --detail is a JSON object describing the destination; it is sent as-is.\n\n\
        Example:\n\
        pi channels create --username c-know --channel-id my-channel --name \"My channel\" \\\n\
          --type slack --detail '{\"url\":\"https://hooks.slack.com/services/xxxx\",\n\
          \"userName\":\"Pixela Notification\",\"channelName\":\"pixela-notify\"}'")]
    Create(CreateChannelArgs),
    /// Get channel definitions
    Get(GetChannelsArgs),
    /// Update a channel definition
    Update(UpdateChannelArgs),
    /// Delete a channel
    Delete(ChannelRefArgs),
}

#[derive(Args, Debug)]
pub struct CreateChannelArgs {
    /// User name of channel owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the channel
    #[arg(long)]
    pub channel_id: String,
    /// The name of the channel
    #[arg(long)]
    pub name: String,
    /// The notification type, e.g. slack
    #[arg(long = "type")]
    pub channel_type: String,
    /// Details of the type as a JSON object
    #[arg(long)]
    pub detail: String,
}

#[derive(Args, Debug)]
pub struct GetChannelsArgs {
    /// User name of channel owner
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdateChannelArgs {
    /// User name of channel owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the channel
    #[arg(long)]
    pub channel_id: String,
    /// The name of the channel
    #[arg(long)]
    pub name: Option<String>,
    /// The notification type, e.g. slack
    #[arg(long = "type")]
    pub channel_type: Option<String>,
    /// Details of the type as a JSON object
    #[arg(long)]
    pub detail: Option<String>,
}

#[derive(Args, Debug)]
pub struct ChannelRefArgs {
    /// User name of channel owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the channel
    #[arg(long)]
    pub channel_id: String,
}

#[derive(Serialize, Debug)]
struct CreateChannelParams<'a> {
    id: &'a str,
    name: &'a str,
    #[serde(rename = "type")]
    channel_type: &'a str,
    detail: Box<RawValue>,
}

#[derive(Serialize, Debug)]
struct UpdateChannelParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    channel_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<Box<RawValue>>,
}

/// The detail object is embedded in the body verbatim, so it must already be JSON.
fn raw_detail(detail: &str) -> Result<Box<RawValue>> {
    RawValue::from_string(detail.to_string())
        .map_err(|e| CliError::Validation(format!("--detail is not valid JSON: {e}")))
}

pub fn create_request(args: &CreateChannelArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = CreateChannelParams {
        id: &args.channel_id,
        name: &args.name,
        channel_type: &args.channel_type,
        detail: raw_detail(&args.detail)?,
    };
    ApiRequest::authenticated(
        config,
        Method::POST,
        &format!("v1/users/{username}/channels"),
        Some(&params),
    )
}

pub fn get_request(args: &GetChannelsArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::GET,
        &format!("v1/users/{username}/channels"),
        None,
    )
}

pub fn update_request(args: &UpdateChannelArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = UpdateChannelParams {
        id: Some(args.channel_id.as_str()).filter(|id| !id.is_empty()),
        name: non_empty(&args.name),
        channel_type: non_empty(&args.channel_type),
        detail: non_empty(&args.detail).map(raw_detail).transpose()?,
    };
    ApiRequest::authenticated(
        config,
        Method::PUT,
        &format!("v1/users/{username}/channels/{}", args.channel_id),
        Some(&params),
    )
}

pub fn delete_request(args: &ChannelRefArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::DELETE,
        &format!("v1/users/{username}/channels/{}", args.channel_id),
        None,
    )
}

pub async fn handle(cmd: ChannelCommand, client: &PixelaClient) -> Result<()> {
    let config = client.config();
    let req = match cmd {
        ChannelCommand::Create(args) => create_request(&args, config)?,
        ChannelCommand::Get(args) => get_request(&args, config)?,
        ChannelCommand::Update(args) => update_request(&args, config)?,
        ChannelCommand::Delete(args) => delete_request(&args, config)?,
    };
    client.execute(&req).await
}
