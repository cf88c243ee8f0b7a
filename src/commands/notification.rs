use crate::client::PixelaClient;
use crate::commands::non_empty;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::request::{ApiRequest, NoBody};
use clap::{Args, Subcommand, ValueEnum};
use reqwest::Method;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum NotificationCommand {
    /// Get the notification rules of a graph
    Get(GetNotificationsArgs),
    /// Create a notification rule
    #[command(long_about = "Create a rule that notifies a channel when a graph's quantity\n\
        meets a condition.\n\n\
        Example:\n\
        pi notifications create --username c-know --graph-id test-graph \\\n\
          --notification-id my-rule --name \"Over five\" --target quantity \\\n\
          --condition '>' --threshold 5 --channel-id my-channel")]
    Create(CreateNotificationArgs),
    /// Update a notification rule
    Update(UpdateNotificationArgs),
    /// Delete a notification rule
    Delete(NotificationRefArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Quantity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
pub enum Condition {
    #[value(name = ">")]
    #[serde(rename = ">")]
    GreaterThan,
    #[value(name = "=")]
    #[serde(rename = "=")]
    Equal,
    #[value(name = "<")]
    #[serde(rename = "<")]
    LessThan,
    #[value(name = "multipleOf")]
    #[serde(rename = "multipleOf")]
    MultipleOf,
}

#[derive(Args, Debug)]
pub struct GetNotificationsArgs {
    /// User name of owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the graph
    #[arg(long)]
    pub graph_id: String,
}

#[derive(Args, Debug)]
pub struct CreateNotificationArgs {
    /// User name of owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the graph
    #[arg(long)]
    pub graph_id: String,
    /// ID for identifying the notification rule
    #[arg(long)]
    pub notification_id: String,
    /// The name of the notification rule
    #[arg(long)]
    pub name: String,
    /// What the condition is evaluated against
    #[arg(long, value_enum)]
    pub target: Target,
    /// Comparison applied to the target and threshold
    #[arg(long, value_enum)]
    pub condition: Condition,
    /// The threshold compared with the target
    #[arg(long)]
    pub threshold: String,
    /// ID of the channel to notify
    #[arg(long)]
    pub channel_id: String,
}

#[derive(Args, Debug)]
pub struct UpdateNotificationArgs {
    /// User name of owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the graph
    #[arg(long)]
    pub graph_id: String,
    /// ID for identifying the notification rule
    #[arg(long)]
    pub notification_id: String,
    /// The name of the notification rule
    #[arg(long)]
    pub name: Option<String>,
    /// What the condition is evaluated against
    #[arg(long, value_enum)]
    pub target: Option<Target>,
    /// Comparison applied to the target and threshold
    #[arg(long, value_enum)]
    pub condition: Option<Condition>,
    /// The threshold compared with the target
    #[arg(long)]
    pub threshold: Option<String>,
    /// ID of the channel to notify
    #[arg(long)]
    pub channel_id: Option<String>,
}

#[derive(Args, Debug)]
pub struct NotificationRefArgs {
    /// User name of owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the graph
    #[arg(long)]
    pub graph_id: String,
    /// ID for identifying the notification rule
    #[arg(long)]
    pub notification_id: String,
}

#[derive(Serialize, Debug)]
struct CreateNotificationParams<'a> {
    id: &'a str,
    name: &'a str,
    target: Target,
    condition: Condition,
    threshold: &'a str,
    #[serde(rename = "channelID")]
    channel_id: &'a str,
}

#[derive(Serialize, Debug)]
struct UpdateNotificationParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<Target>,
    #[serde(skip_serializing_if = "Option::is_none")]
    condition: Option<Condition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold: Option<&'a str>,
    #[serde(rename = "channelID", skip_serializing_if = "Option::is_none")]
    channel_id: Option<&'a str>,
}

fn notifications_path(username: &str, graph_id: &str) -> String {
    format!("v1/users/{username}/graphs/{graph_id}/notifications")
}

pub fn get_request(args: &GetNotificationsArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::GET,
        &notifications_path(&username, &args.graph_id),
        None,
    )
}

pub fn create_request(args: &CreateNotificationArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = CreateNotificationParams {
        id: &args.notification_id,
        name: &args.name,
        target: args.target,
        condition: args.condition,
        threshold: &args.threshold,
        channel_id: &args.channel_id,
    };
    ApiRequest::authenticated(
        config,
        Method::POST,
        &notifications_path(&username, &args.graph_id),
        Some(&params),
    )
}

pub fn update_request(args: &UpdateNotificationArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = UpdateNotificationParams {
        name: non_empty(&args.name),
        target: args.target,
        condition: args.condition,
        threshold: non_empty(&args.threshold),
        channel_id: non_empty(&args.channel_id),
    };
    ApiRequest::authenticated(
        config,
        Method::PUT,
        &format!(
            "{}/{}",
            notifications_path(&username, &args.graph_id),
            args.notification_id
        ),
        Some(&params),
    )
}

pub fn delete_request(args: &NotificationRefArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::DELETE,
        &format!(
            "{}/{}",
            notifications_path(&username, &args.graph_id),
            args.notification_id
        ),
        None,
    )
}

pub async fn handle(cmd: NotificationCommand, client: &PixelaClient) -> Result<()> {
    let config = client.config();
    let req = match cmd {
        NotificationCommand::Get(args) => get_request(&args, config)?,
        NotificationCommand::Create(args) => create_request(&args, config)?,
        NotificationCommand::Update(args) => update_request(&args, config)?,
        NotificationCommand::Delete(args) => delete_request(&args, config)?,
    };
    client.execute(&req).await
}
