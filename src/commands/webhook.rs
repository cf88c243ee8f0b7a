use crate::client::PixelaClient;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::request::{ApiRequest, NoBody};
use clap::{Args, Subcommand, ValueEnum};
use reqwest::Method;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum WebhookCommand {
    /// Create a webhook
    #[command(long_about = "Register a webhook that increments or decrements a graph's pixel.\n\n\
        The response carries the webhookHash used by `invoke` and `delete`.\n\n\
        Example:\n\
        pi webhooks create --username c-know --graph-id test-graph --type increment")]
    Create(CreateWebhookArgs),
    /// Get registered webhooks
    Get(GetWebhooksArgs),
    /// Invoke a webhook
    Invoke(WebhookRefArgs),
    /// Delete a webhook
    Delete(WebhookRefArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WebhookType {
    Increment,
    Decrement,
}

#[derive(Args, Debug)]
pub struct CreateWebhookArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID of the graph the webhook operates on
    #[arg(long, alias = "id")]
    pub graph_id: String,
    /// What the webhook does when invoked
    #[arg(long = "type", value_enum)]
    pub webhook_type: WebhookType,
}

#[derive(Args, Debug)]
pub struct GetWebhooksArgs {
    /// User name of webhook owner
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Args, Debug)]
pub struct WebhookRefArgs {
    /// User name of webhook owner
    #[arg(long)]
    pub username: Option<String>,
    /// webhookHash of a registered webhook
    #[arg(long, alias = "webhookHash")]
    pub webhook_hash: String,
}

#[derive(Serialize, Debug)]
struct CreateWebhookParams<'a> {
    #[serde(rename = "graphID")]
    graph_id: &'a str,
    #[serde(rename = "type")]
    webhook_type: WebhookType,
}

pub fn create_request(args: &CreateWebhookArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = CreateWebhookParams {
        graph_id: &args.graph_id,
        webhook_type: args.webhook_type,
    };
    ApiRequest::authenticated(
        config,
        Method::POST,
        &format!("v1/users/{username}/webhooks"),
        Some(&params),
    )
}

pub fn get_request(args: &GetWebhooksArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::GET,
        &format!("v1/users/{username}/webhooks"),
        None,
    )
}

pub fn invoke_request(args: &WebhookRefArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    hash_request(args, config, Method::POST)
}

pub fn delete_request(args: &WebhookRefArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    hash_request(args, config, Method::DELETE)
}

fn hash_request(args: &WebhookRefArgs, config: &ResolvedConfig, method: Method) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        method,
        &format!("v1/users/{username}/webhooks/{}", args.webhook_hash),
        None,
    )
}

pub async fn handle(cmd: WebhookCommand, client: &PixelaClient) -> Result<()> {
    let config = client.config();
    let req = match cmd {
        WebhookCommand::Create(args) => create_request(&args, config)?,
        WebhookCommand::Get(args) => get_request(&args, config)?,
        WebhookCommand::Invoke(args) => invoke_request(&args, config)?,
        WebhookCommand::Delete(args) => delete_request(&args, config)?,
    };
    client.execute(&req).await
}
