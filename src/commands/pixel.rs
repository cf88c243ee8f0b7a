use crate::client::PixelaClient;
use crate::commands::non_empty;
use crate::config::ResolvedConfig;
use crate::error::Result;
use crate::request::{ApiRequest, NoBody};
use clap::{Args, Subcommand};
use reqwest::Method;
use serde::Serialize;

#[derive(Subcommand, Debug)]
pub enum PixelCommand {
    /// Record a quantity for a date
    #[command(long_about = "Post the quantity of a date to a graph.\n\n\
        Example:\n\
        pi pixel post --username c-know --graph-id test-graph --date 20190101 --quantity 5 \\\n\
          --optional-data '{\"key\":\"value\"}'")]
    Post(PostPixelArgs),
    /// Get the pixel of a date
    Get(PixelDateArgs),
    /// Update the pixel of a date
    Update(UpdatePixelArgs),
    /// Increment today's pixel
    Increment(PixelGraphArgs),
    /// Decrement today's pixel
    Decrement(PixelGraphArgs),
    /// Delete the pixel of a date
    Delete(PixelDateArgs),
}

#[derive(Args, Debug)]
pub struct PostPixelArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// The date on which the quantity is recorded (yyyyMMdd)
    #[arg(long)]
    pub date: String,
    /// The quantity to register on the date
    #[arg(long)]
    pub quantity: String,
    /// Additional information as a JSON string
    #[arg(long)]
    pub optional_data: Option<String>,
}

#[derive(Args, Debug)]
pub struct UpdatePixelArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// The date of the pixel to update (yyyyMMdd)
    #[arg(long)]
    pub date: String,
    /// The new quantity
    #[arg(long)]
    pub quantity: String,
    /// Additional information as a JSON string
    #[arg(long)]
    pub optional_data: Option<String>,
}

#[derive(Args, Debug)]
pub struct PixelDateArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// The date of the pixel (yyyyMMdd)
    #[arg(long)]
    pub date: String,
}

#[derive(Args, Debug)]
pub struct PixelGraphArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct PostPixelParams<'a> {
    date: &'a str,
    quantity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional_data: Option<&'a str>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdatePixelParams<'a> {
    quantity: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    optional_data: Option<&'a str>,
}

pub fn post_request(args: &PostPixelArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = PostPixelParams {
        date: &args.date,
        quantity: &args.quantity,
        optional_data: non_empty(&args.optional_data),
    };
    ApiRequest::authenticated(
        config,
        Method::POST,
        &format!("v1/users/{username}/graphs/{}", args.graph_id),
        Some(&params),
    )
}

pub fn get_request(args: &PixelDateArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::GET,
        &format!("v1/users/{username}/graphs/{}/{}", args.graph_id, args.date),
        None,
    )
}

pub fn update_request(args: &UpdatePixelArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let params = UpdatePixelParams {
        quantity: &args.quantity,
        optional_data: non_empty(&args.optional_data),
    };
    ApiRequest::authenticated(
        config,
        Method::PUT,
        &format!("v1/users/{username}/graphs/{}/{}", args.graph_id, args.date),
        Some(&params),
    )
}

pub fn increment_request(args: &PixelGraphArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    step_request(args, config, "increment")
}

pub fn decrement_request(args: &PixelGraphArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    step_request(args, config, "decrement")
}

fn step_request(args: &PixelGraphArgs, config: &ResolvedConfig, step: &str) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::PUT,
        &format!("v1/users/{username}/graphs/{}/{step}", args.graph_id),
        None,
    )
}

pub fn delete_request(args: &PixelDateArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::DELETE,
        &format!("v1/users/{username}/graphs/{}/{}", args.graph_id, args.date),
        None,
    )
}

pub async fn handle(cmd: PixelCommand, client: &PixelaClient) -> Result<()> {
    let config = client.config();
    let req = match cmd {
        PixelCommand::Post(args) => post_request(&args, config)?,
        PixelCommand::Get(args) => get_request(&args, config)?,
        PixelCommand::Update(args) => update_request(&args, config)?,
        PixelCommand::Increment(args) => increment_request(&args, config)?,
        PixelCommand::Decrement(args) => decrement_request(&args, config)?,
        PixelCommand::Delete(args) => delete_request(&args, config)?,
    };
    client.execute(&req).await
}
