use crate::client::PixelaClient;
use crate::commands::non_empty;
use crate::config::ResolvedConfig;
use crate::error::{CliError, Result};
use crate::output::print_url;
use crate::request::{push_query, ApiRequest, NoBody};
use clap::{Args, Subcommand, ValueEnum};
use reqwest::Method;
use serde::{Serialize, Serializer};

/// The service rejects graph updates carrying more purge targets than this.
pub const MAX_PURGE_CACHE_URLS: usize = 5;

#[derive(Subcommand, Debug)]
pub enum GraphCommand {
    /// Create a graph
    #[command(long_about = "Create a new pixelation graph definition.\n\n\
        Example:\n\
        pi graphs create --username c-know --graph-id test-graph --name \"Commits\" \\\n\
          --unit commit --type int --color shibafu --timezone Asia/Tokyo")]
    Create(CreateGraphArgs),
    /// Get graph definitions
    Get(GetGraphsArgs),
    /// Print the SVG graph URL
    #[command(long_about = "Print the URL of the SVG image of a graph. No request is sent.\n\n\
        Example:\n\
        pi graphs svg --username c-know --graph-id test-graph --date 20190101 --mode short")]
    Svg(GraphSvgArgs),
    /// Update a graph definition
    #[command(long_about = "Update a graph definition. Only the given fields are sent.\n\n\
        Up to five --purge-cache-urls may be given; each is sent a purge request\n\
        whenever the graph changes.\n\n\
        Example:\n\
        pi graphs update --username c-know --graph-id test-graph --name \"Commits\" \\\n\
          --purge-cache-urls https://example.com/a --purge-cache-urls https://example.com/b")]
    Update(UpdateGraphArgs),
    /// Print the graph detail page URL
    Detail(GraphDetailArgs),
    /// Print the graph list page URL
    List(GraphListArgs),
    /// Delete a graph
    Delete(GraphRefArgs),
    /// Get the dates of pixels registered in a graph
    #[command(long_about = "List the dates that have pixels in a graph.\n\n\
        Example:\n\
        pi graphs pixels --username c-know --graph-id test-graph --from 20180101 --to 20181231")]
    Pixels(GraphPixelsArgs),
    /// Get graph statistics
    Stats(GraphRefArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphType {
    Int,
    Float,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphColor {
    Shibafu,
    Momiji,
    Sora,
    Ichou,
    Ajisai,
    Kuro,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SelfSufficient {
    Increment,
    Decrement,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SvgMode {
    Short,
    Badge,
    Line,
}

impl SvgMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SvgMode::Short => "short",
            SvgMode::Badge => "badge",
            SvgMode::Line => "line",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DetailMode {
    Simple,
    SimpleShort,
}

impl DetailMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailMode::Simple => "simple",
            DetailMode::SimpleShort => "simple-short",
        }
    }
}

/// A boolean field that may also be left out of the request entirely.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TriState {
    #[default]
    Unset,
    False,
    True,
}

impl TriState {
    pub fn is_unset(&self) -> bool {
        *self == TriState::Unset
    }
}

impl Serialize for TriState {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            TriState::Unset => serializer.serialize_none(),
            TriState::False => serializer.serialize_bool(false),
            TriState::True => serializer.serialize_bool(true),
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct VisibilityArgs {
    /// Hide the graph from people without the token
    #[arg(long)]
    pub secret: bool,
    /// Make the graph public
    #[arg(long)]
    pub publish: bool,
    /// Hide the optional data of pixels
    #[arg(long)]
    pub hide_optional_data: bool,
    /// Show the optional data of pixels
    #[arg(long)]
    pub publish_optional_data: bool,
}

impl VisibilityArgs {
    /// Translate the four switches into `(isSecret, publishOptionalData)`.
    pub fn resolve(&self) -> Result<(TriState, TriState)> {
        if self.secret && self.publish {
            return Err(CliError::Validation(
                "--secret and --publish cannot be specified together".into(),
            ));
        }
        if self.publish_optional_data && self.hide_optional_data {
            return Err(CliError::Validation(
                "--publish-optional-data and --hide-optional-data cannot be specified together"
                    .into(),
            ));
        }

        let is_secret = if self.publish {
            TriState::False
        } else if self.secret {
            TriState::True
        } else {
            TriState::Unset
        };
        let publish_optional_data = if self.publish_optional_data {
            TriState::True
        } else if self.hide_optional_data {
            TriState::False
        } else {
            TriState::Unset
        };
        Ok((is_secret, publish_optional_data))
    }
}

#[derive(Args, Debug)]
pub struct CreateGraphArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// The name of the pixelation graph
    #[arg(long)]
    pub name: String,
    /// A unit of the quantity recorded in the graph, e.g. commit, kilogram, calory
    #[arg(long)]
    pub unit: String,
    /// The type of quantity handled in the graph
    #[arg(long = "type", value_enum)]
    pub graph_type: GraphType,
    /// The display color of the pixels
    #[arg(long, value_enum)]
    pub color: GraphColor,
    /// The timezone for handling this graph
    #[arg(long)]
    pub timezone: Option<String>,
    /// Increment or decrement the graph's own pixel whenever its SVG is displayed
    #[arg(long, value_enum, default_value_t = SelfSufficient::None)]
    pub self_sufficient: SelfSufficient,
    #[command(flatten)]
    pub visibility: VisibilityArgs,
}

#[derive(Args, Debug)]
pub struct GetGraphsArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
}

#[derive(Args, Debug)]
pub struct GraphSvgArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// Start the graph at this date instead of today (yyyyMMdd)
    #[arg(long)]
    pub date: Option<String>,
    /// Graph display mode
    #[arg(long, value_enum)]
    pub mode: Option<SvgMode>,
}

#[derive(Args, Debug)]
pub struct UpdateGraphArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// The name of the pixelation graph
    #[arg(long)]
    pub name: Option<String>,
    /// A unit of the quantity recorded in the graph
    #[arg(long)]
    pub unit: Option<String>,
    /// The display color of the pixels
    #[arg(long, value_enum)]
    pub color: Option<GraphColor>,
    /// The timezone for handling this graph
    #[arg(long)]
    pub timezone: Option<String>,
    /// URL to send a purge request to when the graph is updated (repeatable)
    #[arg(long = "purge-cache-urls")]
    pub purge_cache_urls: Vec<String>,
    /// Increment or decrement the graph's own pixel whenever its SVG is displayed
    #[arg(long, value_enum)]
    pub self_sufficient: Option<SelfSufficient>,
    #[command(flatten)]
    pub visibility: VisibilityArgs,
}

#[derive(Args, Debug)]
pub struct GraphDetailArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// Detail page display mode
    #[arg(long, value_enum)]
    pub mode: Option<DetailMode>,
}

#[derive(Args, Debug)]
pub struct GraphListArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
}

/// Arguments for commands that only need to name a graph.
#[derive(Args, Debug)]
pub struct GraphRefArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
}

#[derive(Args, Debug)]
pub struct GraphPixelsArgs {
    /// User name of graph owner
    #[arg(long)]
    pub username: Option<String>,
    /// ID for identifying the pixelation graph
    #[arg(long)]
    pub graph_id: String,
    /// Start of the period (yyyyMMdd)
    #[arg(long)]
    pub from: Option<String>,
    /// End of the period (yyyyMMdd)
    #[arg(long)]
    pub to: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CreateGraphParams<'a> {
    id: &'a str,
    name: &'a str,
    unit: &'a str,
    #[serde(rename = "type")]
    graph_type: GraphType,
    color: GraphColor,
    timezone: &'a str,
    self_sufficient: SelfSufficient,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    is_secret: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    publish_optional_data: TriState,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UpdateGraphParams<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unit: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<GraphColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    timezone: Option<&'a str>,
    #[serde(rename = "purgeCacheURLs", skip_serializing_if = "Option::is_none")]
    purge_cache_urls: Option<&'a [String]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    self_sufficient: Option<SelfSufficient>,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    is_secret: TriState,
    #[serde(skip_serializing_if = "TriState::is_unset")]
    publish_optional_data: TriState,
}

pub fn create_request(args: &CreateGraphArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let (is_secret, publish_optional_data) = args.visibility.resolve()?;

    let params = CreateGraphParams {
        id: &args.graph_id,
        name: &args.name,
        unit: &args.unit,
        graph_type: args.graph_type,
        color: args.color,
        timezone: args.timezone.as_deref().unwrap_or_default(),
        self_sufficient: args.self_sufficient,
        is_secret,
        publish_optional_data,
    };
    ApiRequest::authenticated(
        config,
        Method::POST,
        &format!("v1/users/{username}/graphs"),
        Some(&params),
    )
}

pub fn get_request(args: &GetGraphsArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::GET,
        &format!("v1/users/{username}/graphs"),
        None,
    )
}

pub fn svg_url(args: &GraphSvgArgs, config: &ResolvedConfig) -> Result<String> {
    let username = config.resolve_username(args.username.as_deref())?;
    let mut url = config.url(&format!("v1/users/{username}/graphs/{}", args.graph_id));
    push_query(&mut url, "date", args.date.as_deref());
    push_query(&mut url, "mode", args.mode.map(SvgMode::as_str));
    Ok(url)
}

pub fn update_request(args: &UpdateGraphArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;

    if args.purge_cache_urls.len() > MAX_PURGE_CACHE_URLS {
        return Err(CliError::Validation(format!(
            "too many purge-cache URLs: you can only specify up to {MAX_PURGE_CACHE_URLS} URLs, got {}",
            args.purge_cache_urls.len()
        )));
    }
    let (is_secret, publish_optional_data) = args.visibility.resolve()?;

    let params = UpdateGraphParams {
        name: non_empty(&args.name),
        unit: non_empty(&args.unit),
        color: args.color,
        timezone: non_empty(&args.timezone),
        purge_cache_urls: Some(args.purge_cache_urls.as_slice()).filter(|urls| !urls.is_empty()),
        self_sufficient: args.self_sufficient,
        is_secret,
        publish_optional_data,
    };
    ApiRequest::authenticated(
        config,
        Method::PUT,
        &format!("v1/users/{username}/graphs/{}", args.graph_id),
        Some(&params),
    )
}

pub fn detail_url(args: &GraphDetailArgs, config: &ResolvedConfig) -> Result<String> {
    let username = config.resolve_username(args.username.as_deref())?;
    let mut url = config.url(&format!(
        "v1/users/{username}/graphs/{}.html",
        args.graph_id
    ));
    push_query(&mut url, "mode", args.mode.map(DetailMode::as_str));
    Ok(url)
}

pub fn list_url(args: &GraphListArgs, config: &ResolvedConfig) -> Result<String> {
    let username = config.resolve_username(args.username.as_deref())?;
    Ok(config.url(&format!("v1/users/{username}/graphs.html")))
}

pub fn delete_request(args: &GraphRefArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::authenticated::<NoBody>(
        config,
        Method::DELETE,
        &format!("v1/users/{username}/graphs/{}", args.graph_id),
        None,
    )
}

pub fn pixels_request(args: &GraphPixelsArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    let mut path = format!("v1/users/{username}/graphs/{}/pixels", args.graph_id);
    push_query(&mut path, "from", args.from.as_deref());
    push_query(&mut path, "to", args.to.as_deref());
    ApiRequest::authenticated::<NoBody>(config, Method::GET, &path, None)
}

/// Graph statistics are public, so no token is attached.
pub fn stats_request(args: &GraphRefArgs, config: &ResolvedConfig) -> Result<ApiRequest> {
    let username = config.resolve_username(args.username.as_deref())?;
    ApiRequest::unauthenticated::<NoBody>(
        config,
        Method::GET,
        &format!("v1/users/{username}/graphs/{}/stats", args.graph_id),
        None,
    )
}

pub async fn handle(cmd: GraphCommand, client: &PixelaClient) -> Result<()> {
    let config = client.config();
    let req = match cmd {
        GraphCommand::Svg(args) => {
            print_url(&svg_url(&args, config)?);
            return Ok(());
        }
        GraphCommand::Detail(args) => {
            print_url(&detail_url(&args, config)?);
            return Ok(());
        }
        GraphCommand::List(args) => {
            print_url(&list_url(&args, config)?);
            return Ok(());
        }
        GraphCommand::Create(args) => create_request(&args, config)?,
        GraphCommand::Get(args) => get_request(&args, config)?,
        GraphCommand::Update(args) => update_request(&args, config)?,
        GraphCommand::Delete(args) => delete_request(&args, config)?,
        GraphCommand::Pixels(args) => pixels_request(&args, config)?,
        GraphCommand::Stats(args) => stats_request(&args, config)?,
    };
    client.execute(&req).await
}
