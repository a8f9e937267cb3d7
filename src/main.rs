//! rmcp-sensors: MCP server for device motion-sensor capability queries
//!
//! One method, `isSensorAvailable`, answers whether the device has a default
//! accelerometer or gyroscope. Any other method is rejected as not implemented.
//!
//! Providers:
//! - iio: Linux Industrial I/O sysfs (feature `linux`)
//! - fixed: static table from the config file

use clap::{Parser, Subcommand};
use rmcp::{
    handler::server::ServerHandler,
    model::*,
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServiceExt,
};
use serde_json::Value;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// === Modules ===

mod channel;
mod config;
mod sensors;
mod service;
mod shared;

use channel::{MethodCall, MethodChannel, MethodResult};
use sensors::SensorCategory;
use service::CapabilityService;
use shared::{internal_error, not_implemented};

// === CLI ===

#[derive(Parser)]
#[command(name = "rmcp-sensors")]
#[command(about = "MCP server answering whether motion sensors are present on this device")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the config file in your editor to choose the provider or disable methods
    Config,
    /// Dispatch one method call locally and print the result
    Call {
        /// Method name, e.g. isSensorAvailable
        method: String,
        /// Sensor label argument, e.g. Accelerometer
        #[arg(long)]
        sensor: Option<String>,
    },
    /// Report availability of every known sensor category
    Probe,
}

// === Server ===

#[derive(Debug, Clone)]
pub struct SensorServer {
    channel: MethodChannel,
}

impl Default for SensorServer {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorServer {
    pub fn new() -> Self {
        Self::from_config(&config::Config::load())
    }

    pub fn from_config(config: &config::Config) -> Self {
        let service = CapabilityService::new(config.build_provider());
        let channel = MethodChannel::new(service).with_disabled(&config.disabled);

        tracing::info!(
            "Serving {} method(s) on {}",
            channel.methods().count(),
            channel::CHANNEL_NAME
        );

        Self { channel }
    }

    fn tools(&self) -> Result<Vec<Tool>, McpError> {
        let schema = serde_json::to_value(schemars::schema_for!(channel::SensorParams))
            .map_err(|e| internal_error(format!("Failed to build tool schema: {}", e)))?;
        let Value::Object(schema) = schema else {
            return Err(internal_error("Tool schema is not a JSON object"));
        };
        let schema = Arc::new(schema);

        Ok(self
            .channel
            .methods()
            .map(|m| Tool::new(m.name, m.description, schema.clone()))
            .collect())
    }

    fn handle_call(&self, name: String, arguments: Option<JsonObject>) -> Result<CallToolResult, McpError> {
        let call = MethodCall::new(name, arguments.map(Value::Object));

        match self.channel.dispatch(&call) {
            MethodResult::Success(value) => {
                Ok(CallToolResult::success(vec![Content::text(value.to_string())]))
            }
            MethodResult::NotImplemented => Err(not_implemented(&call.method)),
        }
    }
}

impl ServerHandler for SensorServer {
    fn get_info(&self) -> ServerInfo {
        let mut description = String::from("rmcp-sensors: device motion-sensor capability queries.\n");
        description.push_str(&format!("- channel: {}\n", channel::CHANNEL_NAME));
        description.push_str(&format!("- provider: {}\n", self.channel.service().provider_name()));
        description.push_str(&format!(
            "- methods: {}\n",
            channel::all_method_names().join(", ")
        ));
        description.push_str("- sensors: Accelerometer, Gyroscope (case-sensitive; other labels answer false)\n");

        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(description),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        tracing::debug!("MCP: list_tools called");
        Ok(ListToolsResult::with_all_items(self.tools()?))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("MCP: call_tool called: {}", request.name);
        self.handle_call(request.name.into_owned(), request.arguments)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Some(Commands::Config) => {
            run_config_command()?;
        }
        Some(Commands::Call { method, sensor }) => {
            run_call_command(method, sensor)?;
        }
        Some(Commands::Probe) => {
            run_probe_command();
        }
        None => {
            run_server().await?;
        }
    }

    Ok(())
}

/// Open config file in user's editor
fn run_config_command() -> anyhow::Result<()> {
    let config_path = config::Config::path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !config_path.exists() {
        let template = include_str!("../config.toml.example");
        std::fs::write(&config_path, template)?;
        println!("Created config file: {}", config_path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            #[cfg(target_os = "windows")]
            { "notepad".to_string() }
            #[cfg(not(target_os = "windows"))]
            { "nano".to_string() }
        });

    println!("Opening {} with {}", config_path.display(), editor);

    std::process::Command::new(&editor)
        .arg(&config_path)
        .status()?;

    Ok(())
}

/// Dispatch a single call through the method channel
fn run_call_command(method: String, sensor: Option<String>) -> anyhow::Result<()> {
    let server = SensorServer::new();
    let arguments = sensor.map(|s| {
        let mut map = serde_json::Map::new();
        map.insert(channel::SENSOR_ARG.to_string(), Value::String(s));
        Value::Object(map)
    });
    let call = MethodCall::new(method, arguments);

    let result = server.channel.dispatch(&call);
    println!("{}", serde_json::to_string(&result)?);

    if result == MethodResult::NotImplemented {
        anyhow::bail!("not implemented: {}", call.method);
    }
    Ok(())
}

/// Print availability of each sensor category
fn run_probe_command() {
    let server = SensorServer::new();
    let service = server.channel.service();

    println!("Provider: {}\n", service.provider_name());
    for category in SensorCategory::ALL {
        let available = service.is_sensor_available(Some(category.label()));
        println!("  {}: {}", category, if available { "available" } else { "not available" });
    }
}

/// Run the MCP server
async fn run_server() -> anyhow::Result<()> {
    tracing::info!("Starting rmcp-sensors server");

    let server = SensorServer::new();
    let service = server.serve(rmcp::transport::stdio()).await?;
    service.waiting().await?;

    tracing::info!("rmcp-sensors server stopped");
    Ok(())
}
