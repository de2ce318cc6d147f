//! Command-line interface for the Edge Delta AI Team service.
//!
//! # Usage
//!
//! ```bash
//! # List agents
//! aiteam agents
//!
//! # Chat with an agent (one round trip)
//! aiteam chat sre why is checkout slow?
//!
//! # Create an agent from a built-in template
//! aiteam create-agent "Log Analyzer" --template log-analyst
//!
//! # Check which credentials are configured
//! aiteam status
//! ```
//!
//! Credentials come from `--org-id`/`--api-token`/`--jwt`, the `ED_*`
//! environment variables, or an env file (`--env-file`, `~/.edgedelta.env`,
//! `./.env`), in that order of precedence.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use arrrg::CommandLine;
use arrrg_derive::CommandLine;

use aiteam::types::{
    AgentCreateParams, AgentUpdate, AuthData, IntegrationCreateParams, ThreadState,
};
use aiteam::{
    AiTeam, AuthSession, ClientOptions, Credentials, Error, Result, RoundTripConfig, dm_channel,
    prompts, render,
};

const USAGE: &str = "aiteam [OPTIONS] <command> [args...]

Commands:
    login               Login with email/password and print a JWT
    status              Check which credentials are configured
    agents              List all agents
    agent <id>          Show agent details
    create-agent <name> Create a custom agent
    update-agent <id>   Update an agent's config
    delete-agent <id>   Delete a custom agent
    clone-agent <id> <new-name>  Clone an agent
    agent-tools <id>    Show MCP tools assigned to an agent
    channels            List all channels
    channel <id>        Show channel details
    chat <agent> [message...]    Send a message and wait for the reply
    threads <channel>   List threads in a channel
    thread <channel> <id>        Show a thread transcript
    search-threads      Search threads across all channels
    activity            Show recent activity
    models              List available AI models
    connectors          List available connectors
    integrations        List all integrations
    create-integration <type> <name>  Create an integration
    delete-integration <name>         Delete an integration
    prompts             List built-in agent prompt templates";

/// Command-line arguments for the aiteam tool.
#[derive(CommandLine, Debug, Default, PartialEq)]
struct Args {
    /// Organization ID.
    #[arrrg(optional, "Organization ID (default: ED_ORG_ID)", "ORG")]
    org_id: Option<String>,

    /// API token for the main API surface.
    #[arrrg(optional, "API token (default: ED_API_TOKEN)", "TOKEN")]
    api_token: Option<String>,

    /// Bearer token for the chat/agent surfaces.
    #[arrrg(optional, "Bearer token (default: ED_JWT)", "JWT")]
    jwt: Option<String>,

    /// Env file to load credentials from.
    #[arrrg(optional, "Path to a KEY=VALUE env file", "PATH")]
    env_file: Option<String>,

    /// Login email (login command).
    #[arrrg(optional, "Email for login (default: ED_EMAIL)", "EMAIL")]
    email: Option<String>,

    /// Login password (login command).
    #[arrrg(optional, "Password for login (default: ED_PASSWORD)", "PASSWORD")]
    password: Option<String>,

    /// Chat response timeout in seconds.
    #[arrrg(optional, "Response timeout in seconds (default: 120)", "SECONDS")]
    timeout: Option<u64>,

    /// Show raw thread JSON instead of the extracted reply (chat command).
    #[arrrg(flag, "Show raw thread JSON instead of the text reply")]
    raw: bool,

    /// Maximum items to list.
    #[arrrg(optional, "Max items to list", "N")]
    limit: Option<u32>,

    /// Lookback window for activity queries.
    #[arrrg(optional, "Lookback window, e.g. 1h, 24h, 7d (default: 7d)", "WINDOW")]
    lookback: Option<String>,

    /// Thread state filter for search-threads.
    #[arrrg(optional, "Thread state filter (investigating, resolved, done)", "STATE")]
    state: Option<String>,

    /// Agent description.
    #[arrrg(optional, "Agent or integration description", "TEXT")]
    description: Option<String>,

    /// System prompt text.
    #[arrrg(optional, "System prompt text", "PROMPT")]
    system_prompt: Option<String>,

    /// Read the system prompt from a file.
    #[arrrg(optional, "Read the system prompt from a file", "PATH")]
    prompt_file: Option<String>,

    /// Built-in prompt template to create the agent from.
    #[arrrg(optional, "Built-in template key (see 'aiteam prompts')", "KEY")]
    template: Option<String>,

    /// LLM model.
    #[arrrg(optional, "LLM model for the agent", "MODEL")]
    model: Option<String>,

    /// Agent role title.
    #[arrrg(optional, "Agent role title", "ROLE")]
    role: Option<String>,

    /// New name for update-agent.
    #[arrrg(optional, "New agent name (update-agent)", "NAME")]
    name: Option<String>,

    /// Comma-separated capabilities.
    #[arrrg(optional, "Comma-separated capability tags", "LIST")]
    capabilities: Option<String>,

    /// Comma-separated connector names.
    #[arrrg(optional, "Comma-separated connector names", "LIST")]
    connectors: Option<String>,

    /// Model temperature.
    #[arrrg(optional, "Model temperature 0.0-1.0", "T")]
    temperature: Option<f64>,

    /// Agent priority.
    #[arrrg(optional, "Agent priority 1-10", "N")]
    priority: Option<u32>,

    /// Avatar URL or identifier.
    #[arrrg(optional, "Avatar URL or identifier", "AVATAR")]
    avatar: Option<String>,

    /// Agent status for update-agent.
    #[arrrg(optional, "Agent status (active or inactive)", "STATUS")]
    status: Option<String>,

    /// Display name for create-integration.
    #[arrrg(optional, "Integration display name", "NAME")]
    display_name: Option<String>,

    /// MCP server URL for create-integration.
    #[arrrg(optional, "MCP server URL (custom-mcp integrations)", "URL")]
    server_url: Option<String>,

    /// Authentication type for create-integration.
    #[arrrg(optional, "Integration auth type (none, token, oAuth)", "TYPE")]
    auth_type: Option<String>,

    /// Bearer token for create-integration.
    #[arrrg(optional, "Integration bearer token (auth-type token)", "TOKEN")]
    token: Option<String>,

    /// Skip confirmation prompts.
    #[arrrg(flag, "Skip confirmation prompts")]
    force: bool,
}

impl Eq for Args {}

#[tokio::main]
async fn main() {
    let (args, free) = Args::from_command_line_relaxed(USAGE);
    if free.is_empty() {
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
    if let Err(err) = run(&args, &free).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: &Args, free: &[String]) -> Result<()> {
    match free[0].as_str() {
        "login" => cmd_login(args).await,
        "status" => cmd_status(args).await,
        "agents" => {
            let client = client(args).await?;
            print!("{}", render::agents_list(&client.list_agents().await?));
            Ok(())
        }
        "agent" => {
            let client = client(args).await?;
            let agent = client.get_agent(positional(free, 1, "agent-id")?).await?;
            println!("{}", serde_json::to_string_pretty(&agent)?);
            Ok(())
        }
        "create-agent" => cmd_create_agent(args, free).await,
        "update-agent" => cmd_update_agent(args, free).await,
        "delete-agent" => cmd_delete_agent(args, free).await,
        "clone-agent" => cmd_clone_agent(args, free).await,
        "agent-tools" => {
            let agent_id = positional(free, 1, "agent-id")?;
            let client = client(args).await?;
            let tools = client.agent_tools(agent_id).await?;
            print!("{}", render::agent_tools(agent_id, &tools));
            Ok(())
        }
        "channels" => {
            let client = client(args).await?;
            print!("{}", render::channels_list(&client.list_channels().await?));
            Ok(())
        }
        "channel" => {
            let client = client(args).await?;
            let channel = client
                .get_channel(positional(free, 1, "channel-id")?)
                .await?;
            println!("{}", serde_json::to_string_pretty(&channel)?);
            Ok(())
        }
        "chat" => cmd_chat(args, free).await,
        "threads" => {
            let channel_id = positional(free, 1, "channel-id")?;
            let client = client(args).await?;
            let threads = client
                .list_threads(channel_id, args.limit.unwrap_or(20))
                .await?;
            print!("{}", render::threads_list(channel_id, &threads));
            Ok(())
        }
        "thread" => cmd_thread(args, free).await,
        "search-threads" => cmd_search_threads(args).await,
        "activity" => {
            let client = client(args).await?;
            let lookback = args.lookback.as_deref().unwrap_or("7d");
            let items = client
                .activity(args.limit.unwrap_or(20), Some(lookback), None)
                .await?;
            print!(
                "{}",
                render::activity_list(
                    &format!("Activity ({} items, lookback={lookback})", items.len()),
                    &items
                )
            );
            Ok(())
        }
        "models" => {
            let client = client(args).await?;
            print!("{}", render::models_list(&client.list_models().await?));
            Ok(())
        }
        "connectors" => {
            let client = client(args).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&client.list_connectors().await?)?
            );
            Ok(())
        }
        "integrations" => {
            let client = client(args).await?;
            print!(
                "{}",
                render::integrations_list(&client.list_integrations().await?)
            );
            Ok(())
        }
        "create-integration" => cmd_create_integration(args, free).await,
        "delete-integration" => cmd_delete_integration(args, free).await,
        "prompts" => {
            print!("{}", render::prompt_templates(prompts::TEMPLATES));
            Ok(())
        }
        other => Err(Error::validation(
            format!("unknown command: {other}"),
            Some("command".to_string()),
        )),
    }
}

fn positional<'a>(free: &'a [String], index: usize, name: &str) -> Result<&'a str> {
    free.get(index).map(String::as_str).ok_or_else(|| {
        Error::validation(
            format!("missing <{name}> argument"),
            Some(name.to_string()),
        )
    })
}

fn credentials(args: &Args) -> Result<Credentials> {
    let overrides = Credentials {
        org_id: args.org_id.clone(),
        api_token: args.api_token.clone(),
        jwt: args.jwt.clone(),
        email: args.email.clone(),
        password: args.password.clone(),
    };
    Credentials::resolve(overrides, args.env_file.as_deref().map(Path::new))
}

/// Builds the client, logging in with email/password when no JWT is
/// available.
async fn client(args: &Args) -> Result<AiTeam> {
    let creds = credentials(args)?;
    let org_id = creds.require_org_id()?.to_string();
    let jwt = match creds.jwt.clone() {
        Some(jwt) => jwt,
        None if creds.can_login() => {
            eprintln!("No JWT found, logging in...");
            let mut session = AuthSession::new()?;
            let email = creds.email.as_deref().unwrap_or_default();
            let password = creds.password.as_deref().unwrap_or_default();
            session.login(email, password).await?
        }
        None => {
            return Err(Error::authentication(
                "no JWT or login credentials found; set ED_JWT, or ED_EMAIL + ED_PASSWORD, or pass --jwt",
            ));
        }
    };
    AiTeam::with_options(
        org_id,
        Some(jwt),
        ClientOptions {
            api_token: creds.api_token,
            timeout: args.timeout.map(Duration::from_secs),
            ..ClientOptions::default()
        },
    )
}

async fn cmd_login(args: &Args) -> Result<()> {
    let creds = credentials(args)?;
    creds.require_org_id()?;
    if !creds.can_login() {
        return Err(Error::validation(
            "email and password required; use --email/--password or set ED_EMAIL/ED_PASSWORD",
            Some("email".to_string()),
        ));
    }
    let email = creds.email.as_deref().unwrap_or_default();
    let password = creds.password.as_deref().unwrap_or_default();
    let mut session = AuthSession::new()?;
    let jwt = session.login(email, password).await?;
    println!("Login successful!");
    println!("\nJWT (set as ED_JWT):");
    if jwt.chars().count() > 80 {
        let preview: String = jwt.chars().take(80).collect();
        println!("{preview}...");
    } else {
        println!("{jwt}");
    }
    println!("\nExport command:");
    println!("export ED_JWT=\"{jwt}\"");
    Ok(())
}

async fn cmd_status(args: &Args) -> Result<()> {
    let creds = credentials(args)?;
    println!(
        "Org ID:    {}",
        creds.org_id.as_deref().unwrap_or("NOT SET")
    );
    println!(
        "API Token: {}",
        if creds.api_token.is_some() { "SET" } else { "NOT SET" }
    );
    println!(
        "JWT:       {}",
        if creds.has_jwt() { "SET" } else { "NOT SET" }
    );
    println!(
        "Email:     {}",
        creds.email.as_deref().unwrap_or("NOT SET")
    );

    if let (Some(org_id), Some(jwt)) = (creds.org_id.clone(), creds.jwt.clone()) {
        let client = AiTeam::with_options(
            org_id,
            Some(jwt),
            ClientOptions {
                api_token: creds.api_token.clone(),
                timeout: Some(Duration::from_secs(10)),
                ..ClientOptions::default()
            },
        )?;
        match client.list_agents().await {
            Ok(_) => println!("\nJWT auth:       OK"),
            Err(err) => println!("\nJWT auth:       FAILED ({err})"),
        }
        if creds.api_token.is_some() {
            match client.list_models().await {
                Ok(_) => println!("API Token auth: OK"),
                Err(err) => println!("API Token auth: FAILED ({err})"),
            }
        }
    }
    Ok(())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn read_system_prompt(args: &Args) -> Result<Option<String>> {
    if let Some(path) = &args.prompt_file {
        return Ok(Some(std::fs::read_to_string(path).map_err(|e| {
            Error::io(format!("failed to read {path}"), e)
        })?));
    }
    Ok(args.system_prompt.clone())
}

async fn cmd_create_agent(args: &Args, free: &[String]) -> Result<()> {
    let name = positional(free, 1, "name")?;

    let mut params = match &args.template {
        Some(key) => {
            let mut params = prompts::get_template(key)?.create_params();
            params.name = name.to_string();
            params
        }
        None => {
            let system_prompt = read_system_prompt(args)?.unwrap_or_else(|| {
                format!("You are {name}, a custom AI agent for Edge Delta observability platform.")
            });
            let description = args
                .description
                .clone()
                .unwrap_or_else(|| format!("Custom agent: {name}"));
            AgentCreateParams::new(name, description, system_prompt)
        }
    };
    if let Some(description) = &args.description {
        params.description = description.clone();
    }
    if let Some(prompt) = read_system_prompt(args)? {
        params.master_prompt = prompt;
    }
    if let Some(model) = &args.model {
        params.model = model.clone();
    }
    if let Some(role) = &args.role {
        params.role = Some(role.clone());
    }
    if let Some(avatar) = &args.avatar {
        params.avatar = Some(avatar.clone());
    }
    if let Some(temperature) = args.temperature {
        params.model_temperature = temperature;
    }
    if let Some(priority) = args.priority {
        params.priority = priority;
    }
    if let Some(capabilities) = &args.capabilities {
        params.capabilities = split_list(capabilities);
    }
    if let Some(connectors) = &args.connectors {
        params.connectors = split_list(connectors);
    }

    println!("Creating agent '{name}'...");
    let client = client(args).await?;
    let agent = client.create_agent(params).await?;
    println!("\nAgent created successfully!");
    println!("  ID:    {}", agent.id);
    println!("  Name:  {}", agent.name);
    println!("  Model: {}", agent.model);
    println!("  DM Channel: {}", dm_channel(&agent.id));
    println!("\nChat with: aiteam chat {} 'Hello'", agent.id);
    Ok(())
}

fn update_from_args(args: &Args) -> Result<AgentUpdate> {
    Ok(AgentUpdate {
        name: args.name.clone(),
        description: args.description.clone(),
        master_prompt: read_system_prompt(args)?,
        model: args.model.clone(),
        model_temperature: args.temperature,
        status: args.status.clone(),
        connectors: args.connectors.as_deref().map(split_list),
        capabilities: args.capabilities.as_deref().map(split_list),
        role: args.role.clone(),
        priority: args.priority,
    })
}

async fn cmd_update_agent(args: &Args, free: &[String]) -> Result<()> {
    let agent_id = positional(free, 1, "agent-id")?;
    let update = update_from_args(args)?;
    if update.is_empty() {
        return Err(Error::validation(
            "no updates specified; use --name, --description, --model, --system-prompt, --connectors, ...",
            None,
        ));
    }
    let client = client(args).await?;
    let agent = client.update_agent(agent_id, update).await?;
    println!("Agent {agent_id} updated:");
    println!("{}", serde_json::to_string_pretty(&agent)?);
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} (y/N): ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}

async fn cmd_delete_agent(args: &Args, free: &[String]) -> Result<()> {
    let agent_id = positional(free, 1, "agent-id")?;
    if !args.force && !confirm(&format!("Delete agent {agent_id}?"))? {
        println!("Cancelled.");
        return Ok(());
    }
    let client = client(args).await?;
    client.delete_agent(agent_id).await?;
    println!("Deleted agent {agent_id}");
    Ok(())
}

async fn cmd_clone_agent(args: &Args, free: &[String]) -> Result<()> {
    let agent_id = positional(free, 1, "agent-id")?;
    let new_name = positional(free, 2, "new-name")?;
    let overrides = AgentUpdate {
        description: args.description.clone(),
        master_prompt: read_system_prompt(args)?,
        model: args.model.clone(),
        model_temperature: args.temperature,
        ..AgentUpdate::default()
    };
    println!("Cloning agent {agent_id} as '{new_name}'...");
    let client = client(args).await?;
    let agent = client.clone_agent(agent_id, new_name, overrides).await?;
    println!("\nAgent cloned successfully!");
    println!("  ID:    {}", agent.id);
    println!("  Name:  {}", agent.name);
    println!("  Model: {}", agent.model);
    println!("  DM Channel: {}", dm_channel(&agent.id));
    Ok(())
}

async fn cmd_chat(args: &Args, free: &[String]) -> Result<()> {
    let agent_id = positional(free, 1, "agent-id")?;
    let message = free[2..].join(" ");
    if message.trim().is_empty() {
        return Err(Error::validation(
            "no message given; pass it after the agent id, or use aiteam-chat for a REPL",
            Some("message".to_string()),
        ));
    }

    let mut config = RoundTripConfig::default();
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }

    let preview: String = message.chars().take(60).collect();
    let ellipsis = if message.chars().count() > 60 { "..." } else { "" };
    println!("Sending to {agent_id}: {preview}{ellipsis}");

    let client = client(args).await?;
    if args.raw {
        let result = client
            .send_message_and_wait(&dm_channel(agent_id), &message, config)
            .await?;
        println!("{}", serde_json::to_string_pretty(&result.thread)?);
        println!("{}", serde_json::to_string_pretty(&result.messages)?);
    } else {
        let reply = client.chat(agent_id, &message, config).await?;
        println!("\n{}", "=".repeat(60));
        println!("{reply}");
        println!("{}", "=".repeat(60));
    }
    Ok(())
}

async fn cmd_thread(args: &Args, free: &[String]) -> Result<()> {
    let channel_id = positional(free, 1, "channel-id")?;
    let thread_id = positional(free, 2, "thread-id")?;
    let client = client(args).await?;
    let thread = client.get_thread(channel_id, thread_id, 10_000).await?;
    let messages = if thread.inline_messages().is_empty() {
        client.get_thread_messages(channel_id, thread_id).await?
    } else {
        thread.inline_messages().to_vec()
    };
    print!("{}", render::transcript(&thread, &messages));
    Ok(())
}

async fn cmd_search_threads(args: &Args) -> Result<()> {
    let lookback = args.lookback.as_deref().unwrap_or("7d");
    let state = args.state.as_deref().map(ThreadState::from);
    let client = client(args).await?;
    let results = client
        .search_threads(lookback, state.as_ref(), args.limit.unwrap_or(50))
        .await?;
    let state_suffix = args
        .state
        .as_deref()
        .map(|s| format!(", state={s}"))
        .unwrap_or_default();
    print!(
        "{}",
        render::activity_list(
            &format!(
                "Thread Search ({} results, lookback={lookback}{state_suffix})",
                results.len()
            ),
            &results
        )
    );
    Ok(())
}

async fn cmd_create_integration(args: &Args, free: &[String]) -> Result<()> {
    let connector_type = positional(free, 1, "connector-type")?;
    let name = positional(free, 2, "name")?;
    let auth_data = AuthData {
        auth_type: args.auth_type.clone().unwrap_or_else(|| "none".to_string()),
        server_url: args.server_url.clone(),
        token: args.token.clone(),
    };
    let params =
        IntegrationCreateParams::new(connector_type, name, args.display_name.clone(), auth_data);

    println!("Creating integration '{name}' (type={connector_type})...");
    let client = client(args).await?;
    let integration = client.create_integration(params).await?;
    println!("\nIntegration created!");
    println!("  Name: {}", integration.name);
    println!("  Type: {}", integration.r#type);
    println!(
        "  Display: {}",
        integration.display_name.as_deref().unwrap_or("")
    );
    println!(
        "\nAdd to agent: aiteam update-agent <agent_id> --connectors edgedelta-mcp,edgedelta-documentation,{name}"
    );
    Ok(())
}

async fn cmd_delete_integration(args: &Args, free: &[String]) -> Result<()> {
    let name = positional(free, 1, "name")?;
    if !args.force && !confirm(&format!("Delete integration '{name}'?"))? {
        println!("Cancelled.");
        return Ok(());
    }
    let client = client(args).await?;
    client.delete_integration(name).await?;
    println!("Deleted integration '{name}'");
    Ok(())
}
