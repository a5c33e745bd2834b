// ABOUTME: Gatekeeper CLI - command-line front end for the Gatekeeper driver
// ABOUTME: Runs user, service, token, and password-check operations against a Gatekeeper instance
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List users and check one password, as an admin
//! gatekeeper-cli --admin-uid 1 --admin-password secret demo --auth-user 7 --auth-password pw
//!
//! # Register a user allowed to use two services
//! gatekeeper-cli user register --username alice --password pw --access-list "mail,wiki"
//!
//! # Issue and validate a token
//! gatekeeper-cli token generate --user-id 7 --password pw
//! gatekeeper-cli token validate <token> --user-id 7
//! ```

mod commands;
mod helpers;

use std::env;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gatekeeper_driver::constants::env_vars;
use gatekeeper_driver::logging::LoggingConfig;
use gatekeeper_driver::models::UserId;
use gatekeeper_driver::DriverConfig;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "gatekeeper-cli",
    about = "Gatekeeper identity service CLI",
    long_about = "Command-line tool for managing Gatekeeper users and services and checking tokens."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Gatekeeper base URI (overrides GATEKEEPER_URI)
    #[arg(long, global = true)]
    uri: Option<String>,

    /// Gatekeeper port (overrides GATEKEEPER_PORT)
    #[arg(long, global = true)]
    port: Option<u16>,

    /// Admin user id (overrides GATEKEEPER_ADMIN_UID)
    #[arg(long, global = true)]
    admin_uid: Option<UserId>,

    /// Admin password (overrides GATEKEEPER_ADMIN_PASSWORD)
    #[arg(long, global = true)]
    admin_password: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// List users, then optionally check one user's password
    Demo(DemoArgs),

    /// User management (admin)
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Service management (admin)
    Service {
        #[command(subcommand)]
        action: ServiceCommand,
    },

    /// Token issuing and validation
    Token {
        #[command(subcommand)]
        action: TokenCommand,
    },

    /// Check a user's password without issuing a token
    Auth {
        /// User id
        #[arg(long)]
        user_id: UserId,

        /// User password
        #[arg(long)]
        password: String,
    },
}

#[derive(Args)]
struct DemoArgs {
    /// User whose password is checked after listing users
    #[arg(long, requires = "auth_password")]
    auth_user: Option<UserId>,

    /// Password for --auth-user
    #[arg(long, requires = "auth_user")]
    auth_password: Option<String>,
}

#[derive(Subcommand)]
enum UserCommand {
    /// List all users
    List,

    /// Register a new user
    Register {
        /// Login name
        #[arg(long)]
        username: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Grant admin privileges
        #[arg(long)]
        admin: bool,

        /// Comma-separated service short names, or ALL
        #[arg(long)]
        access_list: String,
    },

    /// Delete a user by id
    Delete {
        /// User id to delete
        user_id: UserId,
    },
}

#[derive(Subcommand)]
enum ServiceCommand {
    /// List registered services
    List,

    /// Register a downstream service
    Register {
        /// Unique one-word service name
        #[arg(long)]
        short_name: String,

        /// Sentence describing the service
        #[arg(long)]
        description: String,
    },
}

#[derive(Subcommand)]
enum TokenCommand {
    /// Issue a token for a user
    Generate {
        /// User id
        #[arg(long)]
        user_id: UserId,

        /// User password
        #[arg(long)]
        password: String,
    },

    /// Check whether a token is valid for a user or a service
    Validate {
        /// Token to check
        token: String,

        /// Validate for this user
        #[arg(long, conflicts_with = "service_key", required_unless_present = "service_key")]
        user_id: Option<UserId>,

        /// Validate for the service owning this key
        #[arg(long)]
        service_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose {
        logging.with_level("debug")
    } else {
        logging
    };
    let _log_guard = logging.init()?;

    let config = load_config(&cli)?;
    info!("Gatekeeper CLI targeting {}", config.endpoint);

    match cli.command {
        Command::Demo(args) => {
            commands::demo::run(&config, args.auth_user.zip(args.auth_password)).await?;
        }
        Command::User { action } => match action {
            UserCommand::List => commands::admin::list_users(&config).await?,
            UserCommand::Register {
                username,
                password,
                admin,
                access_list,
            } => {
                commands::admin::register_user(&config, username, password, admin, access_list)
                    .await?;
            }
            UserCommand::Delete { user_id } => {
                commands::admin::delete_user(&config, user_id).await?;
            }
        },
        Command::Service { action } => match action {
            ServiceCommand::List => commands::admin::list_services(&config).await?,
            ServiceCommand::Register {
                short_name,
                description,
            } => commands::admin::register_service(&config, short_name, description).await?,
        },
        Command::Token { action } => match action {
            TokenCommand::Generate { user_id, password } => {
                commands::token::generate(&config, user_id, &password).await?;
            }
            TokenCommand::Validate {
                token,
                user_id,
                service_key,
            } => commands::token::validate(&config, token, user_id, service_key).await?,
        },
        Command::Auth { user_id, password } => {
            commands::token::authenticate(&config, user_id, &password).await?;
        }
    }

    Ok(())
}

/// Environment configuration with command-line overrides applied on top
fn load_config(cli: &Cli) -> Result<DriverConfig> {
    let overrides = [
        (env_vars::URI, cli.uri.clone()),
        (env_vars::PORT, cli.port.as_ref().map(ToString::to_string)),
        (env_vars::ADMIN_UID, cli.admin_uid.as_ref().map(ToString::to_string)),
        (env_vars::ADMIN_PASSWORD, cli.admin_password.clone()),
    ];

    let config = DriverConfig::from_lookup(|key| {
        overrides
            .iter()
            .find(|(name, _)| *name == key)
            .and_then(|(_, value)| value.clone())
            .or_else(|| env::var(key).ok())
    })?;
    Ok(config)
}
