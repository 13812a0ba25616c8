//! CoSign CLI - Main entry point

use clap::{Parser, Subcommand};
use cosign_cli::{commands, AppContext};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cosign")]
#[command(about = "CoSign - dual-signature approval registry", long_about = None)]
struct Cli {
    /// Data directory path
    #[arg(short, long, default_value = "./data")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the registry with its first authorizer
    Init {
        /// Seed authorizer identity (hex)
        identity: String,
        /// Seed authorizer display name
        name: String,
    },

    /// Manage authorizers
    Authorizer {
        #[command(subcommand)]
        command: AuthorizerCommands,
    },

    /// Manage domain specialists
    Specialist {
        #[command(subcommand)]
        command: SpecialistCommands,
    },

    /// Verify both signatures and approve a job
    Approve {
        /// Job title
        title: String,
        /// Job description
        description: String,
        /// Domain type the specialist signature must match
        domain: String,
        /// Authorizer signature (65-byte hex)
        #[arg(long)]
        authorizer_sig: String,
        /// Specialist signature (65-byte hex)
        #[arg(long)]
        specialist_sig: String,
    },

    /// Check whether content has been approved
    Check {
        /// Job title
        title: String,
        /// Job description
        description: String,
    },

    /// Print the content and signing digests for external signers
    Digest {
        /// Job title
        title: String,
        /// Job description
        description: String,
    },

    /// Generate a dev signing key
    Keygen,

    /// Sign content with a dev key (key storage is the caller's problem)
    Sign {
        /// 32-byte seed (hex)
        #[arg(long)]
        key: String,
        /// Job title
        title: String,
        /// Job description
        description: String,
    },

    /// Dump the audit log
    Log,
}

#[derive(Subcommand)]
enum AuthorizerCommands {
    /// Add an authorizer
    Add {
        /// Caller identity (must be a current authorizer)
        #[arg(long)]
        caller: String,
        /// New authorizer identity (hex)
        identity: String,
        /// Display name
        name: String,
    },
    /// Remove an authorizer (silent no-op if absent)
    Remove {
        #[arg(long)]
        caller: String,
        /// Authorizer identity (hex)
        identity: String,
    },
    /// Change an authorizer's display name
    Rename {
        #[arg(long)]
        caller: String,
        /// Authorizer identity (hex)
        identity: String,
        /// New display name
        name: String,
    },
    /// List authorizers
    List,
}

#[derive(Subcommand)]
enum SpecialistCommands {
    /// Register a specialist for a domain
    Add {
        #[arg(long)]
        caller: String,
        /// Specialist identity (hex)
        identity: String,
        /// Display name
        name: String,
        /// Domain type (one specialist per domain)
        domain: String,
        /// Contact identifier (globally unique)
        contact: String,
    },
    /// Remove the specialist for a domain
    Remove {
        #[arg(long)]
        caller: String,
        /// Domain type
        domain: String,
    },
    /// Rewrite a specialist record, possibly moving it to a new domain
    Update {
        #[arg(long)]
        caller: String,
        /// Current domain type
        domain: String,
        /// New display name
        name: String,
        /// New domain type (may equal the current one)
        new_domain: String,
        /// New contact identifier
        contact: String,
    },
    /// List specialists
    List,
}

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .init();

    let cli = Cli::parse();
    let mut ctx = AppContext::open(&cli.data)?;

    match cli.command {
        Commands::Init { identity, name } => commands::init(&mut ctx, &identity, &name),
        Commands::Authorizer { command } => match command {
            AuthorizerCommands::Add {
                caller,
                identity,
                name,
            } => commands::authorizer_add(&mut ctx, &caller, &identity, &name),
            AuthorizerCommands::Remove { caller, identity } => {
                commands::authorizer_remove(&mut ctx, &caller, &identity)
            }
            AuthorizerCommands::Rename {
                caller,
                identity,
                name,
            } => commands::authorizer_rename(&mut ctx, &caller, &identity, &name),
            AuthorizerCommands::List => commands::authorizer_list(&ctx),
        },
        Commands::Specialist { command } => match command {
            SpecialistCommands::Add {
                caller,
                identity,
                name,
                domain,
                contact,
            } => commands::specialist_add(&mut ctx, &caller, &identity, &name, &domain, &contact),
            SpecialistCommands::Remove { caller, domain } => {
                commands::specialist_remove(&mut ctx, &caller, &domain)
            }
            SpecialistCommands::Update {
                caller,
                domain,
                name,
                new_domain,
                contact,
            } => commands::specialist_update(&mut ctx, &caller, &domain, &name, &new_domain, &contact),
            SpecialistCommands::List => commands::specialist_list(&ctx),
        },
        Commands::Approve {
            title,
            description,
            domain,
            authorizer_sig,
            specialist_sig,
        } => commands::approve(
            &mut ctx,
            &title,
            &description,
            &domain,
            &authorizer_sig,
            &specialist_sig,
        ),
        Commands::Check { title, description } => commands::check(&ctx, &title, &description),
        Commands::Digest { title, description } => commands::digest(&title, &description),
        Commands::Keygen => commands::keygen(),
        Commands::Sign {
            key,
            title,
            description,
        } => commands::sign(&key, &title, &description),
        Commands::Log => commands::log(&ctx),
    }
}
