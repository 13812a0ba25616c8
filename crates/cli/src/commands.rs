//! CLI command handlers

use crate::context::AppContext;
use anyhow::Context;
use cosign_core::Identity;
use cosign_crypto::{compute_digest, wrap_for_signing, ApprovalSigner, RecoverableSignature};

fn parse_identity(s: &str) -> Result<Identity, anyhow::Error> {
    Identity::from_hex(s).with_context(|| format!("invalid identity: {s}"))
}

fn require_initialized(ctx: &AppContext) -> Result<(), anyhow::Error> {
    if !ctx.is_initialized() {
        anyhow::bail!("registry not initialized (run `cosign init` first)");
    }
    Ok(())
}

/// Seed the registry with its first authorizer
pub fn init(ctx: &mut AppContext, identity: &str, name: &str) -> Result<(), anyhow::Error> {
    let identity = parse_identity(identity)?;
    ctx.init(identity, name)?;
    println!("✅ Registry initialized with authorizer {} ({})", identity, name);
    Ok(())
}

/// Add an authorizer
pub fn authorizer_add(
    ctx: &mut AppContext,
    caller: &str,
    identity: &str,
    name: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let caller = parse_identity(caller)?;
    let identity = parse_identity(identity)?;

    let event = ctx.registry_mut().add_authorizer(caller, identity, name)?;
    ctx.commit(event)?;

    println!("✅ Authorizer {} ({}) added", identity, name);
    Ok(())
}

/// Remove an authorizer (no-op if absent)
pub fn authorizer_remove(
    ctx: &mut AppContext,
    caller: &str,
    identity: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let caller = parse_identity(caller)?;
    let identity = parse_identity(identity)?;

    match ctx.registry_mut().remove_authorizer(caller, identity)? {
        Some(event) => {
            ctx.commit(event)?;
            println!("✅ Authorizer {} removed", identity);
        }
        None => println!("⚠️  Authorizer {} not found, nothing removed", identity),
    }
    Ok(())
}

/// Change an authorizer's display name
pub fn authorizer_rename(
    ctx: &mut AppContext,
    caller: &str,
    identity: &str,
    name: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let caller = parse_identity(caller)?;
    let identity = parse_identity(identity)?;

    match ctx.registry_mut().rename_authorizer(caller, identity, name)? {
        Some(event) => {
            ctx.commit(event)?;
            println!("✅ Authorizer {} renamed to {}", identity, name);
        }
        None => println!("⚠️  Authorizer {} not found, nothing renamed", identity),
    }
    Ok(())
}

/// List current authorizers
pub fn authorizer_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let authorizers = ctx.registry().authorizers();
    if authorizers.is_empty() {
        println!("No authorizers registered");
        return Ok(());
    }
    for record in authorizers {
        println!("{}  {}", record.identity, record.name);
    }
    Ok(())
}

/// Register a specialist for a domain
pub fn specialist_add(
    ctx: &mut AppContext,
    caller: &str,
    identity: &str,
    name: &str,
    domain: &str,
    contact: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let caller = parse_identity(caller)?;
    let identity = parse_identity(identity)?;

    let event = ctx
        .registry_mut()
        .add_specialist(caller, identity, name, domain, contact)?;
    ctx.commit(event)?;

    println!("✅ Specialist {} ({}) registered for {}", identity, name, domain);
    Ok(())
}

/// Remove the specialist for a domain
pub fn specialist_remove(
    ctx: &mut AppContext,
    caller: &str,
    domain: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let caller = parse_identity(caller)?;

    let event = ctx.registry_mut().remove_specialist(caller, domain)?;
    ctx.commit(event)?;

    println!("✅ Specialist for {} removed", domain);
    Ok(())
}

/// Rewrite a specialist record (name, contact, possibly the domain key)
pub fn specialist_update(
    ctx: &mut AppContext,
    caller: &str,
    domain: &str,
    new_name: &str,
    new_domain: &str,
    new_contact: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let caller = parse_identity(caller)?;

    let event =
        ctx.registry_mut()
            .update_specialist(caller, domain, new_name, new_domain, new_contact)?;
    ctx.commit(event)?;

    if domain == new_domain {
        println!("✅ Specialist for {} updated", domain);
    } else {
        println!("✅ Specialist moved from {} to {}", domain, new_domain);
    }
    Ok(())
}

/// List current specialists
pub fn specialist_list(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let specialists = ctx.registry().specialists();
    if specialists.is_empty() {
        println!("No specialists registered");
        return Ok(());
    }
    for record in specialists {
        println!(
            "{}  {}  domain={}  contact={}",
            record.identity, record.name, record.domain, record.contact
        );
    }
    Ok(())
}

/// Verify both signatures and approve the job
pub fn approve(
    ctx: &mut AppContext,
    title: &str,
    description: &str,
    domain: &str,
    authorizer_sig: &str,
    specialist_sig: &str,
) -> Result<(), anyhow::Error> {
    require_initialized(ctx)?;
    let authorizer_sig = RecoverableSignature::from_hex(authorizer_sig)
        .context("invalid authorizer signature")?;
    let specialist_sig = RecoverableSignature::from_hex(specialist_sig)
        .context("invalid specialist signature")?;

    let event = ctx.registry_mut().verify_and_approve(
        title,
        description,
        domain,
        authorizer_sig.as_bytes(),
        specialist_sig.as_bytes(),
    )?;
    ctx.commit(event)?;

    println!("✅ Approved \"{}\" for domain {}", title, domain);
    Ok(())
}

/// Check whether content has been approved
pub fn check(ctx: &AppContext, title: &str, description: &str) -> Result<(), anyhow::Error> {
    if ctx.registry().is_approved(title, description) {
        println!("✅ Approved");
    } else {
        println!("❌ Not approved");
    }
    Ok(())
}

/// Print the content digest and the signing digest for external signers
pub fn digest(title: &str, description: &str) -> Result<(), anyhow::Error> {
    let content = compute_digest(title, description);
    let signing = wrap_for_signing(&content);
    println!("content digest: {}", content);
    println!("signing digest: {}", signing);
    Ok(())
}

/// Generate a dev signing key and print its identity
pub fn keygen() -> Result<(), anyhow::Error> {
    let signer = ApprovalSigner::generate();
    println!("seed:     {}", signer.seed_hex());
    println!("identity: {}", signer.identity());
    Ok(())
}

/// Sign content with a dev key and print the 65-byte signature
pub fn sign(seed: &str, title: &str, description: &str) -> Result<(), anyhow::Error> {
    let signer = ApprovalSigner::from_hex(seed)?;
    let signing = wrap_for_signing(&compute_digest(title, description));
    let signature = signer.sign(&signing)?;
    println!("identity:  {}", signer.identity());
    println!("signature: {}", signature);
    Ok(())
}

/// Dump the audit log
pub fn log(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let records = ctx.audit_records()?;
    if records.is_empty() {
        println!("Audit log is empty");
        return Ok(());
    }
    for record in records {
        println!(
            "{}  {}  {}",
            record.timestamp.to_rfc3339(),
            record.event.kind(),
            serde_json::to_string(&record.event)?
        );
    }
    Ok(())
}
