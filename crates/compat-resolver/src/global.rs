//! Process-wide compatibility state
//!
//! Old scripts select their era once, at the top, and expect it to hold for
//! everything that follows. The version lives behind a lock so it can be
//! changed at any time; a change affects only calls that read it afterwards.
//! The resolver itself is installed once and never replaced.

use crate::config::ResolverConfig;
use crate::engine::ProxyEngine;
use crate::error::InitError;
use crate::resolver::CompatibilityResolver;
use crate::session::{CompatContext, CompatSession};
use compat_version::CompatibilityVersion;
use once_cell::sync::OnceCell;
use parking_lot::RwLock;

static VERSION: RwLock<CompatibilityVersion> =
    parking_lot::const_rwlock(CompatibilityVersion::LATEST);

static CONTEXT: OnceCell<CompatContext> = OnceCell::new();

/// Select the compatibility version for subsequent calls
pub fn set_version(major: u32, minor: u32) {
    set(CompatibilityVersion::new(major, minor));
}

/// Select the compatibility version for subsequent calls
pub fn set(version: CompatibilityVersion) {
    let previous = std::mem::replace(&mut *VERSION.write(), version);
    if previous != version {
        tracing::info!(%previous, %version, "compatibility version changed");
    }
}

/// Go back to "latest" (no legacy behavior)
pub fn reset_version() {
    set(CompatibilityVersion::LATEST);
}

/// Currently selected version
#[must_use]
pub fn version() -> CompatibilityVersion {
    *VERSION.read()
}

/// Install a context as the process-wide one
///
/// Does not touch the selected version.
///
/// # Errors
/// Returns `InitError::AlreadyInitialized` on a second call
pub fn install(context: CompatContext) -> Result<(), InitError> {
    let rules = context.resolver.rules();
    let (renames, properties, identifiers) = (
        rules.rename_count(),
        rules.property_count(),
        rules.identifier_count(),
    );
    let schemas = context.schemas.len();

    CONTEXT
        .set(context)
        .map_err(|_| InitError::AlreadyInitialized)?;

    tracing::info!(
        renames,
        properties,
        identifiers,
        schemas,
        "compatibility rules installed"
    );
    Ok(())
}

/// Build `config`, install it, and select its version
///
/// # Errors
/// - `InitError::Config` if rules or schemas fail to load or validate
/// - `InitError::AlreadyInitialized` on a second call
pub fn init(config: &ResolverConfig) -> Result<(), InitError> {
    let context = config.build()?;
    let version = context.version;
    install(context)?;
    set(version);
    Ok(())
}

/// Installed context
///
/// # Errors
/// Returns `InitError::NotInitialized` before `init`/`install`
pub fn context() -> Result<&'static CompatContext, InitError> {
    CONTEXT.get().ok_or(InitError::NotInitialized)
}

/// Installed resolver
///
/// # Errors
/// Returns `InitError::NotInitialized` before `init`/`install`
pub fn resolver() -> Result<&'static CompatibilityResolver, InitError> {
    context().map(|context| &context.resolver)
}

/// Check if a context is installed
#[must_use]
pub fn is_initialized() -> bool {
    CONTEXT.get().is_some()
}

/// Session over `engine` that follows the process-wide version
///
/// # Errors
/// Returns `InitError::NotInitialized` before `init`/`install`
pub fn session<E: ProxyEngine>(engine: E) -> Result<CompatSession<E>, InitError> {
    Ok(context()?.session(engine).with_global_version())
}

/// Resolve a proxy name at the selected version
///
/// # Errors
/// Returns `InitError::NotInitialized` before `init`/`install`
pub fn resolve_proxy_name(requested: &str) -> Result<&str, InitError> {
    Ok(resolver()?.resolve_proxy_name(requested, version()))
}

/// Resolve an identifier at the selected version
///
/// # Errors
/// Returns `InitError::NotInitialized` before `init`/`install`
pub fn resolve_identifier<'a>(category: &str, requested: &'a str) -> Result<&'a str, InitError> {
    Ok(resolver()?.resolve_identifier(category, requested, version()))
}
