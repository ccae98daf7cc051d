//! Upstream base URL resolution.

/// Built-in OpenRouter endpoint used when nothing else is configured.
pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai";

/// Environment variable that overrides the OpenRouter base URL.
pub const OPENROUTER_BASE_URL_ENV: &str = "OPENROUTER_API_BASE_URL";

/// Pick the effective base URL for a provider.
///
/// A set, non-empty environment value wins over the configured one. The
/// result never ends with `/`.
pub fn resolve_base_url(configured: &str, env_value: Option<&str>) -> String {
    let chosen = match env_value.map(str::trim) {
        Some(value) if !value.is_empty() => value,
        _ => configured,
    };
    chosen.trim_end_matches('/').to_string()
}
