const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Base URL of the upload server, fixed at build time through `REMOVER_API_BASE`.
pub fn api_base() -> &'static str {
    option_env!("REMOVER_API_BASE").unwrap_or(DEFAULT_API_BASE)
}
