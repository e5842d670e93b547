use crate::model::Collection;

/// Render the full collection (config, per-scenario series and summary) as
/// pretty JSON. Non-finite values are written as `null`.
pub fn render_report(data: &Collection) -> anyhow::Result<String> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(json)
}
