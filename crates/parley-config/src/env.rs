use std::sync::LazyLock;

use anyhow::Context;
use regex::Regex;

/// `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*([a-zA-Z0-9_.]+)\s*(?:\|\s*default\("([^"]*)"\))?\s*\}\}"#).expect("must be valid regex")
});

/// Substitute environment placeholders in raw config text
///
/// Runs before TOML parsing so config structs hold plain values. Comment
/// lines are copied untouched, so a commented-out key may reference a
/// variable that is not set. Line endings are preserved as they are.
pub fn expand_env(raw: &str) -> anyhow::Result<String> {
    let mut expanded = String::with_capacity(raw.len());

    for (index, line) in raw.split_inclusive('\n').enumerate() {
        if line.trim_start().starts_with('#') {
            expanded.push_str(line);
            continue;
        }

        expand_line(line, &mut expanded).with_context(|| format!("line {}", index + 1))?;
    }

    Ok(expanded)
}

fn expand_line(line: &str, out: &mut String) -> anyhow::Result<()> {
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let (Some(whole), Some(key)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        out.push_str(&line[cursor..whole.start()]);
        out.push_str(&resolve(key.as_str(), captures.get(2).map(|m| m.as_str()))?);
        cursor = whole.end();
    }

    out.push_str(&line[cursor..]);
    Ok(())
}

fn resolve(key: &str, fallback: Option<&str>) -> anyhow::Result<String> {
    let Some(name) = key.strip_prefix("env.").filter(|name| !name.is_empty() && !name.contains('.')) else {
        anyhow::bail!("unsupported placeholder `{key}`, only `env.` variables are supported");
    };

    match (std::env::var(name), fallback) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.to_owned()),
        (Err(_), None) => anyhow::bail!("environment variable `{name}` is not set"),
    }
}
