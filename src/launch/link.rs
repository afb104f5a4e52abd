use anyhow::{Context, Result, bail};
use url::Url;

/// Validate `raw` as an http(s) URL, returning it parsed
pub fn parse_external_link(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid URL: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Refusing to open `{}` link: only http and https are supported", other),
    }
}

/// Open a web link with the system's default handler
pub fn open_external_link(raw: &str) -> Result<()> {
    let url = parse_external_link(raw)?;
    open::that_detached(url.as_str())
        .with_context(|| format!("Failed to open link: {}", url))?;
    Ok(())
}
