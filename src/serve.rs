//! Development server.
//!
//! A lightweight HTTP file server over the deploy tree, built on
//! `tiny_http`:
//!
//! - Static file serving from the output directory
//! - Automatic `index.html` resolution for directories
//! - Port auto-retry when the configured port is taken
//!
//! It serves whatever the last build produced; run `prosa build` first.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::{
    fs,
    io::Cursor,
    net::SocketAddr,
    path::Path,
};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

/// Start the development server. Blocks until the process is killed.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config
        .serve
        .interface
        .parse()
        .with_context(|| format!("invalid [serve.interface] `{}`", config.serve.interface))?;

    let (server, addr) = try_bind_port(interface, config.serve.port, MAX_PORT_RETRIES)?;
    let serve_root = config.deploy_dir();
    if !serve_root.is_dir() {
        log!("warn"; "`{}` does not exist yet, run `prosa build` first", serve_root.display());
    }

    log!("serve"; "http://{addr}");

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &serve_root) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

/// Handle a single HTTP request.
///
/// Resolution order: exact file match, then `index.html` inside a matched
/// directory, then 404.
fn handle_request(request: Request, serve_root: &Path) -> Result<()> {
    let url_path = urlencoding::decode(request.url())
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    // Strip the query string before resolving the path
    let path_without_query = url_path.split('?').next().unwrap_or(&url_path);
    let request_path = path_without_query.trim_matches('/');
    let local_path = serve_root.join(request_path);

    if local_path.is_file() {
        return serve_file(request, &local_path);
    }

    if local_path.is_dir() {
        let index_path = local_path.join("index.html");
        if index_path.is_file() {
            return serve_file(request, &index_path);
        }
    }

    serve_not_found(request)
}

/// Serve a file with appropriate content type.
fn serve_file(request: Request, path: &Path) -> Result<()> {
    let content = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let content_type = guess_content_type(path);

    let response = Response::from_data(content)
        .with_header(Header::from_bytes("Content-Type", content_type).unwrap());

    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::new(
        StatusCode(404),
        vec![Header::from_bytes("Content-Type", "text/plain").unwrap()],
        Cursor::new("404 Not Found"),
        Some(13),
        None,
    );
    request.respond(response)?;
    Ok(())
}

/// Guess MIME content type from file extension.
///
/// Returns `application/octet-stream` for unknown extensions.
fn guess_content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        // Web content
        Some("html" | "htm") => "text/html; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("js" | "mjs") => "application/javascript; charset=utf-8",
        Some("json") => "application/json; charset=utf-8",
        Some("xml") => "application/xml; charset=utf-8",

        // Images
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("ico") => "image/x-icon",

        // Fonts
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",

        // Documents
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain; charset=utf-8",
        Some("md") => "text/markdown; charset=utf-8",

        // Default binary
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(
            guess_content_type(Path::new("index.html")),
            "text/html; charset=utf-8"
        );
        assert_eq!(guess_content_type(Path::new("style.css")), "text/css; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("feed.xml")), "application/xml; charset=utf-8");
        assert_eq!(guess_content_type(Path::new("blob.bin")), "application/octet-stream");
    }
}
