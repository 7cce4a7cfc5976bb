//! Upload server command.

use console::style;

use crate::config::Config;

/// Port used when a bind address names only a host.
const DEFAULT_PORT: u16 = 5000;

/// Start the upload server.
pub async fn cmd_serve(config: &Config, bind: Option<&str>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or(&config.server.bind);
    let (host, port) = parse_bind_address(bind);

    if let Some(path) = &config.source_path {
        println!(
            "{} Using config {}",
            style("→").cyan(),
            style(path.display()).dim()
        );
    }
    println!(
        "{} Starting contentlens server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(config, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "5000" -> 127.0.0.1:5000
/// - Just a host: "0.0.0.0" -> 0.0.0.0:5000
/// - Host and port: "0.0.0.0:5000" -> 0.0.0.0:5000
fn parse_bind_address(bind: &str) -> (String, u16) {
    if let Ok(port) = bind.parse::<u16>() {
        return ("127.0.0.1".to_string(), port);
    }

    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return (host.to_string(), port);
        }
    }

    (bind.to_string(), DEFAULT_PORT)
}
