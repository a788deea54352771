//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use seedport_server::config::ServerConfig;
use seedport_server::start_server;

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let server_config = server_config(&args, config)?;
    eprintln!(
        "{}",
        formatter.info(&format!("Serving legacy API on {}", server_config.bind_addr()))
    );
    start_server(server_config).await?;
    Ok(())
}

/// Flags override `PORT`, which overrides the `[server]` section.
fn server_config(args: &ServeArgs, config: &Config) -> Result<ServerConfig> {
    let mut server = config
        .server
        .clone()
        .with_env_overrides()
        .map_err(seedport_server::ServerError::from)?;
    if let Some(bind) = &args.bind {
        server.bind_address = bind.clone();
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    server.validate().map_err(seedport_server::ServerError::from)?;
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    #[test]
    fn test_empty_bind_flag_rejected() {
        let args = ServeArgs {
            bind: Some(String::new()),
            port: None,
        };
        assert!(matches!(
            server_config(&args, &Config::default()),
            Err(CliError::Server(_))
        ));
    }

    #[test]
    fn test_flags_override_config() {
        let args = ServeArgs {
            bind: Some("127.0.0.1".to_string()),
            port: Some(8123),
        };
        let server = server_config(&args, &Config::default()).unwrap();
        assert_eq!(server.bind_addr(), "127.0.0.1:8123");
    }
}
