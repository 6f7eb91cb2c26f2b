//! Listener configuration from command-line arguments

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use clap::{value_parser, Arg, ArgMatches, Command};
use h1wire_core::ParserConfig;

pub const DEFAULT_PORT: u16 = 42069;

const ARGS_HOST: &str = "host";
const ARGS_PORT: &str = "port";
const ARGS_MAX_BUFFER: &str = "max-buffer";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub hostname: String,
    pub port: u16,
    pub parser: ParserConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            hostname: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            parser: ParserConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn command() -> Command {
        Command::new("h1wire-listen")
            .about("Accept TCP connections and print the HTTP/1.1 request read from each")
            .arg(
                Arg::new(ARGS_HOST)
                    .help("Address to bind")
                    .num_args(1)
                    .value_name("HOST")
                    .short('H')
                    .long(ARGS_HOST),
            )
            .arg(
                Arg::new(ARGS_PORT)
                    .help("Port to listen on")
                    .num_args(1)
                    .value_name("PORT")
                    .value_parser(value_parser!(u16))
                    .short('p')
                    .long(ARGS_PORT),
            )
            .arg(
                Arg::new(ARGS_MAX_BUFFER)
                    .help("Longest request or header line accepted, in bytes")
                    .num_args(1)
                    .value_name("BYTES")
                    .value_parser(value_parser!(usize))
                    .long(ARGS_MAX_BUFFER),
            )
    }

    pub fn from_args(args: &ArgMatches) -> Self {
        let mut config = Self::default();
        if let Some(host) = args.get_one::<String>(ARGS_HOST) {
            config.hostname = host.clone();
        }
        if let Some(port) = args.get_one::<u16>(ARGS_PORT) {
            config.port = *port;
        }
        if let Some(size) = args.get_one::<usize>(ARGS_MAX_BUFFER) {
            config.parser = config.parser.max_buffer_size(*size);
        }
        config
    }

    /// Resolve `hostname:port` to the first matching address
    pub fn socket_addr(&self) -> io::Result<SocketAddr> {
        (self.hostname.as_str(), self.port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("no address for {}:{}", self.hostname, self.port),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = ServerConfig::command().try_get_matches_from(["h1wire-listen"]).unwrap();
        let config = ServerConfig::from_args(&args);

        assert_eq!(config.hostname, "0.0.0.0");
        assert_eq!(config.port, 42069);
        assert_eq!(config.parser, ParserConfig::default());
    }

    #[test]
    fn test_from_args() {
        let args = ServerConfig::command()
            .try_get_matches_from([
                "h1wire-listen",
                "--host",
                "127.0.0.1",
                "-p",
                "8080",
                "--max-buffer",
                "1024",
            ])
            .unwrap();
        let config = ServerConfig::from_args(&args);

        assert_eq!(config.hostname, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.parser.max_buffer_size, 1024);
        assert_eq!(config.socket_addr().unwrap(), "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_invalid_port() {
        let result = ServerConfig::command().try_get_matches_from(["h1wire-listen", "--port", "70000"]);
        assert!(result.is_err());
    }
}
