//! Connection Manager
//!
//! Owns one server connection: host fallback on connect, banner parsing,
//! and the command/response exchange every operation is built on.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{DictError, HostFailure, Result};
use crate::protocol::{
    parse_banner, parse_status_line, starts_with_error, Body, BodyParser, Command, CommandType,
    PairMode, Progress, StatusCode, StatusLine,
};

use super::LineTransport;

/// A live DICT session
///
/// Exactly one command is outstanding at a time; every method takes
/// `&mut self`, so the borrow checker enforces it.
pub struct Connection {
    /// Line I/O over the socket
    transport: LineTransport,

    /// Host that accepted the connection
    host: String,

    port: u16,

    /// Capability tokens from the banner (fixed for the session)
    capabilities: Vec<String>,

    /// Message id from the banner, brackets included (fixed for the session)
    msgid: String,

    /// Status of the most recent command
    code: Option<StatusCode>,
    message: String,

    /// Most recent command
    command: Option<CommandType>,

    debug: bool,
    verbose: bool,
}

impl Connection {
    /// Connect to the first reachable host in `hosts`
    pub fn connect<S: AsRef<str>>(
        hosts: &[S],
        port: u16,
        debug: bool,
        verbose: bool,
    ) -> Result<Self> {
        let config = ClientConfig::builder()
            .hosts(hosts.iter().map(|h| h.as_ref().to_string()))
            .port(port)
            .debug(debug)
            .verbose(verbose)
            .build();
        Self::open(&config)
    }

    /// Connect using a full configuration
    ///
    /// Hosts are tried strictly in order. A host that refuses or times out is
    /// skipped; if none accepts (or the list is empty), every failure is
    /// reported. Once a TCP connection is up, an error-class banner is fatal:
    /// later hosts are not tried.
    pub fn open(config: &ClientConfig) -> Result<Self> {
        let mut failures = Vec::new();
        let mut connected = None;

        for host in &config.hosts {
            if config.verbose {
                tracing::info!("Attempting to connect to {}:{}...", host, config.port);
            }

            match connect_host(host, config.port, config.connect_timeout()) {
                Ok(stream) => {
                    connected = Some((host.clone(), stream));
                    break;
                }
                Err(error) => {
                    tracing::debug!("Connect to {}:{} failed: {}", host, config.port, error);
                    failures.push(HostFailure {
                        host: host.clone(),
                        port: config.port,
                        error,
                    });
                }
            }
        }

        let (host, stream) = connected.ok_or(DictError::NoReachableHost { failures })?;

        let mut transport = LineTransport::new(stream, config.debug)?;
        transport.set_timeouts(config.read_timeout(), config.write_timeout())?;

        let line = transport.recv_line()?;
        if starts_with_error(&line) {
            return Err(DictError::Banner(line));
        }
        let status = parse_status_line(&line)?;
        let banner = parse_banner(&line)?;

        if config.verbose {
            tracing::info!("Capabilities: {}", banner.capabilities.join(", "));
            tracing::info!("Msgid: {}", banner.msgid);
        }

        Ok(Self {
            transport,
            host,
            port: config.port,
            capabilities: banner.capabilities,
            msgid: banner.msgid,
            code: Some(status.code),
            message: status.message,
            command: None,
            debug: config.debug,
            verbose: config.verbose,
        })
    }

    // =========================================================================
    // Command / Response
    // =========================================================================

    /// Send a command and read its immediate status line
    pub fn exec(&mut self, command: &Command) -> Result<StatusLine> {
        self.exec_line(&command.to_line())
    }

    /// Send a raw command line and read its immediate status line
    ///
    /// The code, message and command type are kept as context for the body
    /// that may follow.
    pub fn exec_line(&mut self, line: &str) -> Result<StatusLine> {
        self.transport.send_line(line)?;
        let reply = self.transport.recv_line()?;
        let status = parse_status_line(&reply)?;

        self.code = Some(status.code);
        self.message = status.message.clone();
        self.command = Some(CommandType::from_line(line));

        if status.is_error() {
            tracing::debug!("{} -> {}", line, status);
        }
        Ok(status)
    }

    /// Read the body announced by the last status line
    ///
    /// `None` when the last command failed; the body is never read then.
    /// A success status that announces no body yields an empty body without
    /// touching the socket.
    pub fn read_body(&mut self) -> Result<Option<Body>> {
        let code = match self.code {
            Some(code) if !code.is_error() => code,
            _ => return Ok(None),
        };
        if !code.has_body() {
            return Ok(Some(Body::empty()));
        }

        let mode = match self.command {
            Some(CommandType::Match) => PairMode::Accumulate,
            _ => PairMode::Overwrite,
        };
        let mut parser = BodyParser::new(mode);

        loop {
            let line = self.transport.recv_line()?;
            if let Progress::Complete { value, status } = parser.feed(&line)? {
                tracing::trace!("Body complete: {}", status);
                return Ok(Some(value));
            }
        }
    }

    /// Read one raw line from the server
    pub(crate) fn recv_line(&mut self) -> Result<String> {
        self.transport.recv_line()
    }

    /// Send QUIT and close the socket
    pub fn disconnect(mut self) -> Result<()> {
        // A server may hang up on QUIT without sending 221
        let quit = match self.exec(&Command::Quit) {
            Err(DictError::ConnectionClosed) => Ok(()),
            other => other.map(drop),
        };
        let closed = self.transport.shutdown();
        if self.verbose {
            tracing::info!("Disconnected from {}:{}", self.host, self.port);
        }
        quit?;
        closed
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Capability tokens announced by the server
    pub fn capabilities(&self) -> &[String] {
        &self.capabilities
    }

    pub fn has_capability(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c.eq_ignore_ascii_case(name))
    }

    /// Message id from the banner, angle brackets included
    pub fn msgid(&self) -> &str {
        &self.msgid
    }

    /// Status code of the most recent command
    pub fn code(&self) -> Option<StatusCode> {
        self.code
    }

    /// Status message of the most recent command
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Type of the most recent command
    pub fn command(&self) -> Option<CommandType> {
        self.command
    }

    /// Host that accepted the connection
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn peer_addr(&self) -> &str {
        self.transport.peer_addr()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Open a TCP connection to one host
///
/// With a timeout, each resolved address is tried in turn and the last
/// failure is returned.
fn connect_host(host: &str, port: u16, timeout: Option<Duration>) -> io::Result<TcpStream> {
    let Some(timeout) = timeout else {
        return TcpStream::connect((host, port));
    };

    let mut last_err = None;
    for addr in (host, port).to_socket_addrs()? {
        match TcpStream::connect_timeout(&addr, timeout) {
            Ok(stream) => return Ok(stream),
            Err(e) => last_err = Some(e),
        }
    }
    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} resolved to no addresses", host),
        )
    }))
}
