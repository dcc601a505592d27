//! Line Transport
//!
//! CRLF-terminated line I/O over a TCP stream.

use std::io::{BufReader, BufWriter};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::error::Result;
use crate::protocol::{read_line, write_line};

/// Buffered line reader/writer for one server connection
pub struct LineTransport {
    /// TCP stream reader (buffered for efficiency)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,

    /// Trace raw traffic
    debug: bool,
}

impl LineTransport {
    /// Wrap a connected stream
    pub fn new(stream: TcpStream, debug: bool) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Commands are single short lines; don't let Nagle hold them back
        stream.set_nodelay(true)?;

        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self {
            reader: BufReader::new(read_stream),
            writer: BufWriter::new(write_stream),
            peer_addr,
            debug,
        })
    }

    /// Configure socket timeouts; `None` blocks indefinitely
    pub fn set_timeouts(&mut self, read: Option<Duration>, write: Option<Duration>) -> Result<()> {
        self.reader.get_ref().set_read_timeout(read)?;
        self.writer.get_ref().set_write_timeout(write)?;
        Ok(())
    }

    /// Send one line, appending CRLF
    pub fn send_line(&mut self, line: &str) -> Result<()> {
        if self.debug {
            tracing::debug!(peer = %self.peer_addr, "SEND: {}", line);
        }
        write_line(&mut self.writer, line)
    }

    /// Receive one line, CRLF stripped
    pub fn recv_line(&mut self) -> Result<String> {
        let line = read_line(&mut self.reader)?;
        if self.debug {
            tracing::debug!(peer = %self.peer_addr, "RECV: {}", line);
        }
        Ok(line)
    }

    /// Close both directions of the socket
    pub fn shutdown(&mut self) -> Result<()> {
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => Ok(()),
            // Server already hung up after QUIT
            Err(e) if e.kind() == std::io::ErrorKind::NotConnected => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}
