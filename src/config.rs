use std::fmt;
use std::time::Duration;

/// Separators accepted between entries in a server-list string.
pub const SERVER_LIST_SEPARATORS: &[char] = &['\n', '\r', '\t', ' ', ',', ';'];

/// One coordination-store endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtcdServer {
    pub host: String,
    pub port: u16,
}

impl EtcdServer {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse a single `host:port` entry. Entries without a colon, with an
    /// empty host, or with an unparseable port yield `None`.
    pub fn parse(entry: &str) -> Option<Self> {
        let (host, port) = entry.split_once(':')?;
        if host.is_empty() {
            return None;
        }
        let port = port.parse::<u16>().ok()?;
        Some(Self::new(host, port))
    }
}

impl fmt::Display for EtcdServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a server-list string such as `"10.0.0.1:2379, 10.0.0.2:4001"`.
///
/// Entries are separated by whitespace, commas, or semicolons; entries that
/// do not parse as `host:port` are skipped.
pub fn parse_server_list(list: &str) -> Vec<EtcdServer> {
    list.split(SERVER_LIST_SEPARATORS)
        .filter(|entry| !entry.is_empty())
        .filter_map(EtcdServer::parse)
        .collect()
}

/// Session configuration: the ordered endpoint list consulted on every
/// operation, plus an optional per-request timeout.
#[derive(Debug, Clone)]
pub struct EtcdApiConfig {
    pub servers: Vec<EtcdServer>,
    pub timeout: Option<Duration>,
}

impl EtcdApiConfig {
    pub fn new(servers: Vec<EtcdServer>) -> Self {
        Self {
            servers,
            timeout: None,
        }
    }

    pub fn from_server_list(list: &str) -> Self {
        Self::new(parse_server_list(list))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
