use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    /// Something accepted a TCP handshake on the port.
    Open,
    /// The port could be bound locally, so nothing owns it.
    Free,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PortRecord {
    pub port: u16,
    pub state: PortState,
}

impl PortRecord {
    pub fn open(port: u16) -> Self {
        Self { port, state: PortState::Open }
    }

    pub fn free(port: u16) -> Self {
        Self { port, state: PortState::Free }
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => f.write_str("open"),
            PortState::Free => f.write_str("free"),
        }
    }
}

impl fmt::Display for PortRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/tcp {}", self.port, self.state)
    }
}
