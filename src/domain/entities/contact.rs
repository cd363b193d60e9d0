use std::fmt;

/// A chat contact, identified to the rest of the bot by display name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Contact {
    pub id: String,
    pub name: String,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Contact whose id is its display name (console and tests)
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A group chat. The topic is resolved through the transport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Room {
    pub id: String,
}

impl Room {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Destination of an outbound send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Contact(Contact),
    Room(Room),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Contact(contact) => write!(f, "{}", contact.name),
            Target::Room(room) => write!(f, "room {}", room.id),
        }
    }
}
