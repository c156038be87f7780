use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref URL_REGEXP: Regex =
        Regex::new(r"^(?P<scheme>https?|ssh|git)://(?:[^@/]+@)?(?P<host>[^/:]+)(?::\d+)?/(?P<path>.+?)/?$")
            .unwrap();
    static ref SCP_REGEXP: Regex =
        Regex::new(r"^(?:[^@/]+@)?(?P<host>[^/:]+):(?P<path>[^/].*?)/?$").unwrap();
}

/// Transport a remote url is reached over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtocolKind {
    Https,
    Ssh,
    Unknown,
}

/// Host, owner and repository name extracted from a remote url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Protocol {
    pub kind: ProtocolKind,
    pub host: String,
    pub owner: String,
    pub repository_name: String,
}

impl Protocol {
    /// Never fails: an url we can't make sense of yields [`ProtocolKind::Unknown`].
    pub fn parse(url: &str) -> Self {
        let url = url.trim();

        if let Some(caps) = URL_REGEXP.captures(url) {
            let kind = match &caps["scheme"] {
                "http" | "https" => ProtocolKind::Https,
                _ => ProtocolKind::Ssh,
            };
            return Self::from_parts(kind, &caps["host"], &caps["path"]);
        }

        if let Some(caps) = SCP_REGEXP.captures(url) {
            return Self::from_parts(ProtocolKind::Ssh, &caps["host"], &caps["path"]);
        }

        Self::unknown()
    }

    fn from_parts(kind: ProtocolKind, host: &str, path: &str) -> Self {
        let (owner, name) = match path.rsplit_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() => (owner, name),
            _ => return Self::unknown(),
        };

        Self {
            kind,
            host: host.to_lowercase(),
            owner: owner.to_string(),
            repository_name: name.trim_end_matches(".git").to_string(),
        }
    }

    fn unknown() -> Self {
        Self {
            kind: ProtocolKind::Unknown,
            host: String::new(),
            owner: String::new(),
            repository_name: String::new(),
        }
    }

    /// `owner/repo`, or an empty string for an unknown protocol.
    pub fn nwo(&self) -> String {
        if self.kind == ProtocolKind::Unknown {
            return String::new();
        }
        format!("{}/{}", self.owner, self.repository_name)
    }
}

/// A version-control remote: its name (e.g. `origin`) and url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDescriptor {
    pub name: String,
    pub url: String,
    pub protocol: Protocol,
}

impl RemoteDescriptor {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
            protocol: Protocol::parse(url),
        }
    }

    /// Key sessions are stored under. Falls back to `github.com` when the
    /// url could not be parsed.
    pub fn host(&self) -> &str {
        if self.protocol.host.is_empty() {
            "github.com"
        } else {
            &self.protocol.host
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https() {
        let p = Protocol::parse("https://github.com/microsoft/vscode.git");
        assert_eq!(ProtocolKind::Https, p.kind);
        assert_eq!("github.com", p.host);
        assert_eq!("microsoft", p.owner);
        assert_eq!("vscode", p.repository_name);
        assert_eq!("microsoft/vscode", p.nwo());

        let p = Protocol::parse("https://user@GitHub.com:443/chenjiandongx/gitv/");
        assert_eq!("github.com", p.host);
        assert_eq!("gitv", p.repository_name);
    }

    #[test]
    fn test_parse_ssh() {
        let p = Protocol::parse("ssh://git@github.com/tokio-rs/tokio.git");
        assert_eq!(ProtocolKind::Ssh, p.kind);
        assert_eq!("tokio-rs/tokio", p.nwo());

        let p = Protocol::parse("git@github.com:chenjiandongx/gitv.git");
        assert_eq!(ProtocolKind::Ssh, p.kind);
        assert_eq!("github.com", p.host);
        assert_eq!("chenjiandongx", p.owner);
        assert_eq!("gitv", p.repository_name);
    }

    #[test]
    fn test_parse_unknown() {
        for url in ["", "not a url", "https://github.com/only-owner", "/tmp/repo"] {
            let p = Protocol::parse(url);
            assert_eq!(ProtocolKind::Unknown, p.kind, "{}", url);
            assert_eq!("", p.nwo());
        }
    }

    #[test]
    fn test_descriptor_host() {
        let remote = RemoteDescriptor::new("origin", "https://github.com/microsoft/vscode.git");
        assert_eq!("github.com", remote.host());

        let remote = RemoteDescriptor::new("origin", "/tmp/local");
        assert_eq!("github.com", remote.host());
    }
}
