use std::fmt;

/// The application's navigation surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/` - entry point, always redirects
    Root,
    /// `/login`
    Login,
    /// `/logout`
    Logout,
    /// `/horses` - the catalog list
    Horses,
    /// `/horses/:id` - a single record
    HorseDetails(u64),
    /// Anything else
    Unknown,
}

impl Route {
    /// Parse a path string into a route
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" | "/" => Self::Root,
            "/login" => Self::Login,
            "/logout" => Self::Logout,
            "/horses" => Self::Horses,
            _ => match trimmed.strip_prefix("/horses/") {
                Some(rest) => rest
                    .parse::<u64>()
                    .map(Self::HorseDetails)
                    .unwrap_or(Self::Unknown),
                None => Self::Unknown,
            },
        }
    }

    /// Whether this destination is behind the guard
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Horses | Self::HorseDetails(_) | Self::Logout)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => write!(f, "/"),
            Self::Login => write!(f, "/login"),
            Self::Logout => write!(f, "/logout"),
            Self::Horses => write!(f, "/horses"),
            Self::HorseDetails(id) => write!(f, "/horses/{}", id),
            Self::Unknown => write!(f, "/404"),
        }
    }
}
