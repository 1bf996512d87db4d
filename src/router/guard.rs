use super::route::Route;

/// The guard's verdict for one navigation hop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Render the requested destination
    Proceed,
    /// Go somewhere else instead; the original destination is not preserved
    Redirect(Route),
}

/// Access-control decision for a single destination.
///
/// Pure function of the destination and the current auth status; called on
/// every navigation event, never cached.
pub fn resolve(destination: Route, is_authenticated: bool) -> Resolution {
    match destination {
        Route::Root => Resolution::Redirect(Route::Login),
        Route::Login if is_authenticated => Resolution::Redirect(Route::Horses),
        Route::Login => Resolution::Proceed,
        Route::Unknown => Resolution::Redirect(Route::Login),
        guarded if guarded.requires_auth() && !is_authenticated => {
            Resolution::Redirect(Route::Login)
        }
        _ => Resolution::Proceed,
    }
}

/// Follow redirects to the route that will actually render.
///
/// The rules above cannot loop: every redirect lands on `/login` or
/// `/horses`, both of which terminate.
pub fn resolve_chain(destination: Route, is_authenticated: bool) -> Route {
    let mut current = destination;
    while let Resolution::Redirect(next) = resolve(current, is_authenticated) {
        current = next;
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unauthenticated_guarded_destinations_redirect_to_login() {
        assert_eq!(resolve(Route::Horses, false), Resolution::Redirect(Route::Login));
        assert_eq!(
            resolve(Route::HorseDetails(42), false),
            Resolution::Redirect(Route::Login)
        );
        assert_eq!(resolve(Route::Logout, false), Resolution::Redirect(Route::Login));
    }

    #[test]
    fn test_authenticated_login_redirects_to_horses() {
        assert_eq!(resolve(Route::Login, true), Resolution::Redirect(Route::Horses));
    }

    #[test]
    fn test_authenticated_guarded_destinations_proceed() {
        assert_eq!(resolve(Route::Horses, true), Resolution::Proceed);
        assert_eq!(resolve(Route::HorseDetails(42), true), Resolution::Proceed);
        assert_eq!(resolve(Route::Logout, true), Resolution::Proceed);
    }

    #[test]
    fn test_unknown_redirects_to_login_regardless_of_auth() {
        assert_eq!(resolve(Route::Unknown, false), Resolution::Redirect(Route::Login));
        assert_eq!(resolve(Route::Unknown, true), Resolution::Redirect(Route::Login));
    }

    #[test]
    fn test_root_resolves_to_a_fixed_point() {
        // Unauthenticated: / -> /login
        assert_eq!(resolve_chain(Route::Root, false), Route::Login);
        // Authenticated: / -> /login -> /horses
        assert_eq!(resolve_chain(Route::Root, true), Route::Horses);
    }
}
