// Access guard
//
// Commands are either public (the sign-in flows) or protected. Running a
// protected command signed out sends the user to login; running a sign-in
// flow while already signed in sends them home.

use super::session::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    Home,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(Redirect),
}

pub fn check(access: Access, user: Option<&User>) -> Decision {
    match (access, user) {
        (Access::Protected, None) => Decision::Redirect(Redirect::Login),
        (Access::Public, Some(_)) => Decision::Redirect(Redirect::Home),
        _ => Decision::Allow,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decisions() {
        let user = User {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
        };
        assert_eq!(check(Access::Protected, None), Decision::Redirect(Redirect::Login));
        assert_eq!(check(Access::Protected, Some(&user)), Decision::Allow);
        assert_eq!(check(Access::Public, None), Decision::Allow);
        assert_eq!(check(Access::Public, Some(&user)), Decision::Redirect(Redirect::Home));
    }
}
